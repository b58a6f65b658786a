//! mwblog: content pipeline for a markdown/MDX blog
//!
//! Posts live as files in a flat directory. This crate lists them newest
//! first, enumerates one route per post, and converts a post body into a
//! renderable tree whose code blocks carry their language tag.

pub mod commands;
pub mod components;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod helpers;

use anyhow::Result;
use std::path::{Path, PathBuf};

use content::{ContentLoader, ContentStore, PostSummary, RenderedPost, Route};

/// The blog application
#[derive(Debug, Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Posts directory (the content store)
    pub posts_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Blog {
    /// Create a new Blog from a directory, reading `_config.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a Blog with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let posts_dir = base_dir.join(&config.posts_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Self {
            config,
            base_dir,
            posts_dir,
            public_dir,
        }
    }

    /// The content store for the configured posts directory
    pub fn store(&self) -> ContentStore {
        ContentStore::new(&self.posts_dir, self.config.extensions.clone())
    }

    pub fn loader(&self) -> ContentLoader {
        ContentLoader::new(self.store())
    }

    /// All posts, newest first
    pub fn list_posts(&self) -> error::Result<Vec<PostSummary>> {
        self.loader().list_posts()
    }

    /// One route per post
    pub fn list_routes(&self) -> error::Result<Vec<Route>> {
        self.loader().list_routes()
    }

    /// Render a single post by identifier
    pub fn render_post(&self, id: &str) -> error::Result<RenderedPost> {
        self.loader().render_post(id)
    }

    /// Generate the static site
    pub fn build(&self) -> Result<()> {
        commands::build::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Create a new post
    pub fn new_post(&self, title: &str, slug: Option<&str>) -> Result<PathBuf> {
        commands::new::create_post(self, title, slug)
    }
}
