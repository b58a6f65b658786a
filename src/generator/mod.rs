//! Generator module - drives static generation of every post
//!
//! Presentation is out of scope here: each page is written as JSON holding
//! the front-matter, the document tree and an HTML rendering of the body,
//! ready for a layout layer to consume.

pub mod sitemap;

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::components::{ComponentRegistry, HtmlWriter};
use crate::content::{ContentLoader, PostSummary, RenderedPost};
use crate::Blog;

/// Payload written for each post page
#[derive(Debug, Serialize)]
pub struct PostPage<'a> {
    #[serde(flatten)]
    pub post: &'a RenderedPost,
    pub html: String,
}

/// Payload written for the index page
#[derive(Debug, Serialize)]
pub struct IndexPage<'a> {
    pub title: &'a str,
    pub posts: &'a [PostSummary],
}

/// Static site generator
pub struct Generator<'a> {
    blog: &'a Blog,
    loader: ContentLoader,
    components: ComponentRegistry,
}

impl<'a> Generator<'a> {
    /// Create a new generator with the components the config enables
    pub fn new(blog: &'a Blog) -> Self {
        Self::with_components(blog, ComponentRegistry::from_config(&blog.config))
    }

    /// Create a generator with a caller-supplied component registry
    pub fn with_components(blog: &'a Blog, components: ComponentRegistry) -> Self {
        Self {
            blog,
            loader: blog.loader(),
            components,
        }
    }

    /// Generate the entire site
    ///
    /// Aborts on the first error; there is no partial output mode.
    pub fn generate(&self) -> Result<()> {
        let public_dir = &self.blog.public_dir;
        fs::create_dir_all(public_dir)
            .with_context(|| format!("creating {:?}", public_dir))?;

        // Pages are declared up front, then rendered one by one
        let routes = self.loader.list_routes()?;
        let writer = HtmlWriter::new(&self.components);

        for route in &routes {
            let post = self.loader.render_post(&route.id)?;
            let page = PostPage {
                html: writer.render(&post.body),
                post: &post,
            };
            let target = public_dir.join("posts").join(&route.id).join("index.json");
            write_json(&target, &page)?;
            tracing::debug!("Generated post: {}", route.id);
        }

        let posts = self.loader.list_posts()?;
        write_json(
            &public_dir.join("index.json"),
            &IndexPage {
                title: &self.blog.config.title,
                posts: &posts,
            },
        )?;

        if self.blog.config.sitemap.enable {
            let files = sitemap::write(&self.blog.config, public_dir, &posts)?;
            tracing::debug!("Generated {}", files.join(", "));
        }

        tracing::info!("Generated {} posts into {:?}", routes.len(), public_dir);
        Ok(())
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("writing {:?}", path))?;
    Ok(())
}
