//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub url: String,

    // Directory
    /// Content store, relative to the base directory
    pub posts_dir: String,
    pub public_dir: String,

    /// File extensions treated as documents (without the dot)
    pub extensions: Vec<String>,

    #[serde(default)]
    pub highlight: HighlightConfig,
    #[serde(default)]
    pub sitemap: SitemapConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "mw.codes".to_string(),
            url: "https://mw.codes".to_string(),

            posts_dir: "src/posts".to_string(),
            public_dir: "public".to_string(),
            extensions: vec!["md".to_string(), "mdx".to_string(), "markdown".to_string()],

            highlight: HighlightConfig::default(),
            sitemap: SitemapConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        tracing::debug!("Loaded config from {:?}", path.as_ref());
        Ok(config)
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    /// Name of a bundled syntect theme
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            theme: "base16-ocean.dark".to_string(),
            line_number: true,
        }
    }
}

/// Sitemap and robots.txt configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    pub enable: bool,
    pub changefreq: String,
    pub priority: f32,
    /// Maximum URLs per sitemap file before splitting into an index
    pub size: usize,
    pub robots_txt: bool,
    /// Site paths left out of the sitemap
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            enable: true,
            changefreq: "daily".to_string(),
            priority: 0.7,
            size: 5000,
            robots_txt: true,
            exclude: Vec::new(),
        }
    }
}
