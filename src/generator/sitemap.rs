//! Sitemap and robots.txt generation

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::config::SiteConfig;
use crate::content::PostSummary;
use crate::helpers::{date_xml, full_url_for, post_path};

/// A single `<url>` entry
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    /// Site path, e.g. `/posts/hello-world`
    pub path: String,
    pub lastmod: Option<String>,
}

/// Entries for the index page and every post, minus excluded paths
pub fn entries(config: &SiteConfig, posts: &[PostSummary]) -> Vec<SitemapEntry> {
    let index = SitemapEntry {
        path: "/".to_string(),
        lastmod: posts.iter().filter_map(|p| p.published).max().map(|d| date_xml(&d)),
    };

    std::iter::once(index)
        .chain(posts.iter().map(|post| SitemapEntry {
            path: post_path(&post.id),
            lastmod: post.published.as_ref().map(date_xml),
        }))
        .filter(|entry| !is_excluded(&config.sitemap.exclude, &entry.path))
        .collect()
}

/// Render a `<urlset>` document
pub fn render_urlset(config: &SiteConfig, entries: &[SitemapEntry]) -> String {
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
    xml.push('\n');

    for entry in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!(
            "    <loc>{}</loc>\n",
            escape_xml(&full_url_for(config, &entry.path))
        ));
        if let Some(lastmod) = &entry.lastmod {
            xml.push_str(&format!("    <lastmod>{}</lastmod>\n", lastmod));
        }
        xml.push_str(&format!(
            "    <changefreq>{}</changefreq>\n",
            escape_xml(&config.sitemap.changefreq)
        ));
        xml.push_str(&format!(
            "    <priority>{}</priority>\n",
            config.sitemap.priority
        ));
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

/// Render a `<sitemapindex>` pointing at the given sitemap files
pub fn render_index(config: &SiteConfig, files: &[String]) -> String {
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(r#"<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
    xml.push('\n');

    for file in files {
        xml.push_str(&format!(
            "  <sitemap><loc>{}</loc></sitemap>\n",
            escape_xml(&full_url_for(config, file))
        ));
    }

    xml.push_str("</sitemapindex>\n");
    xml
}

/// robots.txt allowing everything and pointing at the sitemap
pub fn robots_txt(config: &SiteConfig) -> String {
    format!(
        "User-agent: *\nAllow: /\n\nHost: {}\nSitemap: {}\n",
        config.url.trim_end_matches('/'),
        full_url_for(config, "sitemap.xml")
    )
}

/// Write sitemap.xml (split into parts when over the size limit) and robots.txt
/// Returns the names of the files written
pub fn write(config: &SiteConfig, public_dir: &Path, posts: &[PostSummary]) -> Result<Vec<String>> {
    let entries = entries(config, posts);
    let size = config.sitemap.size.max(1);
    let mut written = Vec::new();

    if entries.len() <= size {
        fs::write(
            public_dir.join("sitemap.xml"),
            render_urlset(config, &entries),
        )?;
        written.push("sitemap.xml".to_string());
    } else {
        let mut parts = Vec::new();
        for (i, chunk) in entries.chunks(size).enumerate() {
            let name = format!("sitemap-{}.xml", i);
            fs::write(public_dir.join(&name), render_urlset(config, chunk))?;
            parts.push(name);
        }
        fs::write(public_dir.join("sitemap.xml"), render_index(config, &parts))?;
        written.extend(parts);
        written.push("sitemap.xml".to_string());
    }

    if config.sitemap.robots_txt {
        fs::write(public_dir.join("robots.txt"), robots_txt(config))?;
        written.push("robots.txt".to_string());
    }

    tracing::debug!("Wrote {} sitemap entries", entries.len());
    Ok(written)
}

/// Exact paths, or prefixes when the pattern ends in `*`
fn is_excluded(patterns: &[String], path: &str) -> bool {
    patterns.iter().any(|pattern| match pattern.strip_suffix('*') {
        Some(prefix) => path.starts_with(prefix),
        None => pattern == path,
    })
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::parse_date_string;
    use indexmap::IndexMap;

    fn post(id: &str, date: &str) -> PostSummary {
        PostSummary {
            id: id.to_string(),
            title: id.to_string(),
            date: date.to_string(),
            published: parse_date_string(date),
            description: None,
            tags: Vec::new(),
            extra: IndexMap::new(),
        }
    }

    #[test]
    fn test_entries() {
        let config = SiteConfig::default();
        let posts = vec![post("new", "2021-06-01"), post("old", "2021-01-05")];
        let entries = entries(&config, &posts);

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].path, "/");
        assert_eq!(
            entries[0].lastmod.as_deref(),
            Some("2021-06-01T00:00:00+00:00")
        );
        assert_eq!(entries[2].path, "/posts/old");
    }

    #[test]
    fn test_exclude() {
        let mut config = SiteConfig::default();
        config.sitemap.exclude = vec!["/posts/secret*".to_string(), "/".to_string()];
        let posts = vec![post("secret-plans", "2021-06-01"), post("public", "2021-01-05")];

        let paths: Vec<_> = entries(&config, &posts).into_iter().map(|e| e.path).collect();
        assert_eq!(paths, vec!["/posts/public"]);
    }

    #[test]
    fn test_render_urlset() {
        let config = SiteConfig::default();
        let xml = render_urlset(&config, &entries(&config, &[post("a&b", "2021-01-05")]));
        assert!(xml.contains("<loc>https://mw.codes/</loc>"));
        assert!(xml.contains("<loc>https://mw.codes/posts/a&amp;b</loc>"));
        assert!(xml.contains("<changefreq>daily</changefreq>"));
        assert!(xml.contains("<priority>0.7</priority>"));
    }

    #[test]
    fn test_priority_written_as_configured() {
        let mut config = SiteConfig::default();
        config.sitemap.priority = 0.75;
        let xml = render_urlset(&config, &entries(&config, &[]));
        assert!(xml.contains("<priority>0.75</priority>"));
    }

    #[test]
    fn test_robots_txt() {
        let robots = robots_txt(&SiteConfig::default());
        assert!(robots.contains("User-agent: *"));
        assert!(robots.contains("Sitemap: https://mw.codes/sitemap.xml"));
    }
}
