//! Create a new post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::content::store::is_valid_id;
use crate::content::FrontMatter;
use crate::error::ContentError;
use crate::Blog;

/// Scaffold a post with a title and today's date
/// Returns the path of the new file
pub fn create_post(blog: &Blog, title: &str, slug: Option<&str>) -> Result<PathBuf> {
    let slug = match slug {
        Some(s) => s.to_string(),
        None => slug::slugify(title),
    };
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a file name from title {:?}", title);
    }
    if !is_valid_id(&slug) {
        anyhow::bail!("Invalid slug {:?}: must be a bare file name", slug);
    }

    fs::create_dir_all(&blog.posts_dir)?;

    // The identifier must stay unique across every document extension
    match blog.store().find(&slug) {
        Ok(existing) => anyhow::bail!("File already exists: {:?}", existing.path),
        Err(ContentError::NotFound(_)) => {}
        Err(e) => return Err(e.into()),
    }

    let fm = FrontMatter {
        title: Some(title.to_string()),
        date: Some(chrono::Local::now().format("%Y-%m-%d").to_string()),
        ..Default::default()
    };
    let content = format!("---\n{}---\n", fm.to_yaml()?);

    let file_path = blog.posts_dir.join(format!("{}.md", slug));
    fs::write(&file_path, content)?;

    tracing::info!("Created: {:?}", file_path);
    Ok(file_path)
}

/// Run the new command
pub fn run(blog: &Blog, title: &str, slug: Option<&str>) -> Result<()> {
    let path = create_post(blog, title, slug)?;
    println!("Created: {:?}", path);
    Ok(())
}
