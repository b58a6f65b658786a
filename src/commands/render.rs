//! Render a single post

use anyhow::Result;

use crate::Blog;

/// Print a rendered post as JSON
pub fn run(blog: &Blog, id: &str) -> Result<()> {
    let post = blog.render_post(id)?;
    println!("{}", serde_json::to_string_pretty(&post)?);
    Ok(())
}
