//! List site content

use anyhow::Result;

use crate::Blog;

/// List site content by type
pub fn run(blog: &Blog, content_type: &str) -> Result<()> {
    match content_type {
        "post" | "posts" => {
            let posts = blog.list_posts()?;
            println!("Posts ({}):", posts.len());
            for post in posts {
                println!("  {} - {} [{}]", post.date, post.title, post.id);
            }
        }
        "route" | "routes" => {
            let routes = blog.list_routes()?;
            println!("Routes ({}):", routes.len());
            for route in routes {
                println!("  {}", crate::helpers::post_path(&route.id));
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, route",
                content_type
            );
        }
    }

    Ok(())
}
