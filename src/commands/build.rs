//! Build the static site

use anyhow::Result;

use crate::generator::Generator;
use crate::Blog;

/// Generate every page, the index and the sitemap
pub fn run(blog: &Blog) -> Result<()> {
    let start = std::time::Instant::now();

    Generator::new(blog).generate()?;

    let duration = start.elapsed();
    tracing::info!("Completed in {:.2}s", duration.as_secs_f64());

    Ok(())
}
