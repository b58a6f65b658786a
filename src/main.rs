//! CLI entry point for mwblog

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mwblog")]
#[command(version)]
#[command(about = "Content pipeline and static generator for a markdown/MDX blog", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate every post page, the index and the sitemap
    #[command(alias = "b")]
    Build,

    /// List posts (newest first) or routes
    List {
        /// Type of content to list (post, route)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Print a rendered post as JSON
    Render {
        /// Post identifier (file name without extension)
        id: String,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// File name to use instead of the slugified title
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// Remove the public folder
    Clean,

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "mwblog=debug,info"
    } else {
        "mwblog=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("reading current directory")?,
    };

    match cli.command {
        Commands::Build => {
            let blog = mwblog::Blog::new(&base_dir)?;
            tracing::info!("Generating static files...");
            blog.build()?;
            println!("Generated successfully!");
        }

        Commands::List { r#type } => {
            let blog = mwblog::Blog::new(&base_dir)?;
            mwblog::commands::list::run(&blog, &r#type)?;
        }

        Commands::Render { id } => {
            let blog = mwblog::Blog::new(&base_dir)?;
            mwblog::commands::render::run(&blog, &id)?;
        }

        Commands::New { title, slug } => {
            let blog = mwblog::Blog::new(&base_dir)?;
            tracing::info!("Creating new post with title: {}", title);
            mwblog::commands::new::run(&blog, &title, slug.as_deref())?;
        }

        Commands::Clean => {
            let blog = mwblog::Blog::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            blog.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("mwblog version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
