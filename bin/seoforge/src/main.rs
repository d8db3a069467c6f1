//! seoforge CLI
//!
//! Generates a small marketing website with a generative language model,
//! previews it locally, auto-posts new blog articles on a timer, and
//! exports the site as static HTML.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use seoforge_core::Config;

/// Command-line interface for seoforge.
#[derive(Parser)]
#[command(
    name = "seoforge",
    version,
    about = "AI-assisted marketing site generator"
)]
struct Cli {
    /// Path to configuration file (defaults to seoforge.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Generate a site from a brief and export it as static HTML
    Build {
        /// Site name
        #[arg(long)]
        name: String,
        /// Site-wide keywords, comma separated
        #[arg(long)]
        keywords: String,
        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Override the base URL used in sitemap.xml and robots.txt
        #[arg(long)]
        base_url: Option<String>,
    },
    /// Generate a site, auto-post articles, and serve a live preview
    Serve {
        /// Site name
        #[arg(long)]
        name: String,
        /// Site-wide keywords, comma separated
        #[arg(long)]
        keywords: String,
        /// Keywords for auto-posted articles (defaults to the site keywords)
        #[arg(long)]
        article_keywords: Option<String>,
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
        /// Output directory for exports triggered from the preview
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Override the base URL used in sitemap.xml and robots.txt
        #[arg(long)]
        base_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    seoforge::init_tracing(cli.verbose);

    let config = Config::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Build {
            name,
            keywords,
            output,
            base_url,
        } => {
            seoforge::cmd::build::run(config, &name, &keywords, output, base_url).await?;
        }
        Commands::Serve {
            name,
            keywords,
            article_keywords,
            port,
            output,
            base_url,
        } => {
            seoforge::cmd::serve::run(
                config,
                &name,
                &keywords,
                article_keywords,
                port,
                output,
                base_url,
            )
            .await?;
        }
    }

    Ok(())
}
