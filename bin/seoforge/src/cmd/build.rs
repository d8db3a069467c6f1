//! Build command - generate a site and export it as static HTML.

use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr};
use seoforge_core::Config;
use seoforge_generator::Exporter;
use seoforge_provider::{ContentProvider, GeminiProvider};

/// Run the build command.
///
/// One-shot: ask the provider for a complete site document and serialize
/// it to the output directory. No scheduler is started.
pub async fn run(
    mut config: Config,
    name: &str,
    keywords: &str,
    output: Option<PathBuf>,
    base_url: Option<String>,
) -> Result<()> {
    if let Some(base_url) = base_url {
        config.site.base_url = base_url;
    }
    let output = output.unwrap_or_else(|| Path::new(&config.export.output_dir).to_path_buf());

    tracing::info!(name, keywords, output = %output.display(), "starting build");

    let provider =
        GeminiProvider::from_config(&config.provider).wrap_err("Failed to set up the provider")?;

    println!();
    println!("  Generating \"{name}\"...");

    let document = provider
        .create_site(name, keywords)
        .await
        .wrap_err("Site generation failed")?;

    let stats = Exporter::new(config.base_url())
        .export(&document, &output)
        .wrap_err("Export failed")?;

    println!();
    println!("  ✓ Site exported successfully!");
    println!();
    println!("  Site name:  {}", document.site_name);
    println!("  Theme:      {}", document.theme_color.name());
    println!("  Pages:      {}", stats.pages);
    println!("  Articles:   {}", stats.articles);
    println!();
    println!("  Duration:   {}ms", stats.duration_ms);
    println!("  Output:     {}", output.display());
    println!();

    Ok(())
}
