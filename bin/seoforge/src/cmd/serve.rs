//! Serve command - live preview with auto-posting.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use color_eyre::eyre::{Result, WrapErr};
use seoforge_core::{Config, SiteStore};
use seoforge_generator::Exporter;
use seoforge_provider::{ContentProvider, GeminiProvider};
use seoforge_scheduler::AutoPoster;
use tokio::net::TcpListener;

use crate::preview::{self, AppState};

/// Run the serve command.
///
/// Generates a site, starts the auto-post scheduler, and serves the live
/// preview until Ctrl-C. The preview exposes `/status` and `POST /export`.
pub async fn run(
    mut config: Config,
    name: &str,
    keywords: &str,
    article_keywords: Option<String>,
    port: Option<u16>,
    output: Option<PathBuf>,
    base_url: Option<String>,
) -> Result<()> {
    if let Some(base_url) = base_url {
        config.site.base_url = base_url;
    }
    let port = port.unwrap_or(config.serve.port);
    let output = output.unwrap_or_else(|| Path::new(&config.export.output_dir).to_path_buf());
    let article_keywords = article_keywords.unwrap_or_else(|| keywords.to_string());

    tracing::info!(name, keywords, port, "starting serve session");

    let provider: Arc<dyn ContentProvider> = Arc::new(
        GeminiProvider::from_config(&config.provider).wrap_err("Failed to set up the provider")?,
    );

    println!();
    println!("  Generating \"{name}\"...");

    let document = provider
        .create_site(name, keywords)
        .await
        .wrap_err("Site generation failed")?;
    println!("  ✓ Generated \"{}\"", document.site_name);

    let store = SiteStore::new();
    store.replace(document);

    let poster = Arc::new(AutoPoster::new(
        Arc::clone(&provider),
        store.clone(),
        config.autopost.interval(),
    ));
    poster.start(article_keywords);

    let state = AppState {
        store,
        poster: Arc::clone(&poster),
        exporter: Arc::new(Exporter::new(config.base_url())),
        output_dir: output,
    };

    let listener = TcpListener::bind(("127.0.0.1", port))
        .await
        .wrap_err_with(|| format!("Failed to bind port {port}"))?;

    println!();
    println!("  Preview:    http://127.0.0.1:{port}/");
    println!("  Status:     http://127.0.0.1:{port}/status");
    println!("  Export:     POST http://127.0.0.1:{port}/export");
    println!();
    println!("  Press Ctrl-C to stop.");
    println!();

    axum::serve(listener, preview::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("Preview server failed")?;

    // The session is over; make sure no timer outlives it.
    poster.stop();
    println!();
    println!("  ✓ Session stopped.");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
