//! Export orchestration.
//!
//! Serializes a complete site document into the static file set on disk.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

use seoforge_core::SiteDocument;
use thiserror::Error;
use tracing::{debug, info};

use crate::{html::HtmlRenderer, robots::robots_txt, sitemap::sitemap_xml, template::TemplateError};

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Template error.
    #[error("template error: {0}")]
    Template(#[from] TemplateError),
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Export statistics.
#[derive(Debug, Clone, Default)]
pub struct ExportStats {
    /// Number of page files written.
    pub pages: usize,

    /// Number of article files written.
    pub articles: usize,

    /// Export duration in milliseconds.
    pub duration_ms: u64,
}

/// File name for a page path: `/` becomes `index.html`, every other path
/// drops its leading slash and gains `.html`.
#[must_use]
pub fn page_file_name(path: &str) -> String {
    if path == "/" {
        "index.html".to_string()
    } else {
        format!("{}.html", path.trim_start_matches('/'))
    }
}

/// Serializes site documents into static file sets.
#[derive(Debug)]
pub struct Exporter {
    base_url: String,
}

impl Exporter {
    /// Create an exporter; `base_url` feeds sitemap.xml and robots.txt.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Write the complete file set for `document` under `out_dir`.
    ///
    /// A previous export at the same location is replaced. Failures leave
    /// the in-memory document untouched; re-running the export is always
    /// safe.
    pub fn export(&self, document: &SiteDocument, out_dir: &Path) -> Result<ExportStats> {
        let start = Instant::now();
        let mut stats = ExportStats::default();

        info!(out_dir = %out_dir.display(), "exporting static site");

        if out_dir.exists() {
            fs::remove_dir_all(out_dir)?;
        }
        fs::create_dir_all(out_dir.join("articles"))?;

        let renderer = HtmlRenderer::new(document);

        for page in &document.pages {
            let file = out_dir.join(page_file_name(&page.path));
            fs::write(&file, renderer.page(page)?)?;
            debug!(file = %file.display(), "wrote page");
            stats.pages += 1;

            for article in &page.articles {
                let file = articles_dir(out_dir).join(format!("{}.html", article.slug));
                fs::write(&file, renderer.article(article)?)?;
                debug!(file = %file.display(), "wrote article");
                stats.articles += 1;
            }
        }

        fs::write(
            out_dir.join("sitemap.xml"),
            sitemap_xml(&self.base_url, document),
        )?;
        fs::write(out_dir.join("robots.txt"), robots_txt(&self.base_url))?;

        stats.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            pages = stats.pages,
            articles = stats.articles,
            duration_ms = stats.duration_ms,
            "export complete"
        );
        Ok(stats)
    }
}

fn articles_dir(out_dir: &Path) -> PathBuf {
    out_dir.join("articles")
}
