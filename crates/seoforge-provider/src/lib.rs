//! Content provider adapter for seoforge.
//!
//! Wraps the external generative service behind the narrow
//! [`ContentProvider`] contract: a site brief in, a validated
//! [`SiteDocument`] out; article keywords plus exclusion titles in, exactly
//! three validated [`Article`]s out. Pure request/response; no state is
//! kept between calls and failures are never retried here.

pub mod error;
pub mod gemini;
pub mod prompt;
pub mod schema;
pub mod validate;

use async_trait::async_trait;
use seoforge_core::{Article, SiteDocument};

pub use error::{ProviderError, Result};
pub use gemini::GeminiProvider;
pub use validate::EXPECTED_ARTICLE_COUNT;

/// The content provider boundary.
///
/// Implementations map prompts to structured content and can fail with
/// [`ProviderError`]; callers decide what a failure means for them.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Generate a complete site document from a brief.
    async fn create_site(&self, site_name: &str, site_keywords: &str) -> Result<SiteDocument>;

    /// Generate three new articles, avoiding titles similar to
    /// `exclude_titles`.
    async fn create_articles(
        &self,
        article_keywords: &str,
        exclude_titles: &[String],
    ) -> Result<Vec<Article>>;
}
