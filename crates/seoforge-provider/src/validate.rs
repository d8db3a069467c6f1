//! Validation of raw provider responses into core types.

use seoforge_core::{Article, Page, SiteDocument, ThemeColor};
use serde::Deserialize;
use tracing::warn;

use crate::error::{ProviderError, Result};

/// How many articles every `create_articles` call must return.
pub const EXPECTED_ARTICLE_COUNT: usize = 3;

/// Site document as the provider returns it, before validation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSite {
    pub site_name: String,
    #[serde(default)]
    pub theme_color: Option<String>,
    pub pages: Vec<RawPage>,
}

/// Page as the provider returns it.
#[derive(Debug, Deserialize)]
pub struct RawPage {
    pub path: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub articles: Vec<RawArticle>,
}

/// Article as the provider returns it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawArticle {
    pub slug: String,
    pub title: String,
    pub content: String,
    pub meta_description: String,
}

impl From<RawArticle> for Article {
    fn from(raw: RawArticle) -> Self {
        Self {
            slug: raw.slug,
            title: raw.title,
            content: raw.content,
            meta_description: raw.meta_description,
        }
    }
}

/// Convert and validate a raw site response.
///
/// Unrecognized theme names fall back to the default palette member; every
/// structural invariant of [`SiteDocument`] is enforced.
pub fn site_document(raw: RawSite) -> Result<SiteDocument> {
    let theme_color = match raw.theme_color.as_deref() {
        None => ThemeColor::default(),
        Some(name) => ThemeColor::from_name(name).unwrap_or_else(|| {
            warn!(theme = name, "unrecognized theme color, falling back");
            ThemeColor::default()
        }),
    };

    let document = SiteDocument {
        site_name: raw.site_name,
        theme_color,
        pages: raw
            .pages
            .into_iter()
            .map(|page| Page {
                path: page.path,
                title: page.title,
                content: page.content,
                articles: page.articles.into_iter().map(Article::from).collect(),
            })
            .collect(),
    };

    document.validate()?;
    Ok(document)
}

/// Convert and validate a raw article batch.
///
/// Exactly [`EXPECTED_ARTICLE_COUNT`] well-formed articles, or an error.
pub fn articles(raw: Vec<RawArticle>) -> Result<Vec<Article>> {
    if raw.len() != EXPECTED_ARTICLE_COUNT {
        return Err(ProviderError::WrongArticleCount {
            expected: EXPECTED_ARTICLE_COUNT,
            actual: raw.len(),
        });
    }

    let articles: Vec<Article> = raw.into_iter().map(Article::from).collect();
    for article in &articles {
        article.validate()?;
    }
    Ok(articles)
}
