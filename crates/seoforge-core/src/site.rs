//! The site document model.
//!
//! A [`SiteDocument`] is the complete generated website held in memory:
//! the site name, a theme, and the three fixed pages, with blog articles
//! attached to the blog page.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The paths every site document must carry, in navigation order.
pub const REQUIRED_PATHS: [&str; 3] = ["/", "/about", "/blog"];

/// Path of the page that carries articles.
pub const BLOG_PATH: &str = "/blog";

/// Invariant violations of a site document.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SiteError {
    /// A required page is missing.
    #[error("required page {0} is missing")]
    MissingPage(String),

    /// A required page appears more than once.
    #[error("page {0} appears more than once")]
    DuplicatePage(String),

    /// A page other than the blog carries articles.
    #[error("page {0} must not carry articles")]
    StrayArticles(String),

    /// The blog page has no articles.
    #[error("the blog page has no articles")]
    EmptyBlog,

    /// Two articles share a slug.
    #[error("duplicate article slug: {0}")]
    DuplicateSlug(String),

    /// An article field is empty.
    #[error("article {context}: {field} is empty")]
    EmptyArticleField {
        field: &'static str,
        context: String,
    },
}

/// The fixed theme palette.
///
/// This enum is the one canonical mapping from theme name to color value;
/// every renderer styles itself through [`ThemeColor::hex`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeColor {
    #[default]
    Blue,
    Green,
    Purple,
    Red,
    Indigo,
}

impl ThemeColor {
    /// All palette members, for prompts and validation messages.
    pub const ALL: [ThemeColor; 5] = [
        Self::Blue,
        Self::Green,
        Self::Purple,
        Self::Red,
        Self::Indigo,
    ];

    /// Parse a provider-supplied theme name; `None` for unknown values.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "blue" => Some(Self::Blue),
            "green" => Some(Self::Green),
            "purple" => Some(Self::Purple),
            "red" => Some(Self::Red),
            "indigo" => Some(Self::Indigo),
            _ => None,
        }
    }

    /// Lowercase palette name, as the provider is asked to spell it.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Purple => "purple",
            Self::Red => "red",
            Self::Indigo => "indigo",
        }
    }

    /// The primary color for this theme.
    #[must_use]
    pub fn hex(&self) -> &'static str {
        match self {
            Self::Blue => "#2563eb",
            Self::Green => "#16a34a",
            Self::Purple => "#9333ea",
            Self::Red => "#dc2626",
            Self::Indigo => "#4f46e5",
        }
    }
}

/// A blog article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// URL-safe identifier, unique within the blog page.
    pub slug: String,

    /// Article title.
    pub title: String,

    /// Article body in the constrained Markdown dialect.
    pub content: String,

    /// SEO summary, around 150 characters.
    pub meta_description: String,
}

impl Article {
    /// Check that every field is non-empty.
    pub fn validate(&self) -> std::result::Result<(), SiteError> {
        let context = if self.slug.is_empty() {
            self.title.clone()
        } else {
            self.slug.clone()
        };
        for (field, value) in [
            ("slug", &self.slug),
            ("title", &self.title),
            ("content", &self.content),
            ("meta description", &self.meta_description),
        ] {
            if value.trim().is_empty() {
                return Err(SiteError::EmptyArticleField {
                    field,
                    context: context.clone(),
                });
            }
        }
        Ok(())
    }
}

/// A site page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// URL path, one of [`REQUIRED_PATHS`].
    pub path: String,

    /// Page title.
    pub title: String,

    /// Page body in the constrained Markdown dialect.
    pub content: String,

    /// Articles, newest first. Empty unless this is the blog page.
    #[serde(default)]
    pub articles: Vec<Article>,
}

impl Page {
    /// Whether this is the blog page.
    #[must_use]
    pub fn is_blog(&self) -> bool {
        self.path == BLOG_PATH
    }
}

/// The complete generated website.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteDocument {
    /// Site name, shown in the header and page titles.
    pub site_name: String,

    /// Theme palette member.
    pub theme_color: ThemeColor,

    /// Pages in navigation order.
    pub pages: Vec<Page>,
}

impl SiteDocument {
    /// Look up a page by path.
    #[must_use]
    pub fn page(&self, path: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.path == path)
    }

    /// The blog page, if present.
    #[must_use]
    pub fn blog_page(&self) -> Option<&Page> {
        self.page(BLOG_PATH)
    }

    /// Mutable access to the blog page.
    pub fn blog_page_mut(&mut self) -> Option<&mut Page> {
        self.pages.iter_mut().find(|p| p.path == BLOG_PATH)
    }

    /// Titles of all blog articles, newest first.
    #[must_use]
    pub fn blog_titles(&self) -> Vec<String> {
        self.blog_page()
            .map(|p| p.articles.iter().map(|a| a.title.clone()).collect())
            .unwrap_or_default()
    }

    /// Check every document invariant.
    ///
    /// Exactly one page per required path, articles only on the blog page
    /// (and at least one there), every article well-formed, slugs unique.
    pub fn validate(&self) -> std::result::Result<(), SiteError> {
        for path in REQUIRED_PATHS {
            match self.pages.iter().filter(|p| p.path == path).count() {
                0 => return Err(SiteError::MissingPage(path.to_string())),
                1 => {}
                _ => return Err(SiteError::DuplicatePage(path.to_string())),
            }
        }

        for page in &self.pages {
            if !page.is_blog() && !page.articles.is_empty() {
                return Err(SiteError::StrayArticles(page.path.clone()));
            }
        }

        let blog = self
            .blog_page()
            .ok_or_else(|| SiteError::MissingPage(BLOG_PATH.to_string()))?;
        if blog.articles.is_empty() {
            return Err(SiteError::EmptyBlog);
        }

        let mut seen = std::collections::HashSet::new();
        for article in &blog.articles {
            article.validate()?;
            if !seen.insert(article.slug.as_str()) {
                return Err(SiteError::DuplicateSlug(article.slug.clone()));
            }
        }

        Ok(())
    }
}
