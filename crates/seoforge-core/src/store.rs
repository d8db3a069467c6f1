//! The in-memory site document store.
//!
//! Single source of truth for the generated site. The preview renders from
//! it, the scheduler merges new articles into it, and the exporter
//! snapshots it. Replacing or clearing the document bumps a generation
//! counter; a merge started against an older generation is discarded, so a
//! slow provider response can never mutate a site that has since been
//! replaced or torn down.

use std::{collections::HashSet, sync::Arc};

use parking_lot::RwLock;
use tracing::debug;

use crate::site::{Article, SiteDocument};

/// Shared handle to the current site document.
///
/// Cheap to clone; all clones observe the same document. Locks are held
/// only for the duration of a call, never across an await point.
#[derive(Debug, Clone, Default)]
pub struct SiteStore {
    inner: Arc<RwLock<Slot>>,
}

#[derive(Debug, Default)]
struct Slot {
    document: Option<SiteDocument>,
    generation: u64,
}

/// What the scheduler needs to start a fetch-and-merge cycle.
#[derive(Debug, Clone)]
pub struct BlogSnapshot {
    /// Store generation the snapshot was taken at.
    pub generation: u64,
    /// Existing article titles, newest first.
    pub titles: Vec<String>,
}

/// Result of [`SiteStore::merge_articles`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Articles were prepended to the blog page.
    Merged {
        /// Number of articles added.
        added: usize,
        /// How many were renamed to avoid slug collisions.
        renamed: usize,
    },
    /// The store moved on since the snapshot; the result was discarded.
    Stale,
    /// There is no document to merge into.
    NoDocument,
}

impl SiteStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a new document, discarding any previous one.
    ///
    /// Returns the new generation; merges snapshotted before this call
    /// will be rejected as stale.
    pub fn replace(&self, document: SiteDocument) -> u64 {
        let mut slot = self.inner.write();
        slot.generation += 1;
        slot.document = Some(document);
        debug!(generation = slot.generation, "site document replaced");
        slot.generation
    }

    /// Drop the current document.
    pub fn clear(&self) {
        let mut slot = self.inner.write();
        slot.generation += 1;
        slot.document = None;
        debug!(generation = slot.generation, "site document cleared");
    }

    /// Current generation counter.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.inner.read().generation
    }

    /// Clone the current document, if any.
    #[must_use]
    pub fn snapshot(&self) -> Option<SiteDocument> {
        self.inner.read().document.clone()
    }

    /// Snapshot the blog titles together with the store generation.
    #[must_use]
    pub fn blog_snapshot(&self) -> Option<BlogSnapshot> {
        let slot = self.inner.read();
        let document = slot.document.as_ref()?;
        Some(BlogSnapshot {
            generation: slot.generation,
            titles: document.blog_titles(),
        })
    }

    /// Prepend articles to the blog page, newest first.
    ///
    /// `generation` must match the value captured when the cycle started;
    /// otherwise the articles are discarded as stale. Slugs colliding with
    /// existing articles (or with each other) are renamed with a numeric
    /// suffix.
    pub fn merge_articles(&self, generation: u64, articles: Vec<Article>) -> MergeOutcome {
        let mut slot = self.inner.write();
        if slot.generation != generation {
            debug!(
                expected = generation,
                current = slot.generation,
                "discarding stale article merge"
            );
            return MergeOutcome::Stale;
        }
        let Some(blog) = slot.document.as_mut().and_then(SiteDocument::blog_page_mut) else {
            return MergeOutcome::NoDocument;
        };

        let existing = std::mem::take(&mut blog.articles);
        let mut slugs: HashSet<String> = existing.iter().map(|a| a.slug.clone()).collect();

        let added = articles.len();
        let mut renamed = 0;
        let mut merged = Vec::with_capacity(added + existing.len());
        for mut article in articles {
            let slug = unique_slug(&article.slug, &slugs);
            if slug != article.slug {
                debug!(from = %article.slug, to = %slug, "renamed colliding article slug");
                renamed += 1;
                article.slug = slug;
            }
            slugs.insert(article.slug.clone());
            merged.push(article);
        }
        merged.extend(existing);
        blog.articles = merged;

        debug!(added, renamed, "merged new articles into blog page");
        MergeOutcome::Merged { added, renamed }
    }
}

/// First free slug: `base`, then `base-2`, `base-3`, …
fn unique_slug(base: &str, taken: &HashSet<String>) -> String {
    if !taken.contains(base) {
        return base.to_string();
    }
    let mut n = 2u32;
    loop {
        let candidate = format!("{base}-{n}");
        if !taken.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
