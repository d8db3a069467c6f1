//! seoforge core library.
//!
//! Core types, configuration, and error handling shared across the
//! seoforge crates: the site document model and its invariants, and the
//! in-memory store that the preview, the scheduler, and the exporter all
//! read from.

pub mod config;
pub mod error;
pub mod site;
pub mod store;

pub use config::Config;
pub use error::{CoreError, Result};
pub use site::{Article, Page, SiteDocument, SiteError, ThemeColor};
pub use store::{BlogSnapshot, MergeOutcome, SiteStore};
