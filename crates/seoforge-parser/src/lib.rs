//! Constrained-Markdown parsing for seoforge.
//!
//! The generated content uses a deliberately small Markdown dialect: two
//! heading levels (`## `, `### `), one unordered-list marker (`* `), blank
//! lines, and paragraphs. This crate is the single place that dialect is
//! parsed; the static exporter and the live preview both render from the
//! [`Block`] sequence produced here, which is what keeps their heading
//! identifiers in sync.

pub mod markdown;
pub mod slug;

pub use markdown::{Block, TocEntry, parse, toc};
pub use slug::slugify;
