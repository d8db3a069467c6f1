//! Line-level parsing of the constrained dialect.

use crate::slug::slugify;

/// A parsed block-level node.
///
/// Produced line by line; consecutive [`Block::ListItem`]s are grouped into
/// a single list by the renderers, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// A `## ` or `### ` heading with its derived anchor identifier.
    Heading { level: u8, text: String, id: String },
    /// A `* ` list item.
    ListItem(String),
    /// A blank line, rendered as a paragraph break.
    Blank,
    /// Any other line, kept verbatim.
    Paragraph(String),
}

/// A table-of-contents entry, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    /// Heading level (2 or 3).
    pub level: u8,
    /// Heading text, verbatim.
    pub text: String,
    /// Anchor identifier, shared with the rendered heading.
    pub id: String,
}

/// Parse content into block nodes, one per input line.
///
/// Rules are evaluated top to bottom, first match wins:
/// `## ` heading, `### ` heading, `* ` list item, blank line, paragraph.
#[must_use]
pub fn parse(content: &str) -> Vec<Block> {
    content.lines().map(parse_line).collect()
}

fn parse_line(line: &str) -> Block {
    if let Some(text) = line.strip_prefix("## ") {
        heading(2, text)
    } else if let Some(text) = line.strip_prefix("### ") {
        heading(3, text)
    } else if let Some(text) = line.strip_prefix("* ") {
        Block::ListItem(text.to_string())
    } else if line.trim().is_empty() {
        Block::Blank
    } else {
        Block::Paragraph(line.to_string())
    }
}

fn heading(level: u8, text: &str) -> Block {
    Block::Heading {
        level,
        text: text.to_string(),
        id: slugify(text),
    }
}

/// Extract the table of contents: every heading, in document order.
#[must_use]
pub fn toc(content: &str) -> Vec<TocEntry> {
    parse(content)
        .into_iter()
        .filter_map(|block| match block {
            Block::Heading { level, text, id } => Some(TocEntry { level, text, id }),
            _ => None,
        })
        .collect()
}
