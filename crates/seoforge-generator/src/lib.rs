//! Static export serialization for seoforge.
//!
//! Turns a site document into the downloadable file set: one standalone
//! HTML file per page, one per article, `sitemap.xml`, and `robots.txt`.
//!
//! # Modules
//!
//! - [`template`] - lightweight string-interpolation templates
//! - [`html`] - standalone HTML document assembly
//! - [`sitemap`] - XML sitemap generation
//! - [`robots`] - robots.txt generation
//! - [`export`] - export orchestration

pub mod export;
pub mod html;
pub mod robots;
pub mod sitemap;
pub mod template;

pub use export::{ExportError, ExportStats, Exporter, page_file_name};
pub use html::{HtmlRenderer, escape_html};
pub use robots::robots_txt;
pub use sitemap::sitemap_xml;
pub use template::{Template, TemplateContext};
