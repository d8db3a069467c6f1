//! XML sitemap generation.

use seoforge_core::SiteDocument;
use tracing::debug;

/// Priority given to page entries.
const PAGE_PRIORITY: f32 = 0.8;

/// Priority given to article entries.
const ARTICLE_PRIORITY: f32 = 0.6;

/// Generate `sitemap.xml` for a document.
///
/// One `<url>` per page (base URL for `/`, base URL + path + `.html`
/// otherwise) followed by one per article (base URL +
/// `/articles/<slug>.html`), in document order.
#[must_use]
pub fn sitemap_xml(base_url: &str, document: &SiteDocument) -> String {
    let mut urls = Vec::new();

    for page in &document.pages {
        let loc = if page.path == "/" {
            base_url.to_string()
        } else {
            format!("{base_url}{}.html", page.path)
        };
        urls.push(url_entry(&loc, PAGE_PRIORITY));
    }

    if let Some(blog) = document.blog_page() {
        for article in &blog.articles {
            let loc = format!("{base_url}/articles/{}.html", article.slug);
            urls.push(url_entry(&loc, ARTICLE_PRIORITY));
        }
    }

    debug!(entries = urls.len(), "generated sitemap");

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n\
         {}\n\
         </urlset>\n",
        urls.join("\n")
    )
}

fn url_entry(loc: &str, priority: f32) -> String {
    format!(
        "  <url>\n    <loc>{}</loc>\n    <changefreq>weekly</changefreq>\n    <priority>{priority:.1}</priority>\n  </url>",
        escape_xml(loc)
    )
}

/// Escape text for XML content.
fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
