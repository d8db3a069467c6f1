//! robots.txt generation.

/// Generate `robots.txt`: allow all crawling, point at the sitemap.
#[must_use]
pub fn robots_txt(base_url: &str) -> String {
    format!("User-agent: *\nAllow: /\n\nSitemap: {base_url}/sitemap.xml\n")
}
