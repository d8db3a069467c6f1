//! URL-safe identifier derivation.

/// Derive a URL-safe identifier from arbitrary text.
///
/// Lower-cases the input, collapses whitespace runs into single hyphens,
/// and strips every character outside `[a-z0-9_-]`. The transform is
/// idempotent: `slugify(slugify(x)) == slugify(x)`.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for c in text.trim().chars() {
        if c.is_whitespace() {
            // Collapse runs; never emit a leading hyphen.
            pending_hyphen = !slug.is_empty();
            continue;
        }
        for lc in c.to_lowercase() {
            if lc.is_ascii_lowercase() || lc.is_ascii_digit() || lc == '_' || lc == '-' {
                if pending_hyphen {
                    slug.push('-');
                    pending_hyphen = false;
                }
                slug.push(lc);
            }
        }
    }

    slug
}
