//! Response schemas sent with each generation request.
//!
//! The provider is asked for JSON output constrained by these schemas
//! (Gemini's `generationConfig.responseSchema` format, with uppercase type
//! names).

use seoforge_core::ThemeColor;
use serde_json::{Value, json};

/// Schema for a complete site document.
#[must_use]
pub fn site() -> Value {
    let themes: Vec<&str> = ThemeColor::ALL.iter().map(ThemeColor::name).collect();
    json!({
        "type": "OBJECT",
        "properties": {
            "siteName": {
                "type": "STRING",
                "description": "The name of the website."
            },
            "themeColor": {
                "type": "STRING",
                "enum": themes,
                "description": "A theme color for the website design, chosen from the provided list."
            },
            "pages": {
                "type": "ARRAY",
                "description": "An array of pages for the website. Must include Home, About, and Blog.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "path": {
                            "type": "STRING",
                            "description": "URL path, e.g., \"/\" for home, \"/about\", \"/blog\"."
                        },
                        "title": {
                            "type": "STRING",
                            "description": "The title of the page."
                        },
                        "content": {
                            "type": "STRING",
                            "description": "Page content in Markdown format. For the blog page, this should be an introduction to the blog."
                        },
                        "articles": {
                            "type": "ARRAY",
                            "description": "Only for the blog page (path: \"/blog\"). Other pages must have an empty array. Generate 3 initial articles.",
                            "items": article_schema()
                        }
                    },
                    "required": ["path", "title", "content", "articles"]
                }
            }
        },
        "required": ["siteName", "themeColor", "pages"]
    })
}

/// Schema for a batch of three new articles.
#[must_use]
pub fn articles() -> Value {
    json!({
        "type": "ARRAY",
        "description": "An array of 3 new blog articles.",
        "items": article_schema()
    })
}

fn article_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "slug": {
                "type": "STRING",
                "description": "A URL-friendly slug for the article based on its title (e.g., \"my-first-post\")."
            },
            "title": {
                "type": "STRING",
                "description": "The title of the article."
            },
            "content": {
                "type": "STRING",
                "description": "Article content in Markdown format, well-structured with headings (e.g., ## Title) and lists (e.g., * item)."
            },
            "metaDescription": {
                "type": "STRING",
                "description": "A short, SEO-friendly summary of the article, around 150 characters."
            }
        },
        "required": ["slug", "title", "content", "metaDescription"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_schema_shape() {
        let schema = site();
        assert_eq!(schema["type"], "OBJECT");
        assert_eq!(
            schema["required"],
            json!(["siteName", "themeColor", "pages"])
        );
        assert_eq!(
            schema["properties"]["themeColor"]["enum"],
            json!(["blue", "green", "purple", "red", "indigo"])
        );
    }

    #[test]
    fn test_articles_schema_requires_all_fields() {
        let schema = articles();
        assert_eq!(schema["type"], "ARRAY");
        assert_eq!(
            schema["items"]["required"],
            json!(["slug", "title", "content", "metaDescription"])
        );
    }
}
