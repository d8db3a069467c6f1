//! Standalone HTML document assembly.
//!
//! Every exported file is a complete page: header with site name and
//! navigation, the rendered body, and a footer, with the stylesheet
//! inlined so each file is independently viewable.

use chrono::{Datelike, Utc};
use seoforge_core::{Article, Page, SiteDocument};
use seoforge_parser::{Block, parse, toc};

use crate::export::page_file_name;
use crate::template::{Result, Template, TemplateContext};

/// Renders a site document's pages and articles as standalone HTML files.
#[derive(Debug)]
pub struct HtmlRenderer<'a> {
    document: &'a SiteDocument,
    base: Template,
}

impl<'a> HtmlRenderer<'a> {
    /// Create a renderer for one document.
    #[must_use]
    pub fn new(document: &'a SiteDocument) -> Self {
        Self {
            document,
            base: Template::new(BASE_TEMPLATE),
        }
    }

    /// Render a page file (`index.html`, `about.html`, or `blog.html`).
    ///
    /// The blog page gets a grid of article cards above its intro content.
    pub fn page(&self, page: &Page) -> Result<String> {
        let mut body = String::new();
        if page.is_blog() {
            body.push_str(&self.article_cards(page));
        }
        body.push_str(&render_blocks(&parse(&page.content)));

        let context = self
            .base_context(
                &page.title,
                &format!("{} - {}", self.document.site_name, page.title),
                "",
            )
            .with_var("body", body);
        self.base.render(&context)
    }

    /// Render an article file (`articles/<slug>.html`).
    ///
    /// Article files live one directory down, so header links are prefixed
    /// with `../`.
    pub fn article(&self, article: &Article) -> Result<String> {
        let mut context = self
            .base_context(&article.title, &article.meta_description, "../")
            .with_var("body", render_blocks(&parse(&article.content)))
            .with_var(
                "back_link",
                r#"<a href="../blog.html" class="back-link">&larr; Back to the blog</a>"#,
            )
            .with_var(
                "article_meta",
                format!(
                    r#"<div class="article-meta">{}</div>"#,
                    escape_html(&article.meta_description)
                ),
            )
            .with_var("divider", "<hr>");
        if let Some(toc_html) = self.toc_html(article) {
            context.insert("toc", toc_html);
        }
        self.base.render(&context)
    }

    fn base_context(&self, title: &str, meta_description: &str, root: &str) -> TemplateContext {
        TemplateContext::new()
            .with_var("site_name", escape_html(&self.document.site_name))
            .with_var("title", escape_html(title))
            .with_var("meta_description", escape_html(meta_description))
            .with_var("primary_color", self.document.theme_color.hex())
            .with_var("nav", self.nav(root))
            .with_var("year", Utc::now().year().to_string())
            .with_var("root", root)
    }

    /// Navigation links to the three fixed pages, in document order.
    fn nav(&self, root: &str) -> String {
        self.document
            .pages
            .iter()
            .map(|page| {
                format!(
                    r#"<a href="{root}{}">{}</a>"#,
                    page_file_name(&page.path),
                    escape_html(&page.title)
                )
            })
            .collect::<Vec<_>>()
            .join("\n                ")
    }

    /// The blog index's article cards, newest first.
    fn article_cards(&self, blog: &Page) -> String {
        let cards = blog
            .articles
            .iter()
            .map(|article| {
                format!(
                    "<a class=\"card\" href=\"articles/{}.html\">\n\
                     <h3>{}</h3>\n\
                     <p>{}</p>\n\
                     <span>Read article &rarr;</span>\n\
                     </a>",
                    article.slug,
                    escape_html(&article.title),
                    escape_html(&article.meta_description)
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        format!("<div class=\"card-grid\">\n{cards}\n</div>\n")
    }

    /// Table of contents box, or `None` when the article has no headings.
    fn toc_html(&self, article: &Article) -> Option<String> {
        let entries = toc(&article.content);
        if entries.is_empty() {
            return None;
        }

        let items = entries
            .iter()
            .map(|entry| {
                format!(
                    r##"<li class="toc-level-{}"><a href="#{}">{}</a></li>"##,
                    entry.level,
                    entry.id,
                    escape_html(&entry.text)
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        Some(format!(
            "<div class=\"toc\">\n<h3>Contents</h3>\n<ul>\n{items}\n</ul>\n</div>"
        ))
    }
}

/// Render parsed blocks as static HTML.
///
/// Consecutive list items are grouped into one `<ul>`; blank lines close
/// an open list and otherwise render nothing (paragraph spacing comes from
/// the stylesheet).
#[must_use]
pub fn render_blocks(blocks: &[Block]) -> String {
    let mut html = String::new();
    let mut in_list = false;

    for block in blocks {
        if let Block::ListItem(text) = block {
            if !in_list {
                html.push_str("<ul>\n");
                in_list = true;
            }
            html.push_str(&format!("<li>{}</li>\n", escape_html(text)));
            continue;
        }
        if in_list {
            html.push_str("</ul>\n");
            in_list = false;
        }
        match block {
            Block::Heading { level, text, id } => {
                html.push_str(&format!(
                    "<h{level} id=\"{id}\">{}</h{level}>\n",
                    escape_html(text)
                ));
            }
            Block::Paragraph(text) => {
                html.push_str(&format!("<p>{}</p>\n", escape_html(text)));
            }
            Block::Blank | Block::ListItem(_) => {}
        }
    }
    if in_list {
        html.push_str("</ul>\n");
    }

    html
}

/// Escape text for HTML element and attribute content.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Base document template; `root` is empty for page files and `../` for
/// article files so header links resolve from either directory.
const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ title }} - {{ site_name }}</title>
    <meta name="description" content="{{ meta_description }}">
    <style>
        * {
            margin: 0;
            padding: 0;
            box-sizing: border-box;
        }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif;
            line-height: 1.6;
            color: #1f2937;
            background-color: #f9fafb;
        }
        .container {
            max-width: 1200px;
            margin: 0 auto;
            padding: 0 1rem;
        }
        header {
            background-color: white;
            box-shadow: 0 1px 3px rgba(0, 0, 0, 0.1);
            position: sticky;
            top: 0;
        }
        .header-content {
            display: flex;
            justify-content: space-between;
            align-items: center;
            padding: 1rem 0;
        }
        .logo {
            font-size: 1.5rem;
            font-weight: bold;
            color: {{ primary_color }};
            text-decoration: none;
        }
        nav {
            display: flex;
            gap: 1rem;
        }
        nav a {
            padding: 0.5rem 1rem;
            border-radius: 0.375rem;
            text-decoration: none;
            font-weight: 500;
            color: #4b5563;
            background-color: #f3f4f6;
        }
        nav a:hover {
            background-color: #e5e7eb;
        }
        main {
            padding: 2rem 0;
            min-height: calc(100vh - 200px);
        }
        .content {
            background-color: white;
            padding: 2rem;
            border-radius: 0.5rem;
            box-shadow: 0 1px 3px rgba(0, 0, 0, 0.1);
            max-width: 800px;
            margin: 0 auto;
        }
        .content h1 {
            font-size: 2.5rem;
            font-weight: bold;
            margin-bottom: 1rem;
            color: #111827;
        }
        .content-body h2 {
            font-size: 1.875rem;
            font-weight: bold;
            margin-top: 2rem;
            margin-bottom: 1rem;
            padding-bottom: 0.5rem;
            border-bottom: 2px solid #e5e7eb;
        }
        .content-body h3 {
            font-size: 1.5rem;
            font-weight: bold;
            margin-top: 1.5rem;
            margin-bottom: 0.75rem;
        }
        .content-body p {
            margin: 0.75rem 0;
            line-height: 1.625;
        }
        .content-body ul {
            margin: 1rem 0;
            padding-left: 1.5rem;
        }
        .content-body li {
            margin-left: 1.25rem;
            list-style-type: disc;
        }
        .back-link {
            display: inline-block;
            margin-bottom: 1.5rem;
            color: {{ primary_color }};
            text-decoration: none;
            font-size: 0.875rem;
        }
        .back-link:hover {
            text-decoration: underline;
        }
        .article-meta {
            color: #6b7280;
            font-style: italic;
            margin-bottom: 1.5rem;
        }
        .toc {
            margin: 1.5rem 0 2rem;
            padding: 1rem;
            background-color: #f8fafc;
            border-radius: 0.5rem;
            border: 1px solid #e2e8f0;
        }
        .toc h3 {
            font-weight: bold;
            font-size: 1.125rem;
            margin-bottom: 0.75rem;
            padding-bottom: 0.5rem;
            border-bottom: 1px solid #cbd5e1;
        }
        .toc ul {
            margin: 0;
            padding: 0;
            list-style: none;
        }
        .toc a {
            color: {{ primary_color }};
            text-decoration: none;
            font-size: 0.875rem;
        }
        .toc-level-3 {
            margin-left: 1rem;
        }
        .card-grid {
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(300px, 1fr));
            gap: 2rem;
            margin: 2rem 0;
        }
        .card {
            display: block;
            background-color: white;
            padding: 1.5rem;
            border-radius: 0.75rem;
            box-shadow: 0 4px 6px rgba(0, 0, 0, 0.05);
            border: 1px solid #e5e7eb;
            text-decoration: none;
        }
        .card:hover {
            box-shadow: 0 10px 15px rgba(0, 0, 0, 0.1);
        }
        .card h3 {
            font-size: 1.25rem;
            font-weight: bold;
            color: {{ primary_color }};
            margin-bottom: 0.5rem;
        }
        .card p {
            font-size: 0.875rem;
            color: #6b7280;
            margin: 0.5rem 0 1rem 0;
        }
        .card span {
            font-size: 0.875rem;
            font-weight: 600;
            color: {{ primary_color }};
        }
        footer {
            background-color: #374151;
            color: white;
            text-align: center;
            padding: 2rem 0;
            margin-top: 3rem;
        }
        @media (max-width: 768px) {
            .content {
                padding: 1rem;
            }
            .header-content {
                flex-direction: column;
                gap: 1rem;
            }
        }
    </style>
</head>
<body>
    <header>
        <div class="container">
            <div class="header-content">
                <a href="{{ root }}index.html" class="logo">{{ site_name }}</a>
                <nav>
                {{ nav }}
                </nav>
            </div>
        </div>
    </header>
    <main>
        <div class="container">
            <div class="content">
                {{ back_link? }}
                <h1>{{ title }}</h1>
                {{ article_meta? }}
                {{ toc? }}
                {{ divider? }}
                <div class="content-body">
{{ body }}
                </div>
            </div>
        </div>
    </main>
    <footer>
        <div class="container">
            <p>&copy; {{ year }} {{ site_name }}. All rights reserved.</p>
        </div>
    </footer>
</body>
</html>
"##;
