//! Embedded live preview server.
//!
//! Renders the in-memory site store per request, so auto-posted articles
//! show up on the next page load. The preview has its own lightweight
//! chrome but renders content through the same parsed blocks as the
//! exporter, so heading anchors match the exported files exactly.

use std::{path::PathBuf, sync::Arc};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use seoforge_core::{Article, Page, SiteDocument, SiteStore};
use seoforge_generator::{Exporter, escape_html};
use seoforge_parser::{Block, parse, toc};
use seoforge_scheduler::{AutoPoster, Phase, SchedulerStatus};
use serde::Serialize;

/// Shared state of the preview server.
#[derive(Clone)]
pub struct AppState {
    /// Live site document.
    pub store: SiteStore,
    /// The session's auto-poster, for status display.
    pub poster: Arc<AutoPoster>,
    /// Exporter used by `POST /export`.
    pub exporter: Arc<Exporter>,
    /// Where `POST /export` writes the file set.
    pub output_dir: PathBuf,
}

/// Create the preview router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/about", get(about))
        .route("/blog", get(blog))
        .route("/articles/{slug}", get(article))
        .route("/status", get(status))
        .route("/export", post(export))
        .with_state(state)
}

async fn home(State(state): State<AppState>) -> Response {
    render_route(&state, "/")
}

async fn about(State(state): State<AppState>) -> Response {
    render_route(&state, "/about")
}

async fn blog(State(state): State<AppState>) -> Response {
    render_route(&state, "/blog")
}

async fn article(Path(slug): Path<String>, State(state): State<AppState>) -> Response {
    let Some(document) = state.store.snapshot() else {
        return no_site();
    };
    let found = document
        .blog_page()
        .and_then(|blog| blog.articles.iter().find(|a| a.slug == slug));
    match found {
        Some(article) => {
            Html(article_view(&document, article, &state.poster.status())).into_response()
        }
        None => (StatusCode::NOT_FOUND, Html(message_page("Article not found"))).into_response(),
    }
}

async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let status = state.poster.status();
    Json(StatusResponse {
        phase: phase_name(status.phase),
        last_status: status.last_status,
    })
}

async fn export(State(state): State<AppState>) -> Response {
    let Some(document) = state.store.snapshot() else {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "no site has been generated".to_string(),
            }),
        )
            .into_response();
    };

    let exporter = Arc::clone(&state.exporter);
    let output_dir = state.output_dir.clone();
    let result =
        tokio::task::spawn_blocking(move || exporter.export(&document, &output_dir)).await;

    match result {
        Ok(Ok(stats)) => Json(ExportResponse {
            pages: stats.pages,
            articles: stats.articles,
            output_dir: state.output_dir.display().to_string(),
        })
        .into_response(),
        Ok(Err(err)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: err.to_string(),
            }),
        )
            .into_response(),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: err.to_string(),
            }),
        )
            .into_response(),
    }
}

#[derive(Debug, Serialize)]
struct StatusResponse {
    phase: &'static str,
    last_status: Option<String>,
}

#[derive(Debug, Serialize)]
struct ExportResponse {
    pages: usize,
    articles: usize,
    output_dir: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn phase_name(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "idle",
        Phase::Running => "running",
        Phase::StoppedOnError => "stopped-on-error",
    }
}

fn render_route(state: &AppState, path: &str) -> Response {
    let Some(document) = state.store.snapshot() else {
        return no_site();
    };
    match document.page(path) {
        Some(page) => Html(page_view(&document, page, &state.poster.status())).into_response(),
        None => (StatusCode::NOT_FOUND, Html(message_page("Page not found"))).into_response(),
    }
}

fn no_site() -> Response {
    (
        StatusCode::NOT_FOUND,
        Html(message_page("No site has been generated yet")),
    )
        .into_response()
}

/// Render a page route, with article links on the blog page.
fn page_view(document: &SiteDocument, page: &Page, status: &SchedulerStatus) -> String {
    let mut body = String::new();
    if page.is_blog() {
        body.push_str(&article_list(page));
    }
    body.push_str(&preview_blocks(&parse(&page.content)));
    chrome(document, &page.title, &body, status)
}

/// Render an article route with its meta description and contents box.
fn article_view(document: &SiteDocument, article: &Article, status: &SchedulerStatus) -> String {
    let mut body = String::new();
    body.push_str(r#"<p class="back"><a href="/blog">&larr; Back to the blog</a></p>"#);
    body.push_str(&format!(
        r#"<p class="meta">{}</p>"#,
        escape_html(&article.meta_description)
    ));

    let entries = toc(&article.content);
    if !entries.is_empty() {
        body.push_str("<div class=\"toc\"><strong>Contents</strong><ul>");
        for entry in &entries {
            body.push_str(&format!(
                r##"<li class="toc-level-{}"><a href="#{}">{}</a></li>"##,
                entry.level,
                entry.id,
                escape_html(&entry.text)
            ));
        }
        body.push_str("</ul></div>");
    }

    body.push_str(&preview_blocks(&parse(&article.content)));
    chrome(document, &article.title, &body, status)
}

/// The blog page's article links, newest first.
fn article_list(blog: &Page) -> String {
    let mut html = String::from("<div class=\"articles\">\n");
    for article in &blog.articles {
        html.push_str(&format!(
            "<a class=\"article-link\" href=\"/articles/{}\">\n\
             <strong>{}</strong>\n\
             <span>{}</span>\n\
             </a>\n",
            article.slug,
            escape_html(&article.title),
            escape_html(&article.meta_description)
        ));
    }
    html.push_str("</div>\n");
    html
}

/// Render parsed blocks for the preview.
///
/// Same block sequence as the static renderer, so heading identifiers are
/// identical; blank lines become an explicit spacer here.
#[must_use]
pub fn preview_blocks(blocks: &[Block]) -> String {
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
            Block::Blank => html.push_str("<div class=\"spacer\"></div>\n"),
            Block::ListItem(_) => {}
        }
    }
    if in_list {
        html.push_str("</ul>\n");
    }

    html
}

/// Preview page chrome: top bar, navigation, status strip, content frame.
fn chrome(document: &SiteDocument, title: &str, body: &str, status: &SchedulerStatus) -> String {
    let accent = document.theme_color.hex();
    let status_line = match &status.last_status {
        Some(message) => format!(
            "auto-post {}: {}",
            phase_name(status.phase),
            escape_html(message)
        ),
        None => format!("auto-post {}", phase_name(status.phase)),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title} - {site_name} (preview)</title>
<style>
body {{ margin: 0; font-family: -apple-system, 'Segoe UI', Roboto, sans-serif; background: #f1f5f9; color: #0f172a; }}
.topbar {{ background: #0f172a; color: white; padding: 0.75rem 1.5rem; display: flex; align-items: center; gap: 1.5rem; }}
.topbar .logo {{ font-weight: bold; color: {accent}; text-decoration: none; }}
.topbar a {{ color: #e2e8f0; text-decoration: none; }}
.statusbar {{ background: #e2e8f0; color: #334155; font-size: 0.8rem; padding: 0.25rem 1.5rem; }}
.frame {{ max-width: 760px; margin: 2rem auto; background: white; border-radius: 0.5rem; padding: 2rem; box-shadow: 0 1px 3px rgba(0,0,0,0.1); }}
.frame h1 {{ margin-top: 0; }}
.frame h2, .frame h3 {{ color: {accent}; }}
.spacer {{ height: 0.75rem; }}
.meta {{ color: #64748b; font-style: italic; }}
.toc ul {{ list-style: none; padding-left: 0; }}
.toc .toc-level-3 {{ margin-left: 1rem; }}
.toc a {{ color: {accent}; text-decoration: none; }}
.articles {{ display: grid; gap: 1rem; margin: 1rem 0; }}
.article-link {{ display: block; border: 1px solid #e2e8f0; border-radius: 0.5rem; padding: 1rem; text-decoration: none; color: inherit; }}
.article-link strong {{ color: {accent}; display: block; }}
.back a {{ color: {accent}; text-decoration: none; }}
</style>
</head>
<body>
<div class="topbar">
<a class="logo" href="/">{site_name}</a>
{nav}
</div>
<div class="statusbar">{status_line}</div>
<main class="frame">
<h1>{title}</h1>
{body}
</main>
</body>
</html>
"#,
        title = escape_html(title),
        site_name = escape_html(&document.site_name),
        nav = nav(document),
        status_line = status_line,
        body = body,
        accent = accent,
    )
}

fn nav(document: &SiteDocument) -> String {
    document
        .pages
        .iter()
        .map(|page| format!(r#"<a href="{}">{}</a>"#, page.path, escape_html(&page.title)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn message_page(message: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"UTF-8\"><title>seoforge</title></head>\n\
         <body style=\"font-family: sans-serif; padding: 3rem; color: #334155;\">\n\
         <h1>{}</h1>\n\
         <p>Generate a site with <code>seoforge serve</code> and reload.</p>\n\
         </body></html>\n",
        escape_html(message)
    )
}
