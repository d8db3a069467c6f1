//! End-to-end tests: generate a site through the provider boundary, run
//! the auto-poster against it, and export the static file set.

use std::{
    collections::HashSet,
    fs,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use seoforge_core::{Article, SiteDocument, SiteStore};
use seoforge_generator::Exporter;
use seoforge_provider::{ContentProvider, ProviderError, Result as ProviderResult, validate};
use seoforge_scheduler::{AutoPoster, Phase};

const INTERVAL: Duration = Duration::from_secs(8 * 60 * 60);

/// Provider stub that answers with a canned site payload, exercising the
/// same validation path as the real adapter.
struct StubProvider {
    fail_articles: bool,
    article_calls: AtomicUsize,
}

impl StubProvider {
    fn new(fail_articles: bool) -> Self {
        Self {
            fail_articles,
            article_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ContentProvider for StubProvider {
    async fn create_site(
        &self,
        _site_name: &str,
        _site_keywords: &str,
    ) -> ProviderResult<SiteDocument> {
        let raw: validate::RawSite = serde_json::from_str(SITE_PAYLOAD).expect("payload parses");
        validate::site_document(raw)
    }

    async fn create_articles(
        &self,
        _article_keywords: &str,
        exclude_titles: &[String],
    ) -> ProviderResult<Vec<Article>> {
        self.article_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_articles {
            return Err(ProviderError::EmptyResponse);
        }
        Ok((0..3)
            .map(|i| Article {
                slug: format!("new-post-{i}"),
                title: format!("New Post {i} (avoiding {} titles)", exclude_titles.len()),
                content: "## Fresh Angle\n\nText.".to_string(),
                meta_description: "Something new.".to_string(),
            })
            .collect())
    }
}

const SITE_PAYLOAD: &str = r####"{
    "siteName": "Eco Living",
    "themeColor": "green",
    "pages": [
        {
            "path": "/",
            "title": "Home",
            "content": "## Welcome\n\nLive sustainably.",
            "articles": []
        },
        {
            "path": "/about",
            "title": "About",
            "content": "We write about sustainable lifestyles.",
            "articles": []
        },
        {
            "path": "/blog",
            "title": "Blog",
            "content": "Ideas for greener living.",
            "articles": [
                {
                    "slug": "composting-basics",
                    "title": "Composting Basics",
                    "content": "## Getting Started\n\n* a bin\n* patience",
                    "metaDescription": "How to start composting at home."
                },
                {
                    "slug": "solar-myths",
                    "title": "Solar Myths",
                    "content": "## Myth One\n\nIt never pays off.",
                    "metaDescription": "Debunking common solar myths."
                },
                {
                    "slug": "zero-waste-kitchen",
                    "title": "Zero Waste Kitchen",
                    "content": "### Small Swaps\n\n* jars\n* cloth",
                    "metaDescription": "Kitchen habits that cut waste."
                }
            ]
        }
    ]
}"####;

#[tokio::test]
async fn test_generated_site_satisfies_invariants() {
    let provider = StubProvider::new(false);
    let document = provider
        .create_site("Eco Living", "sustainability, lifestyle")
        .await
        .expect("site generates");

    assert_eq!(document.site_name, "Eco Living");
    let paths: Vec<&str> = document.pages.iter().map(|p| p.path.as_str()).collect();
    assert_eq!(paths, vec!["/", "/about", "/blog"]);

    let blog = document.blog_page().expect("blog page");
    assert_eq!(blog.articles.len(), 3);
    let slugs: HashSet<&str> = blog.articles.iter().map(|a| a.slug.as_str()).collect();
    assert_eq!(slugs.len(), 3);
    assert!(blog.articles.iter().all(|a| !a.slug.is_empty()));
}

#[tokio::test]
async fn test_exported_file_set_is_exact() {
    let provider = StubProvider::new(false);
    let document = provider
        .create_site("Eco Living", "sustainability, lifestyle")
        .await
        .expect("site generates");

    let dir = tempfile::tempdir().expect("temp dir");
    let out = dir.path().join("site");
    Exporter::new("https://eco.example")
        .export(&document, &out)
        .expect("export");

    let mut top: Vec<String> = fs::read_dir(&out)
        .expect("read out dir")
        .map(|e| e.expect("entry").file_name().to_string_lossy().into_owned())
        .collect();
    top.sort();
    assert_eq!(
        top,
        vec![
            "about.html",
            "articles",
            "blog.html",
            "index.html",
            "robots.txt",
            "sitemap.xml",
        ]
    );

    let mut articles: Vec<String> = fs::read_dir(out.join("articles"))
        .expect("read articles dir")
        .map(|e| e.expect("entry").file_name().to_string_lossy().into_owned())
        .collect();
    articles.sort();
    assert_eq!(
        articles,
        vec![
            "composting-basics.html",
            "solar-myths.html",
            "zero-waste-kitchen.html",
        ]
    );

    let sitemap = fs::read_to_string(out.join("sitemap.xml")).expect("read sitemap");
    assert_eq!(sitemap.matches("<url>").count(), 6);
    let robots = fs::read_to_string(out.join("robots.txt")).expect("read robots");
    assert!(robots.contains("Sitemap: https://eco.example/sitemap.xml"));
}

#[tokio::test(start_paused = true)]
async fn test_autopost_then_reexport_grows_the_site() {
    let provider: Arc<dyn ContentProvider> = Arc::new(StubProvider::new(false));
    let document = provider
        .create_site("Eco Living", "sustainability, lifestyle")
        .await
        .expect("site generates");

    let store = SiteStore::new();
    store.replace(document);

    let poster = AutoPoster::new(Arc::clone(&provider), store.clone(), INTERVAL);
    poster.start("sustainability");
    tokio::time::sleep(Duration::from_millis(10)).await;

    let merged = store.snapshot().expect("document");
    let blog = merged.blog_page().expect("blog page");
    assert_eq!(blog.articles.len(), 6);
    // Newest first: the auto-posted batch sits in front of the originals.
    assert_eq!(blog.articles[0].slug, "new-post-0");
    assert_eq!(blog.articles[3].slug, "composting-basics");

    let dir = tempfile::tempdir().expect("temp dir");
    let out = dir.path().join("site");
    Exporter::new("https://eco.example")
        .export(&merged, &out)
        .expect("export");

    let sitemap = fs::read_to_string(out.join("sitemap.xml")).expect("read sitemap");
    assert_eq!(sitemap.matches("<url>").count(), 9);

    poster.stop();
}

#[tokio::test(start_paused = true)]
async fn test_failed_tick_stops_scheduler_until_restart() {
    let good: Arc<dyn ContentProvider> = Arc::new(StubProvider::new(false));
    let document = good
        .create_site("Eco Living", "sustainability, lifestyle")
        .await
        .expect("site generates");

    let store = SiteStore::new();
    store.replace(document);

    let failing = Arc::new(StubProvider::new(true));
    let poster = AutoPoster::new(failing.clone(), store.clone(), INTERVAL);
    poster.start("sustainability");
    tokio::time::sleep(Duration::from_millis(10)).await;

    let status = poster.status();
    assert_eq!(status.phase, Phase::StoppedOnError);
    assert!(status.last_status.expect("status message").contains("error"));
    // The document kept its original articles.
    assert_eq!(
        store
            .snapshot()
            .expect("document")
            .blog_page()
            .expect("blog page")
            .articles
            .len(),
        3
    );

    // No further ticks happen on their own after the failure.
    tokio::time::sleep(INTERVAL * 2).await;
    assert_eq!(failing.article_calls.load(Ordering::SeqCst), 1);

    // A manual restart re-arms the timer and runs a fresh cycle.
    poster.start("sustainability");
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(failing.article_calls.load(Ordering::SeqCst), 2);
    assert_eq!(poster.status().phase, Phase::StoppedOnError);
}
