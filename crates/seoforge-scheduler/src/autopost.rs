//! The auto-post scheduler.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::time::Duration;

use parking_lot::Mutex;
use seoforge_core::{MergeOutcome, SiteStore};
use seoforge_provider::{ContentProvider, EXPECTED_ARTICLE_COUNT, ProviderError};
use tokio::{
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tracing::{info, warn};

/// Scheduler phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No timer armed.
    Idle,
    /// Timer armed, cycles running.
    Running,
    /// A cycle failed; the timer was cancelled and will not re-arm itself.
    StoppedOnError,
}

/// Snapshot of the scheduler state for status displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerStatus {
    /// Current phase.
    pub phase: Phase,
    /// Human-readable outcome of the most recent cycle, if any.
    pub last_status: Option<String>,
}

#[derive(Debug)]
struct Shared {
    phase: Phase,
    last_status: Option<String>,
}

/// A live timer task together with its cancellation flag.
struct Runner {
    task: JoinHandle<()>,
    cancelled: Arc<AtomicBool>,
}

/// Owns the repeating auto-post timer.
///
/// The timer task is held inside the instance, never in global state, so
/// independent posters (one per generation session, several under test) do
/// not interfere. Dropping the poster cancels its timer.
pub struct AutoPoster {
    provider: Arc<dyn ContentProvider>,
    store: SiteStore,
    interval: Duration,
    shared: Arc<Mutex<Shared>>,
    runner: Mutex<Option<Runner>>,
}

impl AutoPoster {
    /// Create an idle poster.
    #[must_use]
    pub fn new(provider: Arc<dyn ContentProvider>, store: SiteStore, interval: Duration) -> Self {
        Self {
            provider,
            store,
            interval,
            shared: Arc::new(Mutex::new(Shared {
                phase: Phase::Idle,
                last_status: None,
            })),
            runner: Mutex::new(None),
        }
    }

    /// Start auto-posting with the given article keywords.
    ///
    /// Runs one cycle immediately, then repeats every interval. Calling
    /// `start` while running cancels the existing timer first; at most one
    /// timer is ever armed.
    pub fn start(&self, article_keywords: impl Into<String>) {
        let keywords = article_keywords.into();
        self.cancel_runner();

        {
            let mut shared = self.shared.lock();
            shared.phase = Phase::Running;
            shared.last_status = None;
        }

        let cancelled = Arc::new(AtomicBool::new(false));
        let task = tokio::spawn(run_loop(
            Arc::clone(&self.provider),
            self.store.clone(),
            keywords,
            self.interval,
            Arc::clone(&self.shared),
            Arc::clone(&cancelled),
        ));
        *self.runner.lock() = Some(Runner { task, cancelled });
        info!(interval = ?self.interval, "auto-posting started");
    }

    /// Stop auto-posting. Idempotent; clears the status.
    pub fn stop(&self) {
        self.cancel_runner();
        let mut shared = self.shared.lock();
        shared.phase = Phase::Idle;
        shared.last_status = None;
    }

    /// Current phase and last cycle status.
    #[must_use]
    pub fn status(&self) -> SchedulerStatus {
        let shared = self.shared.lock();
        SchedulerStatus {
            phase: shared.phase,
            last_status: shared.last_status.clone(),
        }
    }

    fn cancel_runner(&self) {
        if let Some(runner) = self.runner.lock().take() {
            runner.cancelled.store(true, Ordering::SeqCst);
            runner.task.abort();
            info!("auto-post timer cancelled");
        }
    }
}

impl Drop for AutoPoster {
    fn drop(&mut self) {
        self.cancel_runner();
    }
}

enum CycleOutcome {
    Merged { added: usize },
    Discarded,
    Failed(ProviderError),
}

async fn run_loop(
    provider: Arc<dyn ContentProvider>,
    store: SiteStore,
    keywords: String,
    interval: Duration,
    shared: Arc<Mutex<Shared>>,
    cancelled: Arc<AtomicBool>,
) {
    let mut ticker = time::interval(interval);
    // A cycle slower than the interval delays the next tick instead of
    // stacking a second concurrent merge.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        match run_cycle(provider.as_ref(), &store, &keywords, &cancelled, &shared).await {
            CycleOutcome::Merged { added } => {
                let mut shared = shared.lock();
                shared.last_status = Some(format!(
                    "Added {added} new articles. Next auto-post in {}.",
                    interval_phrase(interval)
                ));
            }
            CycleOutcome::Discarded => {
                warn!("auto-post cycle discarded; stopping");
                let mut shared = shared.lock();
                shared.phase = Phase::Idle;
                shared.last_status =
                    Some("Auto-post result discarded; the site was replaced.".to_string());
                return;
            }
            CycleOutcome::Failed(err) => {
                warn!(error = %err, "auto-post cycle failed; stopping");
                let mut shared = shared.lock();
                shared.phase = Phase::StoppedOnError;
                shared.last_status = Some(format!("Auto-posting stopped after an error: {err}"));
                return;
            }
        }
    }
}

/// One fetch-and-merge cycle.
async fn run_cycle(
    provider: &dyn ContentProvider,
    store: &SiteStore,
    keywords: &str,
    cancelled: &AtomicBool,
    shared: &Mutex<Shared>,
) -> CycleOutcome {
    shared.lock().last_status = Some(format!(
        "Generating {EXPECTED_ARTICLE_COUNT} new articles..."
    ));

    let Some(snapshot) = store.blog_snapshot() else {
        return CycleOutcome::Discarded;
    };

    let result = provider.create_articles(keywords, &snapshot.titles).await;

    // The poster may have been stopped while the request was in flight;
    // its result must not touch the store.
    if cancelled.load(Ordering::SeqCst) {
        return CycleOutcome::Discarded;
    }

    match result {
        Ok(articles) => match store.merge_articles(snapshot.generation, articles) {
            MergeOutcome::Merged { added, renamed } => {
                if renamed > 0 {
                    warn!(renamed, "renamed colliding article slugs during merge");
                }
                info!(added, "auto-post cycle merged new articles");
                CycleOutcome::Merged { added }
            }
            MergeOutcome::Stale | MergeOutcome::NoDocument => CycleOutcome::Discarded,
        },
        Err(err) => CycleOutcome::Failed(err),
    }
}

/// Human-readable interval for status messages.
fn interval_phrase(interval: Duration) -> String {
    let secs = interval.as_secs();
    if secs >= 3600 && secs % 3600 == 0 {
        let hours = secs / 3600;
        if hours == 1 {
            "1 hour".to_string()
        } else {
            format!("{hours} hours")
        }
    } else {
        let minutes = (secs / 60).max(1);
        if minutes == 1 {
            "1 minute".to_string()
        } else {
            format!("{minutes} minutes")
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use async_trait::async_trait;
    use seoforge_core::{Article, Page, SiteDocument, ThemeColor};
    use seoforge_provider::Result as ProviderResult;

    use super::*;

    const INTERVAL: Duration = Duration::from_secs(8 * 60 * 60);

    fn article(slug: &str) -> Article {
        Article {
            slug: slug.to_string(),
            title: format!("Title {slug}"),
            content: "Body.".to_string(),
            meta_description: "Summary.".to_string(),
        }
    }

    fn store_with_blog(slugs: &[&str]) -> SiteStore {
        let store = SiteStore::new();
        store.replace(SiteDocument {
            site_name: "Test".to_string(),
            theme_color: ThemeColor::Blue,
            pages: vec![
                Page {
                    path: "/".to_string(),
                    title: "Home".to_string(),
                    content: String::new(),
                    articles: Vec::new(),
                },
                Page {
                    path: "/about".to_string(),
                    title: "About".to_string(),
                    content: String::new(),
                    articles: Vec::new(),
                },
                Page {
                    path: "/blog".to_string(),
                    title: "Blog".to_string(),
                    content: String::new(),
                    articles: slugs.iter().map(|s| article(s)).collect(),
                },
            ],
        });
        store
    }

    fn blog_slugs(store: &SiteStore) -> Vec<String> {
        store
            .snapshot()
            .and_then(|d| d.blog_page().cloned())
            .map(|p| p.articles.into_iter().map(|a| a.slug).collect())
            .unwrap_or_default()
    }

    /// Counts calls; produces three articles per batch, or fails.
    struct StubProvider {
        calls: AtomicUsize,
        fail: bool,
        delay: Duration,
    }

    impl StubProvider {
        fn ok() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: false,
                delay: Duration::ZERO,
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::ok()
            }
        }

        fn slow(delay: Duration) -> Self {
            Self {
                delay,
                ..Self::ok()
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ContentProvider for StubProvider {
        async fn create_site(
            &self,
            _site_name: &str,
            _site_keywords: &str,
        ) -> ProviderResult<SiteDocument> {
            Err(ProviderError::EmptyResponse)
        }

        async fn create_articles(
            &self,
            _article_keywords: &str,
            _exclude_titles: &[String],
        ) -> ProviderResult<Vec<Article>> {
            let batch = self.calls.fetch_add(1, Ordering::SeqCst);
            if self.delay > Duration::ZERO {
                time::sleep(self.delay).await;
            }
            if self.fail {
                return Err(ProviderError::EmptyResponse);
            }
            Ok((0..3).map(|i| article(&format!("b{batch}-{i}"))).collect())
        }
    }

    /// Let the paused-clock runtime drive the spawned timer task.
    async fn settle() {
        time::sleep(Duration::from_millis(10)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_runs_immediate_cycle() {
        let store = store_with_blog(&["a", "b"]);
        let provider = Arc::new(StubProvider::ok());
        let poster = AutoPoster::new(provider.clone(), store.clone(), INTERVAL);

        poster.start("keywords");
        settle().await;

        assert_eq!(provider.calls(), 1);
        assert_eq!(blog_slugs(&store), vec!["b0-0", "b0-1", "b0-2", "a", "b"]);
        let status = poster.status();
        assert_eq!(status.phase, Phase::Running);
        assert!(status.last_status.unwrap().contains("Added 3 new articles"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cycles_repeat_on_interval() {
        let store = store_with_blog(&[]);
        let provider = Arc::new(StubProvider::ok());
        let poster = AutoPoster::new(provider.clone(), store.clone(), INTERVAL);

        poster.start("keywords");
        settle().await;
        assert_eq!(provider.calls(), 1);

        time::sleep(INTERVAL).await;
        settle().await;
        assert_eq!(provider.calls(), 2);
        assert_eq!(blog_slugs(&store).len(), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_cycle_stops_scheduler() {
        let store = store_with_blog(&["a"]);
        let provider = Arc::new(StubProvider::failing());
        let poster = AutoPoster::new(provider.clone(), store.clone(), INTERVAL);

        poster.start("keywords");
        settle().await;

        let status = poster.status();
        assert_eq!(status.phase, Phase::StoppedOnError);
        assert!(status.last_status.unwrap().contains("stopped after an error"));
        // Existing articles are untouched.
        assert_eq!(blog_slugs(&store), vec!["a"]);

        // No further ticks after the failure.
        time::sleep(INTERVAL * 3).await;
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_restart_rearms_after_error() {
        let store = store_with_blog(&["a"]);
        let provider = Arc::new(StubProvider::failing());
        let poster = AutoPoster::new(provider.clone(), store.clone(), INTERVAL);

        poster.start("keywords");
        settle().await;
        assert_eq!(poster.status().phase, Phase::StoppedOnError);

        poster.start("keywords");
        settle().await;
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_is_idempotent_and_disarms() {
        let store = store_with_blog(&[]);
        let provider = Arc::new(StubProvider::ok());
        let poster = AutoPoster::new(provider.clone(), store.clone(), INTERVAL);

        poster.start("keywords");
        settle().await;
        poster.stop();
        poster.stop();

        let status = poster.status();
        assert_eq!(status.phase, Phase::Idle);
        assert_eq!(status.last_status, None);

        time::sleep(INTERVAL * 2).await;
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_never_leaks_a_timer() {
        let store = store_with_blog(&[]);
        let provider = Arc::new(StubProvider::ok());
        let poster = AutoPoster::new(provider.clone(), store.clone(), INTERVAL);

        poster.start("keywords");
        settle().await;
        poster.start("keywords");
        settle().await;
        assert_eq!(provider.calls(), 2);

        // One armed timer means exactly one cycle per interval.
        time::sleep(INTERVAL).await;
        settle().await;
        assert_eq!(provider.calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_result_against_replaced_store_is_discarded() {
        let store = store_with_blog(&["a"]);
        let provider = Arc::new(StubProvider::slow(Duration::from_secs(100)));
        let poster = AutoPoster::new(provider.clone(), store.clone(), INTERVAL);

        poster.start("keywords");
        settle().await;

        // Replace the site while the request is in flight.
        store.replace(SiteDocument {
            site_name: "Replacement".to_string(),
            theme_color: ThemeColor::Red,
            pages: store_with_blog(&["x"]).snapshot().unwrap().pages,
        });

        time::sleep(Duration::from_secs(200)).await;
        settle().await;

        // The late result never reached the new document.
        assert_eq!(blog_slugs(&store), vec!["x"]);
        assert_eq!(poster.status().phase, Phase::Idle);
        assert!(
            poster
                .status()
                .last_status
                .unwrap()
                .contains("discarded")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_merge_prepends_newest_first_across_cycles() {
        let store = store_with_blog(&[]);
        let provider = Arc::new(StubProvider::ok());
        let poster = AutoPoster::new(provider.clone(), store.clone(), INTERVAL);

        poster.start("keywords");
        settle().await;
        time::sleep(INTERVAL).await;
        settle().await;

        assert_eq!(
            blog_slugs(&store),
            vec!["b1-0", "b1-1", "b1-2", "b0-0", "b0-1", "b0-2"]
        );
    }

    #[test]
    fn test_interval_phrase() {
        assert_eq!(interval_phrase(Duration::from_secs(8 * 3600)), "8 hours");
        assert_eq!(interval_phrase(Duration::from_secs(3600)), "1 hour");
        assert_eq!(interval_phrase(Duration::from_secs(90)), "1 minute");
        assert_eq!(interval_phrase(Duration::from_secs(1800)), "30 minutes");
    }
}
