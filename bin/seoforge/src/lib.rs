//! seoforge CLI library.
//!
//! Command implementations and the embedded preview server. The binary
//! entry point lives in `main.rs`.
//!
//! # Modules
//!
//! - [`cmd`] - command implementations (build, serve)
//! - [`preview`] - embedded live preview server

pub mod cmd;
pub mod preview;

/// Initialize tracing with the specified verbosity level.
///
/// `verbose` maps 0 → WARN, 1 → INFO, 2 → DEBUG, 3+ → TRACE.
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
