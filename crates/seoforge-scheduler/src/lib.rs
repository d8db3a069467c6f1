//! Auto-post scheduling for seoforge.
//!
//! An [`AutoPoster`] owns one repeating timer. On start it runs an
//! immediate fetch-and-merge cycle, then repeats on a fixed interval,
//! asking the content provider for new articles and prepending them to the
//! blog page. A failed cycle stops the scheduler; it never retries on its
//! own.

pub mod autopost;

pub use autopost::{AutoPoster, Phase, SchedulerStatus};
