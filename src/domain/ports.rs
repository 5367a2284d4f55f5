use crate::core::entropy::Entropy;
use crate::core::transcript::Transcript;
use crate::domain::model::{Category, RunResult};
use crate::utils::error::Result;
use std::time::Duration;

/// A runnable demonstration.
///
/// `run` writes everything it would have printed into `out` and draws any
/// randomness from `entropy`. Returning an error (or panicking) marks the
/// invocation as errored; the lines written so far are kept.
pub trait Example: Send + Sync {
    fn id(&self) -> &str;
    fn category(&self) -> Category;
    fn title(&self) -> &str;
    fn run(&self, out: &mut Transcript, entropy: &mut Entropy) -> anyhow::Result<()>;
}

/// Renders finalized results. Never sees the registry or live examples.
pub trait Reporter {
    fn report(&mut self, results: &[RunResult]) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn seed(&self) -> u64;
    fn jobs(&self) -> usize;
    fn timeout(&self) -> Option<Duration>;
    fn fixtures_path(&self) -> Option<&str>;
}
