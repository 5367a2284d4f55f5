use crate::config::fixtures::FixtureSet;
use crate::core::entropy::Entropy;
use crate::core::registry::Registry;
use crate::core::transcript::Transcript;
use crate::domain::model::{Category, RunResult, RunSummary};
use crate::domain::ports::{ConfigProvider, Example};
use crate::utils::error::{CatalogError, Result};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Examples executed at once. 1 runs them one after another.
    pub jobs: usize,
    /// Wall-clock budget per example.
    ///
    /// An overrunning example is reported as errored, but its blocking
    /// thread cannot be interrupted and keeps running until the body
    /// returns. Shutting down the tokio runtime waits for that thread, so
    /// callers that own their runtime should use
    /// `Runtime::shutdown_timeout` if examples may hang.
    pub timeout: Option<Duration>,
    pub fixtures: Option<Arc<FixtureSet>>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            jobs: 1,
            timeout: None,
            fixtures: None,
        }
    }
}

impl RunOptions {
    pub fn from_provider<C: ConfigProvider + ?Sized>(config: &C, fixtures: Option<FixtureSet>) -> Self {
        Self {
            jobs: config.jobs().max(1),
            timeout: config.timeout(),
            fixtures: fixtures.map(Arc::new),
        }
    }

    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_fixtures(mut self, fixtures: FixtureSet) -> Self {
        self.fixtures = Some(Arc::new(fixtures));
        self
    }
}

/// Cooperative cancellation flag, checked between examples.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Executes registered examples and grades their transcripts.
///
/// The runner is the isolation boundary: an example that returns an error,
/// panics or overruns its time budget yields an errored [`RunResult`] and
/// the batch carries on with the next example.
pub struct Runner<'r> {
    registry: &'r Registry,
    options: RunOptions,
    cancel: CancelToken,
}

impl<'r> Runner<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self::with_options(registry, RunOptions::default())
    }

    pub fn with_options(registry: &'r Registry, options: RunOptions) -> Self {
        Self {
            registry,
            options,
            cancel: CancelToken::new(),
        }
    }

    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Runs a single example. An unknown id comes back as
    /// [`CatalogError::NotFound`]; everything else is a [`RunResult`].
    pub async fn run_one(&self, id: &str, seed: u64) -> Result<RunResult> {
        let example = Arc::clone(self.registry.get(id)?);
        let expected = self.expected_for(id);
        Ok(invoke(example, seed, self.options.timeout, expected).await)
    }

    /// Runs every registered example in registration order.
    pub async fn run_all(&self, seed: u64) -> Vec<RunResult> {
        let examples: Vec<Arc<dyn Example>> = self.registry.list(None).cloned().collect();
        self.run_batch(examples, seed).await
    }

    pub async fn run_category(&self, category: Category, seed: u64) -> Vec<RunResult> {
        let examples: Vec<Arc<dyn Example>> = self.registry.list(Some(category)).cloned().collect();
        self.run_batch(examples, seed).await
    }

    async fn run_batch(&self, examples: Vec<Arc<dyn Example>>, seed: u64) -> Vec<RunResult> {
        let total = examples.len();
        tracing::info!(
            "Running {} example(s) with seed {} ({} job(s))",
            total,
            seed,
            self.options.jobs
        );
        let started = Instant::now();

        let results = if self.options.jobs <= 1 {
            self.run_sequential(examples, seed).await
        } else {
            self.run_parallel(examples, seed).await
        };

        if results.len() < total {
            tracing::warn!("Run cancelled after {} of {} example(s)", results.len(), total);
        }
        let summary = RunSummary::from_results(&results);
        tracing::info!(
            "Finished in {:?}: {} passed, {} failed, {} errored",
            started.elapsed(),
            summary.passed,
            summary.failed,
            summary.errored
        );
        results
    }

    async fn run_sequential(&self, examples: Vec<Arc<dyn Example>>, seed: u64) -> Vec<RunResult> {
        let mut results = Vec::with_capacity(examples.len());
        for example in examples {
            if self.cancel.is_cancelled() {
                break;
            }
            let expected = self.expected_for(example.id());
            results.push(invoke(example, seed, self.options.timeout, expected).await);
        }
        results
    }

    async fn run_parallel(&self, examples: Vec<Arc<dyn Example>>, seed: u64) -> Vec<RunResult> {
        let semaphore = Arc::new(Semaphore::new(self.options.jobs));
        let mut tasks = JoinSet::new();
        let mut launched: Vec<(String, Category)> = Vec::with_capacity(examples.len());

        for (position, example) in examples.into_iter().enumerate() {
            let permit = match Arc::clone(&semaphore).acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => break,
            };
            if self.cancel.is_cancelled() {
                break;
            }

            launched.push((example.id().to_string(), example.category()));
            let expected = self.expected_for(example.id());
            let timeout = self.options.timeout;
            tasks.spawn(async move {
                let result = invoke(example, seed, timeout, expected).await;
                drop(permit);
                (position, result)
            });
        }

        let mut joined = Vec::with_capacity(tasks.len());
        let mut lost = Vec::new();
        while let Some(outcome) = tasks.join_next().await {
            match outcome {
                Ok(pair) => joined.push(pair),
                Err(e) => lost.push(format!("execution task failed: {}", e)),
            }
        }

        settle(launched, joined, lost, seed)
    }

    fn expected_for(&self, id: &str) -> Option<Vec<String>> {
        self.options
            .fixtures
            .as_ref()
            .and_then(|fixtures| fixtures.expected(id))
            .map(<[String]>::to_vec)
    }
}

/// Puts joined results back into launch (registration) order. A launched
/// example whose task never came back gets an errored result carrying one
/// of the `lost` join failures.
fn settle(
    launched: Vec<(String, Category)>,
    joined: Vec<(usize, RunResult)>,
    lost: Vec<String>,
    seed: u64,
) -> Vec<RunResult> {
    let mut slots: Vec<Option<RunResult>> = launched.iter().map(|_| None).collect();
    // 依註冊順序排回
    for (position, result) in joined {
        if let Some(slot) = slots.get_mut(position) {
            *slot = Some(result);
        }
    }

    let mut lost = lost.into_iter();
    slots
        .into_iter()
        .zip(launched)
        .map(|(slot, (id, category))| {
            slot.unwrap_or_else(|| {
                let detail = lost
                    .next()
                    .unwrap_or_else(|| "execution task returned no result".to_string());
                tracing::error!("{} produced no result: {}", id, detail);
                RunResult::errored(id, category, seed, Vec::new(), detail, Duration::ZERO)
            })
        })
        .collect()
}

async fn invoke(
    example: Arc<dyn Example>,
    seed: u64,
    timeout: Option<Duration>,
    expected: Option<Vec<String>>,
) -> RunResult {
    let id = example.id().to_string();
    let category = example.category();
    tracing::debug!("Running {}", id);

    let started = Instant::now();
    let task = tokio::task::spawn_blocking(move || {
        let mut out = Transcript::new();
        let mut entropy = Entropy::seeded(seed);
        let outcome = catch_unwind(AssertUnwindSafe(|| example.run(&mut out, &mut entropy)));
        (out, outcome)
    });

    let joined = match timeout {
        Some(budget) => match tokio::time::timeout(budget, task).await {
            Ok(joined) => joined,
            Err(_) => {
                let detail = format!("exceeded time budget of {}ms", budget.as_millis());
                tracing::warn!("{} {}", id, detail);
                return RunResult::errored(id, category, seed, Vec::new(), detail, started.elapsed());
            }
        },
        None => task.await,
    };
    let duration = started.elapsed();

    let failure = match joined {
        Ok((out, Ok(Ok(())))) => {
            let result = RunResult::completed(id, category, seed, out.into_lines(), expected, duration);
            tracing::debug!("{} {} in {:?}", result.example_id, result.status, duration);
            return result;
        }
        Ok((out, Ok(Err(e)))) => (out.into_lines(), format!("{:#}", e)),
        Ok((out, Err(payload))) => (out.into_lines(), format!("panicked: {}", panic_message(payload.as_ref()))),
        Err(e) => (Vec::new(), format!("execution task failed: {}", e)),
    };

    let (captured, detail) = failure;
    tracing::warn!(
        "{}",
        CatalogError::ExampleExecution {
            id: id.clone(),
            detail: detail.clone(),
        }
    );
    RunResult::errored(id, category, seed, captured, detail, duration)
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
