//! Concurrent execution of probe invocations.
//!
//! The [`ProbeRunner`] trait is the seam between the pipeline and whatever
//! actually probes a target. [`ConcurrentProber`] drives a bounded pool of
//! workers over a batch of invocations; each worker runs one invocation to
//! completion before taking the next one from the shared queue.
//!
//! The pool only lives for the duration of [`ConcurrentProber::run_all`]:
//! every worker is joined before it returns.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tracing::{debug, error};

use crate::command::ProbeInvocation;

pub mod fping;

/// Called with `(completed, total)` each time an invocation finishes.
pub type ProgressCallback = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// Raw output of one invocation.
///
/// Output is kept whatever the exit status: a failing probe still reports
/// its unreachable or unresolvable targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub target: String,
    pub output: String,
    pub success: bool,
}

impl ProbeOutcome {
    pub fn new(target: impl Into<String>, output: impl Into<String>, success: bool) -> Self {
        Self {
            target: target.into(),
            output: output.into(),
            success,
        }
    }

    /// An invocation that produced nothing usable.
    pub fn empty(target: impl Into<String>) -> Self {
        Self::new(target, String::new(), false)
    }
}

/// Executes a single invocation. Implementations must not fail: problems are
/// reported through the outcome and the log.
#[async_trait]
pub trait ProbeRunner: Send + Sync {
    async fn run(&self, invocation: &ProbeInvocation) -> ProbeOutcome;
}

pub struct ConcurrentProber {
    runner: Arc<dyn ProbeRunner>,
    pool_size: usize,
    on_progress: Option<ProgressCallback>,
}

impl ConcurrentProber {
    pub fn new(runner: Arc<dyn ProbeRunner>, pool_size: usize) -> Self {
        Self {
            runner,
            pool_size: pool_size.max(1),
            on_progress: None,
        }
    }

    pub fn with_progress(mut self, on_progress: Option<ProgressCallback>) -> Self {
        self.on_progress = on_progress;
        self
    }

    /// Runs every invocation and returns the outcomes in submission order.
    pub async fn run_all(&self, invocations: Vec<ProbeInvocation>) -> Vec<ProbeOutcome> {
        let total: usize = invocations.len();
        if total == 0 {
            return Vec::new();
        }

        let queue: Arc<Mutex<VecDeque<(usize, ProbeInvocation)>>> =
            Arc::new(Mutex::new(invocations.into_iter().enumerate().collect()));
        let completed = Arc::new(AtomicUsize::new(0));
        let workers: usize = self.pool_size.min(total);
        debug!("Dispatching {total} probes across {workers} workers");

        let mut pool: JoinSet<Vec<(usize, ProbeOutcome)>> = JoinSet::new();
        for _ in 0..workers {
            let queue = queue.clone();
            let runner = self.runner.clone();
            let completed = completed.clone();
            let on_progress = self.on_progress.clone();

            pool.spawn(async move {
                let mut done = Vec::new();
                loop {
                    let next = queue.lock().await.pop_front();
                    let Some((idx, invocation)) = next else {
                        break;
                    };

                    debug!("Running {invocation}");
                    done.push((idx, runner.run(&invocation).await));

                    let count = completed.fetch_add(1, Ordering::Relaxed) + 1;
                    if let Some(cb) = &on_progress {
                        cb(count, total);
                    }
                }
                done
            });
        }

        let mut outcomes: Vec<(usize, ProbeOutcome)> = Vec::with_capacity(total);
        while let Some(joined) = pool.join_next().await {
            match joined {
                Ok(mut done) => outcomes.append(&mut done),
                Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
                Err(e) => error!("Probe worker ended unexpectedly: {e}"),
            }
        }

        outcomes.sort_by_key(|(idx, _)| *idx);
        outcomes.into_iter().map(|(_, outcome)| outcome).collect()
    }
}
