//! Fetch Pool: runs workers over every reference with bounded parallelism.

use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;

use iconmirror_fetch::HttpClient;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::IconError;
use crate::model::{FetchOutcome, IconReference};
use crate::worker::IconWorker;

/// Snapshot passed to the progress callback after every finished reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolProgress {
    pub completed: usize,
    pub succeeded: usize,
    pub total:     usize,
}

#[derive(Clone)]
pub struct PoolOptions {
    /// Maximum number of downloads in flight.
    ///
    /// Default: available parallelism
    pub concurrency: usize,
    pub on_progress: Option<Arc<dyn Fn(&PoolProgress) + Send + Sync>>,
}

impl fmt::Debug for PoolOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoolOptions")
            .field("concurrency", &self.concurrency)
            .field("on_progress", &"{ ... }")
            .finish()
    }
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            on_progress: None,
        }
    }
}

impl PoolOptions {
    #[must_use]
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    #[must_use]
    pub fn on_progress(mut self, on_progress: Arc<dyn Fn(&PoolProgress) + Send + Sync>) -> Self {
        self.on_progress = Some(on_progress);
        self
    }
}

pub fn default_concurrency() -> usize { std::thread::available_parallelism().map_or(1, NonZeroUsize::get) }

#[derive(Debug, Default)]
pub struct PoolReport {
    /// Sorted by discovery index, independent of completion order.
    pub outcomes:  Vec<FetchOutcome>,
    pub attempted: usize,
    pub failed:    usize,
    /// Set when the run was cancelled before every reference finished.
    pub cancelled: bool,
}

pub struct FetchPool<C: HttpClient + 'static> {
    worker:  Arc<IconWorker<C>>,
    options: PoolOptions,
}

impl<C: HttpClient + 'static> FetchPool<C> {
    pub fn new(worker: IconWorker<C>) -> Self {
        Self {
            worker:  Arc::new(worker),
            options: PoolOptions::default(),
        }
    }

    pub fn with_options(mut self, options: PoolOptions) -> Self {
        self.options = options;
        self
    }

    /// Process every reference and wait for all of them.
    ///
    /// Returns only after every task has finished or been abandoned, so the
    /// report is never a partial view of running work. Failed and panicked
    /// workers are counted and dropped without affecting their siblings.
    pub async fn run(&self, references: Vec<IconReference>, cancel: &CancellationToken) -> PoolReport {
        let total = references.len();
        let semaphore = Arc::new(Semaphore::new(self.options.concurrency.max(1)));
        let mut tasks = JoinSet::new();

        for reference in references {
            let worker = Arc::clone(&self.worker);
            let semaphore = Arc::clone(&semaphore);
            let cancel = cancel.clone();

            tasks.spawn(async move {
                let _permit = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return Err(IconError::Cancelled),
                    permit = semaphore.acquire_owned() => permit.map_err(|_| IconError::Cancelled)?,
                };
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => Err(IconError::Cancelled),
                    result = worker.process(&reference) => result,
                }
            });
        }

        let mut report = PoolReport {
            attempted: total,
            ..PoolReport::default()
        };
        let mut completed = 0;
        let mut abandoned = 0;

        while let Some(joined) = tasks.join_next().await {
            completed += 1;
            match joined {
                Ok(Ok(outcome)) => report.outcomes.push(outcome),
                Ok(Err(IconError::Cancelled)) => abandoned += 1,
                Ok(Err(e)) => {
                    debug!(error = %e, "dropping icon");
                    report.failed += 1;
                }
                Err(e) => {
                    warn!(error = %e, "icon worker did not finish");
                    report.failed += 1;
                }
            }

            if let Some(ref callback) = self.options.on_progress {
                callback(&PoolProgress {
                    completed,
                    succeeded: report.outcomes.len(),
                    total,
                });
            }
        }

        report.outcomes.sort_by_key(|outcome| outcome.reference.index);
        report.cancelled = abandoned > 0;
        report
    }
}
