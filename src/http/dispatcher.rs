use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use reqwest::Url;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

use crate::args::PositiveUsize;
use crate::error::{AppError, AppResult, DispatchError};
use crate::metrics::{Outcome, StatHandle, classify};
use crate::model::Ammo;
use crate::runner::RunContext;
use crate::validate::{EndpointKind, validate_content};

use super::Fetcher;

/// One request to issue. Consumed by exactly one worker.
#[derive(Debug, Clone)]
pub struct Job {
    pub url: Url,
    pub ammo: Arc<Ammo>,
    pub stat: StatHandle,
    pub endpoint: EndpointKind,
}

#[derive(Debug, Clone, Copy)]
pub struct DispatcherSettings {
    pub workers: PositiveUsize,
    pub queue_capacity: PositiveUsize,
    pub request_timeout: Duration,
}

/// Counts reported once every worker has been joined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainSummary {
    pub submitted: u64,
    pub processed: u64,
}

/// Fixed pool of workers draining one bounded FIFO queue.
pub struct JobDispatcher {
    job_tx: mpsc::Sender<Job>,
    submitted: AtomicU64,
    workers: Vec<JoinHandle<u64>>,
}

impl JobDispatcher {
    /// Spawns the workers on the current tokio runtime.
    #[must_use]
    pub fn start(
        fetcher: Arc<dyn Fetcher>,
        context: Arc<RunContext>,
        settings: DispatcherSettings,
    ) -> Self {
        let (job_tx, job_rx) = mpsc::channel::<Job>(settings.queue_capacity.get());
        let job_rx = Arc::new(Mutex::new(job_rx));
        let worker_count = settings.workers.get();
        let mut workers = Vec::with_capacity(worker_count);

        for worker_id in 0..worker_count {
            let job_rx = Arc::clone(&job_rx);
            let fetcher = Arc::clone(&fetcher);
            let context = Arc::clone(&context);
            let timeout = settings.request_timeout;
            workers.push(tokio::spawn(async move {
                run_worker(worker_id, &job_rx, fetcher.as_ref(), &context, timeout).await
            }));
        }

        Self {
            job_tx,
            submitted: AtomicU64::new(0),
            workers,
        }
    }

    /// Enqueues a job, waiting while the queue is full.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::QueueClosed` when every worker has exited.
    pub async fn submit(&self, job: Job) -> Result<(), DispatchError> {
        self.job_tx
            .send(job)
            .await
            .map_err(|err| DispatchError::QueueClosed {
                url: err.0.url.to_string(),
            })?;
        self.submitted.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Closes the queue and waits for every worker to drain it.
    ///
    /// # Errors
    ///
    /// Returns the first worker join error, after all workers have finished.
    pub async fn shutdown(self) -> AppResult<DrainSummary> {
        let JobDispatcher {
            job_tx,
            submitted,
            workers,
        } = self;
        drop(job_tx);

        let mut processed: u64 = 0;
        let mut first_error: Option<AppError> = None;
        for handle in workers {
            match handle.await {
                Ok(count) => processed = processed.saturating_add(count),
                Err(err) => {
                    if first_error.is_none() {
                        first_error = Some(err.into());
                    }
                }
            }
        }
        if let Some(err) = first_error {
            return Err(err);
        }

        Ok(DrainSummary {
            submitted: submitted.into_inner(),
            processed,
        })
    }
}

async fn run_worker(
    worker_id: usize,
    job_rx: &Mutex<mpsc::Receiver<Job>>,
    fetcher: &dyn Fetcher,
    context: &RunContext,
    timeout: Duration,
) -> u64 {
    let mut processed: u64 = 0;
    loop {
        let next = {
            let mut rx = job_rx.lock().await;
            rx.recv().await
        };
        let Some(job) = next else {
            break;
        };
        process_job(fetcher, context, &job, timeout).await;
        processed = processed.saturating_add(1);
    }
    debug!("Worker {} drained after {} jobs", worker_id, processed);
    processed
}

/// Issues the request for `job`, classifies the result and records it in the
/// job's stat.
pub async fn process_job(
    fetcher: &dyn Fetcher,
    context: &RunContext,
    job: &Job,
    timeout: Duration,
) -> Outcome {
    let start = Instant::now();
    let result = fetcher.fetch(&job.url, timeout).await;
    let latency = start.elapsed();

    let outcome = classify(result, job.ammo.expected_http_code, |body| {
        validate_content(job.endpoint, body, &job.ammo, context.dataset())
    });
    context.stats().record(job.stat, latency, outcome.bucket());

    match &outcome {
        Outcome::Success => {}
        Outcome::Transport(err) => debug!("Connection error: {}", err),
        Outcome::UnexpectedStatus { expected, actual } => {
            debug!(
                "Unexpected status from {}: expected {}, got {}",
                job.url, expected, actual
            );
        }
        Outcome::Content(err) => debug!("Content error from {}: {}", job.url, err),
    }
    outcome
}
