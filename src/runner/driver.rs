use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Url;
use tokio::time::Instant;
use tracing::{info, warn};

use crate::error::AppResult;
use crate::http::{DispatcherSettings, DrainSummary, Fetcher, Job, JobDispatcher};
use crate::metrics::StatSnapshot;
use crate::model::Ammo;

use super::{MethodPlan, RunContext};

#[derive(Debug, Clone)]
pub struct RunSettings {
    /// `http://host:port` the method paths are resolved against.
    pub base_url: Url,
    pub requests_per_method: usize,
    pub dispatcher: DispatcherSettings,
}

/// Final statistics, read after every worker has been joined.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub wall_time: Duration,
    pub drain: DrainSummary,
    pub methods: Vec<StatSnapshot>,
}

/// Builds the target URL for one ammo entry: `base` + `method` + `?args`.
#[must_use]
pub fn method_url(base: &Url, method: &str, query_args: &str) -> Url {
    let mut url = base.clone();
    url.set_path(method);
    url.set_query(if query_args.is_empty() {
        None
    } else {
        Some(query_args)
    });
    url
}

/// Runs the whole replay: starts the pool, enqueues every method, joins the
/// workers and snapshots the stats.
///
/// # Errors
///
/// Returns an error when the queue closes early or a worker fails to join.
pub async fn execute(
    context: Arc<RunContext>,
    fetcher: Arc<dyn Fetcher>,
    settings: &RunSettings,
) -> AppResult<RunSummary> {
    if context.stats().is_empty() {
        warn!("No method has ammo; nothing to replay.");
    } else {
        info!(
            "Replaying {} methods, {} requests each",
            context.stats().len(),
            settings.requests_per_method
        );
    }

    let started_at = Utc::now();
    let start = Instant::now();
    let dispatcher = JobDispatcher::start(fetcher, Arc::clone(&context), settings.dispatcher);

    let driven = drive(
        &context,
        &dispatcher,
        &settings.base_url,
        settings.requests_per_method,
    )
    .await;
    // Join before surfacing a drive error so no worker is still writing.
    let drain = dispatcher.shutdown().await?;
    driven?;

    if drain.processed != drain.submitted {
        warn!(
            "Processed {} jobs but submitted {}",
            drain.processed, drain.submitted
        );
    }
    info!("Finished {} jobs", drain.processed);

    Ok(RunSummary {
        started_at,
        wall_time: start.elapsed(),
        drain,
        methods: context.stats().snapshots(),
    })
}

/// Enqueues `requests_per_method` jobs for each method in turn, cycling
/// through its ammo, and records how long each method took to enqueue.
///
/// # Errors
///
/// Returns an error when the dispatcher stops accepting jobs.
pub async fn drive(
    context: &RunContext,
    dispatcher: &JobDispatcher,
    base_url: &Url,
    requests_per_method: usize,
) -> AppResult<()> {
    for plan in context.methods() {
        let targets = build_targets(base_url, plan);
        info!(
            "Replaying {} requests against {} ({} ammo, validator: {})",
            requests_per_method,
            plan.method,
            targets.len(),
            plan.endpoint.as_str()
        );

        let start = Instant::now();
        for (url, ammo) in targets.iter().cycle().take(requests_per_method) {
            dispatcher
                .submit(Job {
                    url: url.clone(),
                    ammo: Arc::clone(ammo),
                    stat: plan.stat,
                    endpoint: plan.endpoint,
                })
                .await?;
        }
        context.stats().set_elapsed(plan.stat, start.elapsed());
    }
    Ok(())
}

fn build_targets(base_url: &Url, plan: &MethodPlan) -> Vec<(Url, Arc<Ammo>)> {
    plan.ammo
        .iter()
        .map(|ammo| {
            (
                method_url(base_url, &plan.method, &ammo.query_args),
                Arc::clone(ammo),
            )
        })
        .collect()
}
