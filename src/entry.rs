use std::sync::Arc;

use clap::{CommandFactory, FromArgMatches};
use tracing::{error, info, warn};

use crate::args::TesterArgs;
use crate::config::{apply_config, endpoint_map, load_config};
use crate::data::{AmmoSet, ReferenceDataset, load_ammo, load_dataset};
use crate::error::AppResult;
use crate::http::{DispatcherSettings, build_client};
use crate::report::{render, write_report};
use crate::runner::{RunContext, RunSettings, execute};
use crate::validate::EndpointMap;

/// Resolves arguments and config, loads the reference data and replays the
/// ammo. Any error here happens before or instead of a report.
///
/// # Errors
///
/// Returns an error for invalid arguments or config, unreadable data files,
/// or a run that could not be completed.
pub fn run() -> AppResult<()> {
    let matches = TesterArgs::command().get_matches();
    let mut args = TesterArgs::from_arg_matches(&matches)?;

    let config = load_config(args.config.as_deref())?;
    if let Some(config) = config.as_ref() {
        apply_config(&mut args, &matches, config)?;
    }
    let endpoints = endpoint_map(config.as_ref())?;

    crate::logger::init_logging(args.verbose);

    let result = load_inputs(&args).and_then(|(dataset, ammo)| {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        runtime.block_on(run_async(&args, dataset, &ammo, &endpoints))
    });
    if let Err(err) = result.as_ref() {
        error!("{}", err);
    }
    result
}

fn load_inputs(args: &TesterArgs) -> AppResult<(ReferenceDataset, AmmoSet)> {
    let dataset = load_dataset(&args.data_dir)?;
    let ammo = load_ammo(args.ammo_dir())?;
    if args.ammo_dir().is_some() && ammo.is_empty() {
        warn!("Ammo file has no methods; the report will be empty.");
    }
    Ok((dataset, ammo))
}

async fn run_async(
    args: &TesterArgs,
    dataset: ReferenceDataset,
    ammo: &AmmoSet,
    endpoints: &EndpointMap,
) -> AppResult<()> {
    let context = Arc::new(RunContext::new(dataset, ammo, endpoints));
    let client = build_client(args)?;
    let settings = RunSettings {
        base_url: args.host.clone(),
        requests_per_method: args.count.get(),
        dispatcher: DispatcherSettings {
            workers: args.connections,
            queue_capacity: args.queue_capacity,
            request_timeout: args.timeout,
        },
    };
    info!(
        "Target {} with {} workers, {} requests per method",
        settings.base_url,
        settings.dispatcher.workers.get(),
        settings.requests_per_method
    );

    let summary = execute(context, Arc::new(client), &settings).await?;
    let rendered = render(&summary, args)?;
    write_report(&rendered, args.output.as_deref()).await
}
