use std::collections::BTreeMap;

use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{PositiveUsize, TesterArgs, parse_host};
use crate::error::{ConfigError, ValidationError};
use crate::validate::{EndpointKind, EndpointMap};

use super::types::ConfigFile;

/// Applies configuration values to CLI arguments. Values given on the command
/// line are left untouched.
///
/// # Errors
///
/// Returns an error when a config value is invalid.
pub fn apply_config(
    args: &mut TesterArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> Result<(), ConfigError> {
    if !is_cli(matches, "host")
        && let Some(host) = config.host.as_deref()
    {
        args.host = parse_host(host).map_err(|err| invalid("host", err))?;
    }

    if !is_cli(matches, "data_dir")
        && let Some(data_dir) = config.data_dir.clone()
    {
        args.data_dir = data_dir;
    }

    if !is_cli(matches, "ammo_dir")
        && let Some(ammo_dir) = config.ammo_dir.clone()
    {
        args.ammo_dir = ammo_dir;
    }

    if !is_cli(matches, "connections")
        && let Some(connections) = config.connections
    {
        args.connections = ensure_positive_usize(connections, "connections")?;
    }

    if !is_cli(matches, "timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        args.timeout = timeout.to_duration().map_err(|err| invalid("timeout", err))?;
    }

    if !is_cli(matches, "count")
        && let Some(count) = config.count
    {
        args.count = ensure_positive_usize(count, "count")?;
    }

    if !is_cli(matches, "queue_capacity")
        && let Some(queue_capacity) = config.queue_capacity
    {
        args.queue_capacity = ensure_positive_usize(queue_capacity, "queue_capacity")?;
    }

    if !is_cli(matches, "output_format")
        && let Some(output_format) = config.output_format
    {
        args.output_format = output_format;
    }

    if !is_cli(matches, "output")
        && let Some(output) = config.output.clone()
    {
        args.output = Some(output);
    }

    if !is_cli(matches, "verbose")
        && let Some(verbose) = config.verbose
    {
        args.verbose = verbose;
    }

    Ok(())
}

/// Builds the method-to-validator map from the optional `endpoints` table.
///
/// # Errors
///
/// Returns an error when a method is not an absolute path or names an
/// unknown validator.
pub fn endpoint_map(config: Option<&ConfigFile>) -> Result<EndpointMap, ConfigError> {
    let Some(endpoints) = config.and_then(|config| config.endpoints.as_ref()) else {
        return Ok(EndpointMap::default());
    };

    let mut overrides = BTreeMap::new();
    for (method, kind) in endpoints {
        if !method.starts_with('/') {
            return Err(ConfigError::EndpointPathNotAbsolute {
                method: method.clone(),
            });
        }
        let kind = kind
            .parse::<EndpointKind>()
            .map_err(|err| invalid("endpoints", err))?;
        overrides.insert(method.clone(), kind);
    }
    Ok(EndpointMap::new(overrides))
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

fn ensure_positive_usize(value: usize, field: &'static str) -> Result<PositiveUsize, ConfigError> {
    PositiveUsize::try_from(value)
        .map_err(|err| ConfigError::FieldMustBePositive { field, source: err })
}

const fn invalid(field: &'static str, source: ValidationError) -> ConfigError {
    ConfigError::InvalidField { field, source }
}
