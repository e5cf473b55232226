//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use cli::TesterArgs;
pub use types::{OutputFormat, PositiveUsize};

pub(crate) use defaults::{DEFAULT_CONFIG_JSON, DEFAULT_CONFIG_TOML, DEFAULT_USER_AGENT};
pub(crate) use parsers::{parse_duration_arg, parse_host};
