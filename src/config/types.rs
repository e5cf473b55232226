use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::args::{OutputFormat, parse_duration_arg};
use crate::error::ValidationError;

/// Mirrors the command line; every key is optional.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub host: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub ammo_dir: Option<String>,
    #[serde(alias = "conn")]
    pub connections: Option<usize>,
    pub timeout: Option<DurationValue>,
    pub count: Option<usize>,
    pub queue_capacity: Option<usize>,
    pub output_format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub verbose: Option<bool>,
    /// Method path to validator name (`media_items`, `epg`, `search`, `none`).
    pub endpoints: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(secs) => {
                if *secs == 0 {
                    Err(ValidationError::DurationZero)
                } else {
                    Ok(Duration::from_secs(*secs))
                }
            }
            DurationValue::Text(text) => parse_duration_arg(text),
        }
    }
}
