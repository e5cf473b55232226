use serde::{Deserialize, Serialize};

use super::ContentId;
use super::items::null_as_default;

/// A pre-built request descriptor together with the outcome the server is
/// expected to produce for it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Ammo {
    #[serde(rename = "args", default, deserialize_with = "null_as_default")]
    pub query_args: String,
    #[serde(rename = "code")]
    pub expected_http_code: u16,
    #[serde(rename = "total_items", default)]
    pub expected_total_items: i64,
    #[serde(rename = "ids", default, deserialize_with = "null_as_default")]
    pub expected_ids: Vec<ContentId>,
}
