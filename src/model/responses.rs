use serde::Deserialize;

use crate::error::ContentError;

use super::items::null_as_default;
use super::{ContentKind, EpgItem, MediaItem};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MediaItemsResponse {
    pub total_items: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub items: Vec<MediaItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EpgItemsResponse {
    pub total_items: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub items: Vec<EpgItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
    pub total_items: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub items: Vec<SearchItem>,
}

/// One entry of a mixed search result, tagged by kind.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchItem {
    #[serde(rename = "type")]
    pub tag: String,
    pub media_item: Option<MediaItem>,
    pub epg: Option<EpgItem>,
}

impl SearchItem {
    /// Resolves the tagged payload to a content id. Unknown tags yield
    /// `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::MissingPayload` when the tag names a known kind
    /// but the matching payload is absent.
    pub fn content_ref(&self) -> Result<Option<(ContentKind, i64)>, ContentError> {
        let kind = match self.tag.as_str() {
            "media_item" => ContentKind::MediaItem,
            "epg" => ContentKind::Epg,
            _ => return Ok(None),
        };
        let id = match kind {
            ContentKind::MediaItem => self.media_item.as_ref().map(|item| item.id),
            ContentKind::Epg => self.epg.as_ref().map(|item| item.id),
        };
        id.map(|id| Some((kind, id)))
            .ok_or(ContentError::MissingPayload {
                tag: kind.as_str(),
            })
    }
}
