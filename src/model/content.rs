use serde::{Deserialize, Serialize};

/// Kind of a content record. Encoded on the wire as `1` (media item) or
/// `2` (EPG).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ContentKind {
    MediaItem,
    Epg,
}

impl ContentKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ContentKind::MediaItem => "media_item",
            ContentKind::Epg => "epg",
        }
    }
}

impl TryFrom<u8> for ContentKind {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ContentKind::MediaItem),
            2 => Ok(ContentKind::Epg),
            other => Err(format!(
                "Invalid content type {}. Expected 1 (media item) or 2 (epg).",
                other
            )),
        }
    }
}

impl From<ContentKind> for u8 {
    fn from(value: ContentKind) -> Self {
        match value {
            ContentKind::MediaItem => 1,
            ContentKind::Epg => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct ContentId {
    #[serde(rename = "type")]
    pub kind: ContentKind,
    pub id: i64,
}

impl ContentId {
    #[must_use]
    pub const fn media_item(id: i64) -> Self {
        Self {
            kind: ContentKind::MediaItem,
            id,
        }
    }

    #[must_use]
    pub const fn epg(id: i64) -> Self {
        Self {
            kind: ContentKind::Epg,
            id,
        }
    }
}
