use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const MEDIA_ITEMS_METHOD: &str = "/api/v1/media_items";
pub const EPG_METHOD: &str = "/api/v1/epg";
pub const SEARCH_METHOD: &str = "/api/v1/search";

/// Which validator a method's responses go through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointKind {
    MediaItems,
    Epg,
    Search,
    #[serde(rename = "none")]
    Unvalidated,
}

impl EndpointKind {
    #[must_use]
    pub fn default_for(method: &str) -> Self {
        match method {
            MEDIA_ITEMS_METHOD => EndpointKind::MediaItems,
            EPG_METHOD => EndpointKind::Epg,
            SEARCH_METHOD => EndpointKind::Search,
            _ => EndpointKind::Unvalidated,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            EndpointKind::MediaItems => "media_items",
            EndpointKind::Epg => "epg",
            EndpointKind::Search => "search",
            EndpointKind::Unvalidated => "none",
        }
    }
}

impl std::str::FromStr for EndpointKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "media_items" => Ok(EndpointKind::MediaItems),
            "epg" => Ok(EndpointKind::Epg),
            "search" => Ok(EndpointKind::Search),
            "none" => Ok(EndpointKind::Unvalidated),
            _ => Err(ValidationError::InvalidEndpointKind {
                value: s.to_owned(),
            }),
        }
    }
}

/// Method path to validator mapping: built-in paths plus config overrides.
#[derive(Debug, Clone, Default)]
pub struct EndpointMap {
    overrides: BTreeMap<String, EndpointKind>,
}

impl EndpointMap {
    #[must_use]
    pub const fn new(overrides: BTreeMap<String, EndpointKind>) -> Self {
        Self { overrides }
    }

    #[must_use]
    pub fn resolve(&self, method: &str) -> EndpointKind {
        self.overrides
            .get(method)
            .copied()
            .unwrap_or_else(|| EndpointKind::default_for(method))
    }
}
