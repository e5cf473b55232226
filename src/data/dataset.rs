use std::collections::HashMap;

use crate::model::{ContentEq, EpgItem, MediaItem};

/// Canonical item records keyed by content id.
#[derive(Debug, Default)]
pub struct ReferenceDataset {
    media_items: HashMap<i64, MediaItem>,
    epg_items: HashMap<i64, EpgItem>,
}

impl ReferenceDataset {
    /// Builds the lookup tables. A later record with a duplicate id replaces
    /// the earlier one.
    #[must_use]
    pub fn new(media_items: Vec<MediaItem>, epg_items: Vec<EpgItem>) -> Self {
        Self {
            media_items: media_items.into_iter().map(|item| (item.id, item)).collect(),
            epg_items: epg_items.into_iter().map(|item| (item.id, item)).collect(),
        }
    }

    #[must_use]
    pub fn get<T: ReferenceItem>(&self, id: i64) -> Option<&T> {
        T::lookup(self, id)
    }

    #[must_use]
    pub fn media_item(&self, id: i64) -> Option<&MediaItem> {
        self.media_items.get(&id)
    }

    #[must_use]
    pub fn epg_item(&self, id: i64) -> Option<&EpgItem> {
        self.epg_items.get(&id)
    }

    #[must_use]
    pub fn media_item_count(&self) -> usize {
        self.media_items.len()
    }

    #[must_use]
    pub fn epg_item_count(&self) -> usize {
        self.epg_items.len()
    }
}

/// An item kind that has a reference table in [`ReferenceDataset`].
pub trait ReferenceItem: ContentEq + Sized {
    fn id(&self) -> i64;

    fn lookup(dataset: &ReferenceDataset, id: i64) -> Option<&Self>;
}

impl ReferenceItem for MediaItem {
    fn id(&self) -> i64 {
        self.id
    }

    fn lookup(dataset: &ReferenceDataset, id: i64) -> Option<&Self> {
        dataset.media_item(id)
    }
}

impl ReferenceItem for EpgItem {
    fn id(&self) -> i64 {
        self.id
    }

    fn lookup(dataset: &ReferenceDataset, id: i64) -> Option<&Self> {
        dataset.epg_item(id)
    }
}
