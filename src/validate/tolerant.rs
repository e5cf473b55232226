use std::collections::HashSet;

use crate::error::ContentError;
use crate::model::{Ammo, ContentKind, SearchResponse};

/// Share of expected ids, in percent, a search response must contain.
pub const MIN_OVERLAP_PERCENT: usize = 70;

/// Integer form of `found / expected >= 70%`. An empty expectation always
/// passes.
#[must_use]
pub const fn meets_overlap(found: usize, expected: usize) -> bool {
    found.saturating_mul(100) >= expected.saturating_mul(MIN_OVERLAP_PERCENT)
}

pub(super) fn validate_search(response: &SearchResponse, ammo: &Ammo) -> Result<(), ContentError> {
    let mut media_items = HashSet::new();
    let mut epg_items = HashSet::new();
    for item in &response.items {
        match item.content_ref()? {
            Some((ContentKind::MediaItem, id)) => {
                media_items.insert(id);
            }
            Some((ContentKind::Epg, id)) => {
                epg_items.insert(id);
            }
            None => {}
        }
    }

    let found = ammo
        .expected_ids
        .iter()
        .filter(|expected| match expected.kind {
            ContentKind::MediaItem => media_items.contains(&expected.id),
            ContentKind::Epg => epg_items.contains(&expected.id),
        })
        .count();

    if meets_overlap(found, ammo.expected_ids.len()) {
        Ok(())
    } else {
        Err(ContentError::InsufficientOverlap {
            found,
            expected: ammo.expected_ids.len(),
        })
    }
}
