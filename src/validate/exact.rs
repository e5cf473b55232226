use crate::data::{ReferenceDataset, ReferenceItem};
use crate::error::ContentError;
use crate::model::Ammo;

/// Strict listing check: count, total, per-position id, then content.
pub(super) fn validate_listing<T: ReferenceItem>(
    items: &[T],
    total_items: i64,
    ammo: &Ammo,
    dataset: &ReferenceDataset,
) -> Result<(), ContentError> {
    if items.len() != ammo.expected_ids.len() {
        return Err(ContentError::CountMismatch {
            expected: ammo.expected_ids.len(),
            actual: items.len(),
        });
    }
    if total_items != ammo.expected_total_items {
        return Err(ContentError::TotalItemsMismatch {
            expected: ammo.expected_total_items,
            actual: total_items,
        });
    }

    for (position, (item, expected)) in items.iter().zip(&ammo.expected_ids).enumerate() {
        let id = item.id();
        if id != expected.id {
            return Err(ContentError::OrderMismatch {
                position,
                expected: expected.id,
                actual: id,
            });
        }
        let reference = dataset
            .get::<T>(id)
            .ok_or(ContentError::MissingReference { id })?;
        if !item.content_eq(reference) {
            return Err(ContentError::ContentMismatch { id });
        }
    }

    Ok(())
}
