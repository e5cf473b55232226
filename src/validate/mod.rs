//! Response content validators.
//!
//! Listing endpoints promise deterministic pagination, so their responses
//! must match the expected ids exactly and in order, and every item must equal
//! its reference record. The search endpoint may rank or rotate results, so it
//! is only required to return a minimum share of the expected ids.
mod endpoint;
mod exact;
mod tolerant;


pub use endpoint::{EndpointKind, EndpointMap};
pub use tolerant::{MIN_OVERLAP_PERCENT, meets_overlap};

use serde::de::DeserializeOwned;

use crate::data::ReferenceDataset;
use crate::error::ContentError;
use crate::model::{Ammo, EpgItemsResponse, MediaItemsResponse, SearchResponse};

/// Checks a response body against the ammo that produced it.
///
/// # Errors
///
/// Returns the first content problem found, including a body that does not
/// decode into the endpoint's response shape.
pub fn validate_content(
    kind: EndpointKind,
    body: &[u8],
    ammo: &Ammo,
    dataset: &ReferenceDataset,
) -> Result<(), ContentError> {
    match kind {
        EndpointKind::MediaItems => {
            let response: MediaItemsResponse = decode(body)?;
            exact::validate_listing(&response.items, response.total_items, ammo, dataset)
        }
        EndpointKind::Epg => {
            let response: EpgItemsResponse = decode(body)?;
            exact::validate_listing(&response.items, response.total_items, ammo, dataset)
        }
        EndpointKind::Search => {
            let response: SearchResponse = decode(body)?;
            tolerant::validate_search(&response, ammo)
        }
        EndpointKind::Unvalidated => Ok(()),
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ContentError> {
    serde_json::from_slice(body).map_err(|err| ContentError::Decode { source: err })
}
