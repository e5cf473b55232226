//! Wire and domain types: content ids, reference items, ammo, and API
//! response envelopes.
mod ammo;
mod content;
mod items;
mod responses;


pub use ammo::Ammo;
pub use content::{ContentId, ContentKind};
pub use items::{ChannelInfo, ContentEq, EpgItem, MediaItem, Person, RATING_TOLERANCE};
pub use responses::{EpgItemsResponse, MediaItemsResponse, SearchItem, SearchResponse};
