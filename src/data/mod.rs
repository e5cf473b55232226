//! Read-only reference data and ammo, loaded once before any dispatch.
mod ammo_set;
mod dataset;
mod loader;


pub use ammo_set::AmmoSet;
pub use dataset::{ReferenceDataset, ReferenceItem};
pub use loader::{AMMO_FILE, EPG_FILE, MEDIA_ITEMS_FILE, load_ammo, load_dataset};
