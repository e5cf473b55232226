use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::error::DataError;
use crate::model::{Ammo, EpgItem, MediaItem};

use super::{AmmoSet, ReferenceDataset};

pub const EPG_FILE: &str = "epg.json";
pub const MEDIA_ITEMS_FILE: &str = "media_items.json";
pub const AMMO_FILE: &str = "ammos.json";

/// Loads `epg.json` and `media_items.json` from `data_dir`.
///
/// # Errors
///
/// Returns an error when either file is missing or is not a JSON array of
/// items.
pub fn load_dataset(data_dir: &Path) -> Result<ReferenceDataset, DataError> {
    let epg_path = data_dir.join(EPG_FILE);
    let epg_items: Vec<EpgItem> = read_json(&epg_path)?;
    let media_path = data_dir.join(MEDIA_ITEMS_FILE);
    let media_items: Vec<MediaItem> = read_json(&media_path)?;
    let records = epg_items.len().saturating_add(media_items.len());

    let dataset = ReferenceDataset::new(media_items, epg_items);
    info!(
        "Loaded {} epgs from {} and {} media items from {}",
        dataset.epg_item_count(),
        epg_path.display(),
        dataset.media_item_count(),
        media_path.display()
    );
    let unique = dataset
        .epg_item_count()
        .saturating_add(dataset.media_item_count());
    if unique < records {
        warn!(
            "{} duplicate ids in the reference data; the last record of each wins",
            records.saturating_sub(unique)
        );
    }
    Ok(dataset)
}

/// Loads `ammos.json` from `ammo_dir`. `None` yields an empty set.
///
/// # Errors
///
/// Returns an error when the file is missing or malformed.
pub fn load_ammo(ammo_dir: Option<&Path>) -> Result<AmmoSet, DataError> {
    let Some(ammo_dir) = ammo_dir else {
        warn!("No ammo directory set; nothing will be replayed.");
        return Ok(AmmoSet::default());
    };
    let path = ammo_dir.join(AMMO_FILE);
    let by_method: BTreeMap<String, Vec<Ammo>> = read_json(&path)?;
    let set = AmmoSet::new(by_method);
    info!(
        "Loaded {} ammo for {} methods from {}",
        set.total_ammo(),
        set.method_count(),
        path.display()
    );
    Ok(set)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, DataError> {
    let file = File::open(path).map_err(|err| DataError::ReadFile {
        path: path.to_path_buf(),
        source: err,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|err| DataError::ParseJson {
        path: path.to_path_buf(),
        source: err,
    })
}
