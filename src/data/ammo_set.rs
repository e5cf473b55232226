use std::collections::BTreeMap;
use std::sync::Arc;

use crate::model::Ammo;

/// Ammo grouped by method path. Methods iterate in path order so runs are
/// reproducible.
#[derive(Debug, Default, Clone)]
pub struct AmmoSet {
    by_method: BTreeMap<String, Vec<Arc<Ammo>>>,
}

impl AmmoSet {
    #[must_use]
    pub fn new(by_method: BTreeMap<String, Vec<Ammo>>) -> Self {
        Self {
            by_method: by_method
                .into_iter()
                .map(|(method, ammo)| (method, ammo.into_iter().map(Arc::new).collect()))
                .collect(),
        }
    }

    /// Every method in the file, including ones with no ammo.
    pub fn methods(&self) -> impl Iterator<Item = (&str, &[Arc<Ammo>])> {
        self.by_method
            .iter()
            .map(|(method, ammo)| (method.as_str(), ammo.as_slice()))
    }

    /// Methods that have at least one ammo entry and will be replayed.
    pub fn loaded_methods(&self) -> impl Iterator<Item = (&str, &[Arc<Ammo>])> {
        self.methods().filter(|(_, ammo)| !ammo.is_empty())
    }

    #[must_use]
    pub fn method_count(&self) -> usize {
        self.by_method.len()
    }

    #[must_use]
    pub fn total_ammo(&self) -> usize {
        self.by_method.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_ammo() == 0
    }
}
