use std::sync::Arc;

use tracing::{debug, warn};

use crate::data::{AmmoSet, ReferenceDataset};
use crate::metrics::{StatHandle, StatTable};
use crate::model::Ammo;
use crate::validate::{EndpointKind, EndpointMap};

/// What the driver replays for one method.
#[derive(Debug, Clone)]
pub struct MethodPlan {
    pub method: String,
    pub stat: StatHandle,
    pub endpoint: EndpointKind,
    pub ammo: Vec<Arc<Ammo>>,
}

/// Everything workers share for the whole run. Built once, then read-only
/// apart from the lock-guarded stats.
#[derive(Debug)]
pub struct RunContext {
    dataset: ReferenceDataset,
    stats: StatTable,
    methods: Vec<MethodPlan>,
}

impl RunContext {
    /// Registers one stat per method that has ammo. Methods without ammo are
    /// skipped and get no stat.
    #[must_use]
    pub fn new(dataset: ReferenceDataset, ammo: &AmmoSet, endpoints: &EndpointMap) -> Self {
        let mut stats = StatTable::new();
        let mut methods = Vec::new();
        for (method, entries) in ammo.loaded_methods() {
            let endpoint = endpoints.resolve(method);
            if endpoint == EndpointKind::Unvalidated {
                warn!(
                    "No content validator for {}; checking transport and status only.",
                    method
                );
            }
            methods.push(MethodPlan {
                method: method.to_owned(),
                stat: stats.register(method),
                endpoint,
                ammo: entries.to_vec(),
            });
        }
        let skipped = ammo.method_count().saturating_sub(methods.len());
        if skipped > 0 {
            debug!("Skipping {} methods without ammo", skipped);
        }
        Self {
            dataset,
            stats,
            methods,
        }
    }

    #[must_use]
    pub const fn dataset(&self) -> &ReferenceDataset {
        &self.dataset
    }

    #[must_use]
    pub const fn stats(&self) -> &StatTable {
        &self.stats
    }

    #[must_use]
    pub fn methods(&self) -> &[MethodPlan] {
        &self.methods
    }
}
