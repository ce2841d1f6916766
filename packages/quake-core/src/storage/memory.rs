//! In-memory marker store for tests.

use std::sync::RwLock;

use async_trait::async_trait;

use super::MarkerStore;
use crate::error::StoreError;
use crate::types::EarthquakeEvent;

/// Marker slot held in memory. Data is lost on drop, so this is only for
/// tests and local experiments.
#[derive(Default)]
pub struct MemoryMarkerStore {
    slot: RwLock<Option<EarthquakeEvent>>,
}

impl MemoryMarkerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed the slot, standing in for a marker left by a previous run.
    pub fn with_marker(event: EarthquakeEvent) -> Self {
        Self {
            slot: RwLock::new(Some(event)),
        }
    }

    pub fn current(&self) -> Option<EarthquakeEvent> {
        self.slot.read().unwrap().clone()
    }
}

#[async_trait]
impl MarkerStore for MemoryMarkerStore {
    async fn load(&self) -> Result<Option<EarthquakeEvent>, StoreError> {
        Ok(self.slot.read().unwrap().clone())
    }

    async fn save(&self, event: &EarthquakeEvent) -> Result<(), StoreError> {
        *self.slot.write().unwrap() = Some(event.clone());
        Ok(())
    }
}
