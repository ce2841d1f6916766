//! Durable storage seam for the last-seen marker.
//!
//! The marker is a single-slot record, not a log: one `EarthquakeEvent` or
//! nothing. The trait exists so the gate can be tested against an in-memory
//! backend instead of the real filesystem path.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::types::EarthquakeEvent;

pub mod file;
pub mod memory;

pub use file::FileMarkerStore;
pub use memory::MemoryMarkerStore;

/// Read/write access to the single last-seen marker slot.
#[async_trait]
pub trait MarkerStore: Send + Sync {
    /// Load the marker, `None` when no history exists.
    async fn load(&self) -> Result<Option<EarthquakeEvent>, StoreError>;

    /// Overwrite the marker with a new event.
    async fn save(&self, event: &EarthquakeEvent) -> Result<(), StoreError>;
}
