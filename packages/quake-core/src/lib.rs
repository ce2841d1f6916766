//! Extraction and novelty detection for the TMD earthquake page.
//!
//! Two components, consumed leaf-first:
//!
//! - [`Extractor`] fetches the page, locates the event table through an
//!   ordered chain of selector strategies, and parses the newest row into an
//!   [`EarthquakeEvent`].
//! - [`NoveltyGate`] compares a candidate against the durable last-seen
//!   marker and releases it only when strictly newer.
//!
//! Delivery, scheduling, and configuration live in the `monitor` binary.

pub mod error;
pub mod extract;
pub mod gate;
pub mod storage;
pub mod types;

pub use error::{ScrapeError, StoreError};
pub use extract::{parse_latest_event, Extractor};
pub use gate::{GateOutcome, NoveltyGate};
pub use storage::{FileMarkerStore, MarkerStore, MemoryMarkerStore};
pub use types::{EarthquakeEvent, Severity};
