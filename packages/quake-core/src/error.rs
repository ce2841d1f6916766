//! Typed errors for extraction and marker persistence.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so callers can match
//! on the failure class: transport, page structure, or a single bad cell.

use thiserror::Error;

/// Errors produced while fetching and parsing the event page.
///
/// The variants map onto distinct operator responses: `Fetch`/`Status` are
/// transient network conditions, `TableNotFound`/`NoEventRows` mean the page
/// markup drifted, and `Field`/`MissingColumn` mean one cell of an otherwise
/// recognizable row could not be converted.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Transport-level HTTP failure (DNS, connect, timeout, body read).
    #[error("fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The server answered, but not with a 2xx.
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// No table matched any of the ordered locator strategies.
    #[error("event table not found by any selector strategy")]
    TableNotFound,

    /// The table matched but contained no event rows.
    #[error("event table contains no data rows")]
    NoEventRows,

    /// A required cell failed conversion. Carries the raw cell text so the
    /// log line is enough to diagnose markup drift.
    #[error("could not parse {column} from {raw:?}")]
    Field { column: &'static str, raw: String },

    /// The row had fewer cells than the fixed column layout requires.
    #[error("row is missing the {column} column")]
    MissingColumn { column: &'static str },
}

impl ScrapeError {
    /// True for the markup-drift class of failures (table or rows missing).
    pub fn is_structural(&self) -> bool {
        matches!(self, ScrapeError::TableNotFound | ScrapeError::NoEventRows)
    }
}

/// Errors from the durable marker store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("marker I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("marker serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
