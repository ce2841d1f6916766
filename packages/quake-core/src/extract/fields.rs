//! Cell-level field parsers for one event row.
//!
//! Column layout is fixed on the source page; each parser takes its own cell
//! and converts defensively, reporting the raw text on failure instead of
//! guessing.

use scraper::{ElementRef, Selector};

use super::location::split_location;
use super::timestamp::scan_timestamps;
use crate::error::ScrapeError;

/// Large magnitudes are wrapped in `<b>` on the source page.
const BOLD: &str = "b";
/// The UTC time lives in a small-print paragraph inside the timestamp cell.
const UTC_SUBELEMENT: &str = r#"p[style="font-size:10px"]"#;
/// English location text is wrapped in this span when present.
const LOCATION_SPAN: &str = "span.style10";
/// Icon marking an event that was felt by people.
const FELT_ICON: &str = r#"img[src="images/icon_peq2.png"]"#;

/// Concatenated text of every descendant text node, untrimmed.
///
/// Trimming is left to the callers: the location splitter needs embedded
/// line breaks intact.
fn raw_text(cell: ElementRef) -> String {
    cell.text().collect()
}

fn select_first<'a>(cell: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    cell.select(&selector).next()
}

/// Extract `(local, utc)` timestamp strings from the merged timestamp cell.
///
/// The cell usually concatenates two `YYYY-MM-DD HH:MM:SS` values with no
/// separator; pattern scanning is the only reliable way apart. When the scan
/// finds nothing at all, fall back to text-before-newline plus the nested
/// small-print element, which must tolerate either being absent.
pub fn parse_timestamp_cell(cell: ElementRef) -> Result<(String, String), ScrapeError> {
    let text = raw_text(cell);
    let matches = scan_timestamps(&text);

    let (local, utc) = if let Some(first) = matches.first() {
        let utc = if matches.len() > 1 && text.contains("UTC") {
            format!("{} UTC", matches[1])
        } else {
            select_first(cell, UTC_SUBELEMENT)
                .map(|p| raw_text(p).trim().to_string())
                .unwrap_or_default()
        };
        (first.clone(), utc)
    } else {
        let local = text.split('\n').next().unwrap_or("").trim().to_string();
        let utc = select_first(cell, UTC_SUBELEMENT)
            .map(|p| raw_text(p).trim().to_string())
            .unwrap_or_default();
        (local, utc)
    };

    if local.is_empty() {
        return Err(ScrapeError::Field {
            column: "local timestamp",
            raw: text.trim().to_string(),
        });
    }
    Ok((local, utc))
}

/// Magnitude, preferring the `<b>` sub-element the page uses to highlight
/// strong events. Stray `b>` markup remnants are stripped before conversion;
/// a value that still fails to convert is fatal for the record.
pub fn parse_magnitude(cell: ElementRef) -> Result<f64, ScrapeError> {
    let text = match select_first(cell, BOLD) {
        Some(bold) => raw_text(bold),
        None => raw_text(cell),
    };
    let cleaned = text.replace("b>", "");
    let cleaned = cleaned.trim();
    cleaned.parse().map_err(|_| ScrapeError::Field {
        column: "magnitude",
        raw: cleaned.to_string(),
    })
}

/// Decimal degrees with the hemisphere suffix (`°N` / `°E`) stripped.
pub fn parse_degrees(
    cell: ElementRef,
    column: &'static str,
    suffix: &str,
) -> Result<f64, ScrapeError> {
    let text = raw_text(cell);
    let cleaned = text.trim().trim_end_matches(suffix).trim();
    cleaned.parse().map_err(|_| ScrapeError::Field {
        column,
        raw: text.trim().to_string(),
    })
}

pub fn parse_depth_km(cell: ElementRef) -> Result<f64, ScrapeError> {
    let text = raw_text(cell);
    text.trim().parse().map_err(|_| ScrapeError::Field {
        column: "depth",
        raw: text.trim().to_string(),
    })
}

pub fn parse_phase_count(cell: ElementRef) -> Result<u32, ScrapeError> {
    let text = raw_text(cell);
    text.trim().parse().map_err(|_| ScrapeError::Field {
        column: "phase count",
        raw: text.trim().to_string(),
    })
}

/// Bilingual location, preferring the styled span over the whole cell.
pub fn parse_location_cell(cell: ElementRef) -> (String, String) {
    let text = match select_first(cell, LOCATION_SPAN) {
        Some(span) => raw_text(span),
        None => raw_text(cell),
    };
    split_location(&text)
}

/// True when the row carries the "felt" indicator icon.
pub fn row_has_felt_icon(row: ElementRef) -> bool {
    select_first(row, FELT_ICON).is_some()
}
