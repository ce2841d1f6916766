//! Extraction pipeline: fetch the TMD event page, locate the table, parse
//! the newest row into an [`EarthquakeEvent`].

pub mod fields;
pub mod location;
pub mod table;
pub mod timestamp;

use std::time::Duration;

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use crate::error::ScrapeError;
use crate::types::EarthquakeEvent;

/// Request timeout for the source-page fetch.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// The TMD site answers plain clients inconsistently; a browser-like UA
/// keeps the table markup stable.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Fetches the earthquake page and parses the latest event row.
///
/// Stateless apart from the HTTP client; all durable state belongs to the
/// novelty gate.
pub struct Extractor {
    client: reqwest::Client,
    url: String,
}

impl Extractor {
    pub fn new(url: impl Into<String>) -> Result<Self, ScrapeError> {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Fetch the source page and extract the latest event.
    pub async fn extract(&self) -> Result<EarthquakeEvent, ScrapeError> {
        let html = self.fetch().await?;
        parse_latest_event(&html)
    }

    async fn fetch(&self) -> Result<String, ScrapeError> {
        debug!(url = %self.url, "fetching event page");
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        Ok(response.text().await?)
    }
}

/// Parse the newest event row out of a raw HTML document.
///
/// Split out from the fetch so fixtures can exercise the whole parsing path
/// without a network.
pub fn parse_latest_event(html: &str) -> Result<EarthquakeEvent, ScrapeError> {
    let document = Html::parse_document(html);

    let table = table::locate_event_table(&document).ok_or(ScrapeError::TableNotFound)?;

    let rows = table::event_rows(table);
    let latest = rows.first().copied().ok_or(ScrapeError::NoEventRows)?;
    if rows.len() > 1 {
        debug!(rows = rows.len(), "taking first (newest) event row");
    }

    parse_event_row(latest)
}

/// Fixed column order of the source table.
const COLUMNS: [&str; 7] = [
    "timestamp",
    "magnitude",
    "latitude",
    "longitude",
    "depth",
    "phase count",
    "location",
];

fn parse_event_row(row: ElementRef) -> Result<EarthquakeEvent, ScrapeError> {
    let td = Selector::parse("td").expect("static selector");
    let cells: Vec<ElementRef> = row.select(&td).collect();

    let cell = |index: usize| -> Result<ElementRef, ScrapeError> {
        cells
            .get(index)
            .copied()
            .ok_or(ScrapeError::MissingColumn { column: COLUMNS[index] })
    };

    let (local_date_time, utc_date_time) = fields::parse_timestamp_cell(cell(0)?)?;
    let magnitude = fields::parse_magnitude(cell(1)?)?;
    let latitude = fields::parse_degrees(cell(2)?, "latitude", "°N")?;
    let longitude = fields::parse_degrees(cell(3)?, "longitude", "°E")?;
    let depth_km = fields::parse_depth_km(cell(4)?)?;
    let phase_count = fields::parse_phase_count(cell(5)?)?;
    let (primary_location_name, secondary_location_name) = fields::parse_location_cell(cell(6)?);
    let felt_flag = fields::row_has_felt_icon(row);

    if timestamp::parse_ordering_key(&local_date_time).is_none() {
        // Still a usable record for display, but the gate will have to fail
        // open on it; worth a trace at extraction time.
        warn!(local = %local_date_time, "local timestamp did not match the expected pattern");
    }

    Ok(EarthquakeEvent {
        local_date_time,
        utc_date_time,
        magnitude,
        latitude,
        longitude,
        depth_km,
        phase_count,
        primary_location_name,
        secondary_location_name,
        felt_flag,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_row(datetime: &str, magnitude: &str) -> String {
        format!(
            r#"<tr class="tbis_leq1">
                <td>{datetime}<p style="font-size:10px">2024-01-02 03:00:00 UTC</p></td>
                <td><b>{magnitude}</b></td>
                <td>19.1234°N</td>
                <td>98.5678°E</td>
                <td>10.0</td>
                <td>12</td>
                <td><span class="style10">เชียงใหม่ Chiang Mai</span></td>
            </tr>"#
        )
    }

    fn fixture_page(rows: &str) -> String {
        format!(r#"<html><body><table class="tbis" id="table_inside">{rows}</table></body></html>"#)
    }

    #[test]
    fn parses_a_complete_row() {
        let html = fixture_page(&fixture_row("2024-01-02 10:00:00", "6.2"));
        let event = parse_latest_event(&html).unwrap();

        assert_eq!(event.local_date_time, "2024-01-02 10:00:00");
        assert_eq!(event.utc_date_time, "2024-01-02 03:00:00 UTC");
        assert_eq!(event.magnitude, 6.2);
        assert_eq!(event.latitude, 19.1234);
        assert_eq!(event.longitude, 98.5678);
        assert_eq!(event.depth_km, 10.0);
        assert_eq!(event.phase_count, 12);
        assert_eq!(event.primary_location_name, "เชียงใหม่");
        assert_eq!(event.secondary_location_name, "Chiang Mai");
        assert!(!event.felt_flag);
    }

    #[test]
    fn takes_only_the_first_row() {
        let rows = format!(
            "{}{}",
            fixture_row("2024-01-02 10:00:00", "6.2"),
            fixture_row("2024-01-01 09:00:00", "3.1"),
        );
        let event = parse_latest_event(&fixture_page(&rows)).unwrap();
        assert_eq!(event.local_date_time, "2024-01-02 10:00:00");
        assert_eq!(event.magnitude, 6.2);
    }

    #[test]
    fn missing_table_is_structural() {
        let err = parse_latest_event("<html><body><p>maintenance</p></body></html>").unwrap_err();
        assert!(matches!(err, ScrapeError::TableNotFound));
        assert!(err.is_structural());
    }

    #[test]
    fn table_without_event_rows_is_structural() {
        let html = fixture_page(r#"<tr class="tbis1"><th>Date</th></tr>"#);
        let err = parse_latest_event(&html).unwrap_err();
        assert!(matches!(err, ScrapeError::NoEventRows));
        assert!(err.is_structural());
    }

    #[test]
    fn truncated_row_reports_the_missing_column() {
        let html = fixture_page(
            r#"<tr class="tbis_leq1"><td>2024-01-02 10:00:00</td><td>4.5</td></tr>"#,
        );
        let err = parse_latest_event(&html).unwrap_err();
        assert!(matches!(
            err,
            ScrapeError::MissingColumn { column: "latitude" }
        ));
    }

    #[test]
    fn malformed_magnitude_fails_the_record() {
        let html = fixture_page(&fixture_row("2024-01-02 10:00:00", "N/A"));
        let err = parse_latest_event(&html).unwrap_err();
        assert!(matches!(err, ScrapeError::Field { column: "magnitude", .. }));
    }

    #[test]
    fn felt_icon_sets_the_flag() {
        let row = fixture_row("2024-01-02 10:00:00", "4.8").replace(
            "<td>12</td>",
            r#"<td>12 <img src="images/icon_peq2.png"></td>"#,
        );
        let event = parse_latest_event(&fixture_page(&row)).unwrap();
        assert!(event.felt_flag);
    }
}
