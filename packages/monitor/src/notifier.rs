//! Alert formatting and delivery.
//!
//! Formatting is kept pure so the threshold and message-shape rules are
//! testable without touching the network; `notify` is a thin wrapper around
//! the Telegram client.

use quake_core::{EarthquakeEvent, Severity};
use telegram::{InlineKeyboardMarkup, TelegramClient, TelegramError};
use tracing::{debug, info};

pub struct Notifier {
    client: TelegramClient,
    /// Events below this magnitude are recorded as seen but not delivered.
    min_magnitude: f64,
    /// Source page, linked from every alert.
    source_url: String,
}

impl Notifier {
    pub fn new(client: TelegramClient, min_magnitude: f64, source_url: String) -> Self {
        Self {
            client,
            min_magnitude,
            source_url,
        }
    }

    /// Deliver an alert for `event` if it meets the magnitude threshold.
    /// Returns whether delivery was attempted.
    pub async fn notify(&self, event: &EarthquakeEvent) -> Result<bool, TelegramError> {
        if !should_deliver(event.magnitude, self.min_magnitude) {
            debug!(
                magnitude = event.magnitude,
                threshold = self.min_magnitude,
                "below delivery threshold, skipping notification"
            );
            return Ok(false);
        }

        let text = format_message(event);
        let buttons = action_links(event, &self.source_url);
        let message = self.client.send_message(&text, Some(buttons)).await?;
        info!(
            message_id = message.message_id,
            local = %event.local_date_time,
            "alert delivered"
        );
        Ok(true)
    }
}

pub fn should_deliver(magnitude: f64, min_magnitude: f64) -> bool {
    magnitude >= min_magnitude
}

fn severity_emoji(severity: Severity) -> &'static str {
    match severity {
        Severity::Great => "🔴",
        Severity::Major => "🟠",
        Severity::Strong => "🟡",
        Severity::Moderate => "🟢",
        Severity::Light => "⚪",
    }
}

pub fn format_message(event: &EarthquakeEvent) -> String {
    let emoji = severity_emoji(Severity::from_magnitude(event.magnitude));
    let felt_line = if event.felt_flag {
        "⚠️ *Felt in the area*\n\n"
    } else {
        ""
    };
    let location = if event.secondary_location_name.is_empty() {
        event.primary_location_name.clone()
    } else {
        format!(
            "{}\n{}",
            event.primary_location_name, event.secondary_location_name
        )
    };

    format!(
        "{emoji} *New Earthquake Alert!*\n\n\
         {felt_line}\
         *Magnitude:* {magnitude:.1}\n\
         *Location:* {location}\n\
         *Depth:* {depth:.1} km\n\
         *Local time:* {local}\n\
         *UTC time:* {utc}\n\
         *Coordinates:* {lat:.4}°N, {lon:.4}°E\n\
         *Phases:* {phases}\n\n\
         Source: TMD Earthquake Monitoring",
        magnitude = event.magnitude,
        depth = event.depth_km,
        local = event.local_date_time,
        utc = event.utc_date_time,
        lat = event.latitude,
        lon = event.longitude,
        phases = event.phase_count,
    )
}

fn action_links(event: &EarthquakeEvent, source_url: &str) -> InlineKeyboardMarkup {
    let map_url = format!(
        "https://maps.google.com/?q={:.4},{:.4}",
        event.latitude, event.longitude
    );
    InlineKeyboardMarkup::link_row([
        ("View on map".to_string(), map_url),
        ("TMD source".to_string(), source_url.to_string()),
    ])
}
