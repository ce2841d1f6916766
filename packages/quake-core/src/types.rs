use serde::{Deserialize, Serialize};

/// One seismic reading parsed from the TMD event table.
///
/// Serialized field names are the canonical keys of the durable marker file,
/// so renaming a field here is a storage format change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EarthquakeEvent {
    /// Local (Thai) timestamp, `YYYY-MM-DD HH:MM:SS`. Primary ordering key.
    pub local_date_time: String,
    /// UTC timestamp text, best-effort. Display only.
    pub utc_date_time: String,
    pub magnitude: f64,
    /// Decimal degrees, north-positive.
    pub latitude: f64,
    /// Decimal degrees, east-positive.
    pub longitude: f64,
    pub depth_km: f64,
    /// Number of seismograph stations that registered the event.
    pub phase_count: u32,
    /// Thai location text.
    pub primary_location_name: String,
    /// Transliterated/English location text, empty when the row has none.
    pub secondary_location_name: String,
    /// True when the row carries the "felt" indicator icon.
    pub felt_flag: bool,
}

/// Alert severity bands, derived from magnitude by fixed thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Light,
    Moderate,
    Strong,
    Major,
    Great,
}

impl Severity {
    pub fn from_magnitude(magnitude: f64) -> Self {
        if magnitude >= 7.0 {
            Severity::Great
        } else if magnitude >= 6.0 {
            Severity::Major
        } else if magnitude >= 5.0 {
            Severity::Strong
        } else if magnitude >= 4.0 {
            Severity::Moderate
        } else {
            Severity::Light
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_thresholds() {
        assert_eq!(Severity::from_magnitude(7.2), Severity::Great);
        assert_eq!(Severity::from_magnitude(7.0), Severity::Great);
        assert_eq!(Severity::from_magnitude(6.9), Severity::Major);
        assert_eq!(Severity::from_magnitude(5.5), Severity::Strong);
        assert_eq!(Severity::from_magnitude(4.0), Severity::Moderate);
        assert_eq!(Severity::from_magnitude(3.9), Severity::Light);
    }

    #[test]
    fn marker_json_uses_canonical_keys() {
        let event = EarthquakeEvent {
            local_date_time: "2024-01-02 10:00:00".to_string(),
            utc_date_time: "2024-01-02 03:00:00 UTC".to_string(),
            magnitude: 4.5,
            latitude: 19.1234,
            longitude: 98.5678,
            depth_km: 10.0,
            phase_count: 12,
            primary_location_name: "เชียงใหม่".to_string(),
            secondary_location_name: "Chiang Mai".to_string(),
            felt_flag: false,
        };

        let json = serde_json::to_value(&event).unwrap();
        for key in [
            "LocalDateTime",
            "UtcDateTime",
            "Magnitude",
            "Latitude",
            "Longitude",
            "DepthKm",
            "PhaseCount",
            "PrimaryLocationName",
            "SecondaryLocationName",
            "FeltFlag",
        ] {
            assert!(json.get(key).is_some(), "missing key {key}");
        }
    }
}
