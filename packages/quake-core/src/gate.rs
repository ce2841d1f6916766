//! Novelty gate: decides whether an extracted event is actually new.
//!
//! Owns the single last-seen marker. An event passes only when its local
//! timestamp is strictly newer than the marker's; the marker is persisted
//! before the event is released to the caller, so a delivery failure
//! downstream never causes a re-notification.

use chrono::Duration;
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::extract::timestamp::parse_ordering_key;
use crate::storage::MarkerStore;
use crate::types::EarthquakeEvent;

/// A suppressed candidate older than the marker by more than this is more
/// likely a page-layout change than a stale row.
const LAYOUT_DRIFT_TOLERANCE_HOURS: i64 = 24;

/// Outcome of a novelty decision.
#[derive(Debug, Clone, PartialEq)]
pub enum GateOutcome {
    /// Strictly newer than anything seen before; marker already persisted.
    Accepted(EarthquakeEvent),
    /// Same event (or older) as the current marker; nothing persisted.
    Suppressed,
}

/// Holds the last-seen marker and gates candidates against it.
///
/// Single writer by design: construct one gate per process and feed it one
/// candidate per tick.
pub struct NoveltyGate<S: MarkerStore> {
    store: S,
    last_seen: Option<EarthquakeEvent>,
}

impl<S: MarkerStore> NoveltyGate<S> {
    /// Build a gate, loading the marker from the store. A missing or corrupt
    /// marker is treated as no history, never as a startup failure.
    pub async fn load(store: S) -> Self {
        let last_seen = match store.load().await {
            Ok(marker) => marker,
            Err(e) => {
                warn!(error = %e, "marker unreadable, starting with no history");
                None
            }
        };
        if let Some(marker) = &last_seen {
            debug!(last_seen = %marker.local_date_time, "marker loaded");
        }
        Self { store, last_seen }
    }

    /// Last event the gate has accepted, if any.
    pub fn last_seen(&self) -> Option<&EarthquakeEvent> {
        self.last_seen.as_ref()
    }

    /// Gate a candidate: persist-and-release when strictly newer than the
    /// marker, suppress otherwise. Unparsable timestamps on either side fail
    /// open, preferring a possible duplicate over a dropped real event.
    pub async fn evaluate(
        &mut self,
        candidate: EarthquakeEvent,
    ) -> Result<GateOutcome, StoreError> {
        if self.is_new(&candidate) {
            self.store.save(&candidate).await?;
            info!(
                local = %candidate.local_date_time,
                magnitude = candidate.magnitude,
                "new event accepted"
            );
            self.last_seen = Some(candidate.clone());
            Ok(GateOutcome::Accepted(candidate))
        } else {
            debug!(local = %candidate.local_date_time, "event already seen, suppressed");
            Ok(GateOutcome::Suppressed)
        }
    }

    fn is_new(&self, candidate: &EarthquakeEvent) -> bool {
        let Some(marker) = &self.last_seen else {
            return true;
        };

        // The marker may have been stored pre-normalization, so both sides
        // go through the same tolerant pattern scan.
        let candidate_key = parse_ordering_key(&candidate.local_date_time);
        let marker_key = parse_ordering_key(&marker.local_date_time);

        match (candidate_key, marker_key) {
            (Some(candidate_at), Some(marker_at)) => {
                if candidate_at > marker_at {
                    true
                } else {
                    if marker_at - candidate_at > Duration::hours(LAYOUT_DRIFT_TOLERANCE_HOURS) {
                        warn!(
                            candidate = %candidate.local_date_time,
                            marker = %marker.local_date_time,
                            "suppressed event is much older than the marker; \
                             the source page layout may have changed"
                        );
                    }
                    false
                }
            }
            _ => {
                warn!(
                    candidate = %candidate.local_date_time,
                    marker = %marker.local_date_time,
                    "timestamp comparison failed, failing open as new"
                );
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryMarkerStore;

    fn event(local: &str) -> EarthquakeEvent {
        EarthquakeEvent {
            local_date_time: local.to_string(),
            utc_date_time: String::new(),
            magnitude: 4.5,
            latitude: 19.0,
            longitude: 98.0,
            depth_km: 10.0,
            phase_count: 8,
            primary_location_name: "เชียงใหม่".to_string(),
            secondary_location_name: "Chiang Mai".to_string(),
            felt_flag: false,
        }
    }

    #[tokio::test]
    async fn first_event_is_accepted_and_persisted() {
        let mut gate = NoveltyGate::load(MemoryMarkerStore::new()).await;
        let outcome = gate.evaluate(event("2024-01-01 09:00:00")).await.unwrap();
        assert!(matches!(outcome, GateOutcome::Accepted(_)));
        assert_eq!(
            gate.last_seen().unwrap().local_date_time,
            "2024-01-01 09:00:00"
        );
    }

    #[tokio::test]
    async fn same_event_twice_is_suppressed_second_time() {
        let mut gate = NoveltyGate::load(MemoryMarkerStore::new()).await;
        let e = event("2024-01-01 09:00:00");

        assert!(matches!(
            gate.evaluate(e.clone()).await.unwrap(),
            GateOutcome::Accepted(_)
        ));
        assert_eq!(gate.evaluate(e).await.unwrap(), GateOutcome::Suppressed);
    }

    #[tokio::test]
    async fn newer_events_are_accepted_in_order() {
        let mut gate = NoveltyGate::load(MemoryMarkerStore::new()).await;

        let a = gate.evaluate(event("2024-01-01 09:00:00")).await.unwrap();
        let b = gate.evaluate(event("2024-01-02 10:00:00")).await.unwrap();
        assert!(matches!(a, GateOutcome::Accepted(_)));
        assert!(matches!(b, GateOutcome::Accepted(_)));
    }

    #[tokio::test]
    async fn older_event_after_newer_is_suppressed() {
        let mut gate = NoveltyGate::load(MemoryMarkerStore::new()).await;

        let b = gate.evaluate(event("2024-01-02 10:00:00")).await.unwrap();
        assert!(matches!(b, GateOutcome::Accepted(_)));
        let a = gate.evaluate(event("2024-01-01 09:00:00")).await.unwrap();
        assert_eq!(a, GateOutcome::Suppressed);
    }

    #[tokio::test]
    async fn marker_from_previous_run_suppresses_the_same_event() {
        let store = MemoryMarkerStore::with_marker(event("2024-01-02 10:00:00"));
        let mut gate = NoveltyGate::load(store).await;

        let outcome = gate.evaluate(event("2024-01-02 10:00:00")).await.unwrap();
        assert_eq!(outcome, GateOutcome::Suppressed);
    }

    #[tokio::test]
    async fn unparsable_candidate_fails_open() {
        let store = MemoryMarkerStore::with_marker(event("2024-01-02 10:00:00"));
        let mut gate = NoveltyGate::load(store).await;

        let outcome = gate.evaluate(event("pending review")).await.unwrap();
        assert!(matches!(outcome, GateOutcome::Accepted(_)));
    }

    #[tokio::test]
    async fn unparsable_marker_fails_open() {
        let store = MemoryMarkerStore::with_marker(event("???"));
        let mut gate = NoveltyGate::load(store).await;

        let outcome = gate.evaluate(event("2024-01-02 10:00:00")).await.unwrap();
        assert!(matches!(outcome, GateOutcome::Accepted(_)));
    }

    #[tokio::test]
    async fn marker_stored_pre_normalization_still_compares() {
        // Older marker files carry the merged cell text verbatim.
        let store = MemoryMarkerStore::with_marker(event(
            "2024-01-02 10:00:002024-01-02 03:00:00 UTC",
        ));
        let mut gate = NoveltyGate::load(store).await;

        let same = gate.evaluate(event("2024-01-02 10:00:00")).await.unwrap();
        assert_eq!(same, GateOutcome::Suppressed);

        let newer = gate.evaluate(event("2024-01-02 11:00:00")).await.unwrap();
        assert!(matches!(newer, GateOutcome::Accepted(_)));
    }

    #[tokio::test]
    async fn suppression_does_not_touch_the_store() {
        let store = MemoryMarkerStore::with_marker(event("2024-01-02 10:00:00"));
        let mut gate = NoveltyGate::load(store).await;

        gate.evaluate(event("2024-01-01 09:00:00")).await.unwrap();
        // Marker still the original one.
        assert_eq!(
            gate.last_seen().unwrap().local_date_time,
            "2024-01-02 10:00:00"
        );
    }
}
