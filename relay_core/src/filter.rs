//! Sender-side deduplication of console updates.

use serde_json::{Map, Value};

use crate::models::{field_str, zero_pad, ScoreSnapshot};

/// Filters raw console callbacks down to the snapshots worth transmitting.
///
/// The console re-reports full state continuously; only the first update and
/// updates that change at least one displayed field produce a message.
/// Single-threaded by contract (`&mut self`): callers that receive console
/// callbacks concurrently must hold one lock across the compare-update-send
/// sequence.
#[derive(Debug, Default)]
pub struct SenderFilter {
    last_sent: Option<ScoreSnapshot>,
}

impl SenderFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize a raw console state and return it if it differs from the
    /// previously emitted snapshot. Callers transmit on `Some` and stay
    /// silent on `None`.
    pub fn on_update(&mut self, raw_state: &Map<String, Value>) -> Option<ScoreSnapshot> {
        let home = zero_pad(&field_str(raw_state, &["home_score"]).unwrap_or_else(|| "0".into()));
        let guest =
            zero_pad(&field_str(raw_state, &["visitor_score"]).unwrap_or_else(|| "0".into()));
        let clock = field_str(raw_state, &["clock"]).unwrap_or_else(|| "--:--".into());
        let set =
            field_str(raw_state, &["set", "period", "quarter"]).unwrap_or_else(|| "--".into());

        let snapshot = ScoreSnapshot {
            home,
            guest,
            clock,
            set,
        };
        if self.last_sent.as_ref() == Some(&snapshot) {
            return None;
        }
        self.last_sent = Some(snapshot.clone());
        Some(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_first_update_always_emits() {
        let mut filter = SenderFilter::new();
        let snapshot = filter
            .on_update(&raw(json!({
                "home_score": "5", "visitor_score": "3", "clock": "12:34", "set": "1"
            })))
            .unwrap();
        assert_eq!(snapshot.home, "05");
        assert_eq!(snapshot.guest, "03");
        assert_eq!(snapshot.clock, "12:34");
        assert_eq!(snapshot.set, "1");
    }

    #[test]
    fn test_identical_update_is_suppressed() {
        let mut filter = SenderFilter::new();
        let state = raw(json!({
            "home_score": "10", "visitor_score": "8", "clock": "05:00", "set": "2"
        }));
        assert!(filter.on_update(&state).is_some());
        assert!(filter.on_update(&state).is_none());
    }

    #[test]
    fn test_changed_field_emits_again() {
        let mut filter = SenderFilter::new();
        filter.on_update(&raw(json!({"home_score": "10", "visitor_score": "8"})));
        let snapshot = filter
            .on_update(&raw(json!({"home_score": "11", "visitor_score": "8"})))
            .unwrap();
        assert_eq!(snapshot.home, "11");
    }

    #[test]
    fn test_padding_prevents_cosmetic_resend() {
        let mut filter = SenderFilter::new();
        filter.on_update(&raw(json!({"home_score": "5"})));
        // Same score, unpadded vs padded
        assert!(filter.on_update(&raw(json!({"home_score": "05"}))).is_none());
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let mut filter = SenderFilter::new();
        let snapshot = filter.on_update(&raw(json!({}))).unwrap();
        assert_eq!(snapshot.home, "00");
        assert_eq!(snapshot.guest, "00");
        assert_eq!(snapshot.clock, "--:--");
        assert_eq!(snapshot.set, "--");
    }

    #[test]
    fn test_period_and_quarter_fallback() {
        let mut filter = SenderFilter::new();
        let snapshot = filter.on_update(&raw(json!({"quarter": 2}))).unwrap();
        assert_eq!(snapshot.set, "2");

        let snapshot = filter
            .on_update(&raw(json!({"period": "3rd", "quarter": 2})))
            .unwrap();
        assert_eq!(snapshot.set, "3rd");
    }
}
