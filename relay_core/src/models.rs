//! Wire message and field-extraction helpers shared by both services.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Normalized scoreboard snapshot, sent as one UDP datagram per change.
///
/// Scores are zero-padded 2-digit strings; `clock` and `set` are opaque
/// display text from the console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSnapshot {
    pub home: String,
    pub guest: String,
    pub clock: String,
    pub set: String,
}

impl ScoreSnapshot {
    /// Console-log line in the same format as the overlay's `line.txt`.
    pub fn summary_line(&self) -> String {
        summary_line(&self.home, &self.guest, &self.clock, &self.set)
    }
}

/// Composite one-line summary of the full scoreboard state.
pub fn summary_line(home: &str, guest: &str, clock: &str, set: &str) -> String {
    format!("HOME {home} - {guest} VISIT  |  T: {clock}  |  SET: {set}")
}

/// Left-pad a score string with zeros to two digits ("5" -> "05").
///
/// Applied before any comparison so a console that alternates padded and
/// unpadded scores never registers spurious changes.
pub fn zero_pad(score: &str) -> String {
    format!("{score:0>2}")
}

/// Look up the first usable key in `keys`, coercing JSON scalars to text.
///
/// Empty strings count as absent so indicators like `"set": ""` fall
/// through to `period`/`quarter`.
pub fn field_str(payload: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    for key in keys {
        match payload.get(*key) {
            Some(Value::String(s)) if !s.is_empty() => return Some(s.clone()),
            Some(Value::Number(n)) => return Some(n.to_string()),
            Some(Value::Bool(b)) => return Some(b.to_string()),
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_zero_pad() {
        assert_eq!(zero_pad("5"), "05");
        assert_eq!(zero_pad("05"), "05");
        assert_eq!(zero_pad("105"), "105");
        assert_eq!(zero_pad(""), "00");
    }

    #[test]
    fn test_field_str_fallback_chain() {
        let payload = obj(json!({"period": "3", "quarter": "4"}));
        assert_eq!(
            field_str(&payload, &["set", "period", "quarter"]),
            Some("3".to_string())
        );
    }

    #[test]
    fn test_field_str_empty_string_falls_through() {
        let payload = obj(json!({"set": "", "period": "2nd"}));
        assert_eq!(
            field_str(&payload, &["set", "period", "quarter"]),
            Some("2nd".to_string())
        );
    }

    #[test]
    fn test_field_str_coerces_numbers() {
        let payload = obj(json!({"home_score": 7}));
        assert_eq!(field_str(&payload, &["home_score"]), Some("7".to_string()));
    }

    #[test]
    fn test_field_str_missing() {
        let payload = obj(json!({}));
        assert_eq!(field_str(&payload, &["clock", "time"]), None);
    }

    #[test]
    fn test_summary_line_format() {
        assert_eq!(
            summary_line("05", "03", "12:34", "2"),
            "HOME 05 - 03 VISIT  |  T: 12:34  |  SET: 2"
        );
    }

    #[test]
    fn test_snapshot_wire_roundtrip() {
        let snapshot = ScoreSnapshot {
            home: "25".to_string(),
            guest: "23".to_string(),
            clock: "--:--".to_string(),
            set: "3rd".to_string(),
        };
        let bytes = serde_json::to_vec(&snapshot).unwrap();
        let decoded: ScoreSnapshot = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(decoded, snapshot);
    }
}
