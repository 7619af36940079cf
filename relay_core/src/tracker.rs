//! Receiver state machine: change detection and set-win triggers.
//!
//! Every datagram carries full scoreboard state, so the tracker never
//! interprets deltas: it diffs each normalized field against the stored
//! value, writes only what changed, and evaluates volleyball set-win rules
//! with one-shot triggers per set per side.

use std::fmt;
use std::io;

use log::debug;
use serde_json::Value;
use thiserror::Error;

use crate::models::{field_str, summary_line, zero_pad};
use crate::rules::{coerce_score, derive_set_number, wins_set};
use crate::sink::{ScoreboardSink, Slot};

/// Authoritative last-known scoreboard state.
///
/// All fields start unset so the first message materializes everything.
/// The fired flags are only meaningful within the set they were raised in;
/// any set transition clears both before win rules run for that message.
#[derive(Debug, Default)]
struct MatchState {
    home_score: Option<String>,
    visitor_score: Option<String>,
    clock: Option<String>,
    current_set_number: Option<u32>,
    current_set_raw: Option<String>,
    local_set_win_fired: bool,
    visitor_set_win_fired: bool,
}

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("payload is not a JSON object")]
    NotAnObject,
    #[error("sink write failed: {0}")]
    Sink(#[from] io::Error),
}

/// One field-level change detected while processing a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangedField {
    Home,
    Visitor,
    Clock,
    Set { number: u32, raw: String },
    HomeSetWin { set_number: u32 },
    VisitorSetWin { set_number: u32 },
}

impl fmt::Display for ChangedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangedField::Home => write!(f, "home"),
            ChangedField::Visitor => write!(f, "visit"),
            ChangedField::Clock => write!(f, "timer"),
            ChangedField::Set { number, raw } => {
                write!(f, "set (new set: {number} / raw: {raw})")
            }
            ChangedField::HomeSetWin { set_number } => {
                write!(f, "local_set_win (SET {set_number} WIN)")
            }
            ChangedField::VisitorSetWin { set_number } => {
                write!(f, "visit_set_win (SET {set_number} WIN)")
            }
        }
    }
}

/// Outcome of one processed message.
#[derive(Debug)]
pub struct ChangeSet {
    /// Fields that changed, in detection order. Empty means the snapshot
    /// matched stored state and nothing was materialized.
    pub fields: Vec<ChangedField>,
    /// Composite summary of the state after this message.
    pub summary: String,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Comma-joined change names for log output.
    pub fn describe(&self) -> String {
        self.fields
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Consumes normalized wire messages and materializes changed state.
pub struct ScoreTracker<S: ScoreboardSink> {
    state: MatchState,
    sink: S,
}

impl<S: ScoreboardSink> ScoreTracker<S> {
    pub fn new(sink: S) -> Self {
        Self {
            state: MatchState::default(),
            sink,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Process one datagram to completion.
    ///
    /// Decode failures leave state and sinks untouched; the caller logs the
    /// error and moves on to the next message.
    pub fn on_message(&mut self, raw: &[u8]) -> Result<ChangeSet, TrackerError> {
        let text = String::from_utf8_lossy(raw);
        let value: Value = serde_json::from_str(&text)?;
        let payload = value.as_object().ok_or(TrackerError::NotAnObject)?;

        let home =
            zero_pad(&field_str(payload, &["home", "home_score"]).unwrap_or_else(|| "0".into()));
        let visitor = zero_pad(
            &field_str(payload, &["guest", "visitor", "visitor_score"])
                .unwrap_or_else(|| "0".into()),
        );
        let clock = field_str(payload, &["clock", "time"]).unwrap_or_else(|| "--:--".into());
        let set_raw =
            field_str(payload, &["set", "period", "quarter"]).unwrap_or_else(|| "1".into());
        let set_number = derive_set_number(&set_raw);

        let mut fields = Vec::new();

        if self.state.home_score.as_deref() != Some(home.as_str()) {
            self.sink.write_slot(Slot::HomeScore, &home)?;
            self.state.home_score = Some(home.clone());
            fields.push(ChangedField::Home);
        }
        if self.state.visitor_score.as_deref() != Some(visitor.as_str()) {
            self.sink.write_slot(Slot::VisitorScore, &visitor)?;
            self.state.visitor_score = Some(visitor.clone());
            fields.push(ChangedField::Visitor);
        }
        if self.state.clock.as_deref() != Some(clock.as_str()) {
            self.sink.write_slot(Slot::Clock, &clock)?;
            self.state.clock = Some(clock.clone());
            fields.push(ChangedField::Clock);
        }

        // A set boundary (numeric or cosmetic text change) resets the win
        // triggers even when no win had fired, so the overlay always sees a
        // clean "0" at the start of a set.
        if self.state.current_set_number != Some(set_number)
            || self.state.current_set_raw.as_deref() != Some(set_raw.as_str())
        {
            self.state.current_set_number = Some(set_number);
            self.state.current_set_raw = Some(set_raw.clone());
            // The set slot carries only the derived number
            self.sink.write_slot(Slot::SetNumber, &set_number.to_string())?;

            self.state.local_set_win_fired = false;
            self.state.visitor_set_win_fired = false;
            self.sink.write_slot(Slot::HomeSetWin, "0")?;
            self.sink.write_slot(Slot::VisitorSetWin, "0")?;

            fields.push(ChangedField::Set {
                number: set_number,
                raw: set_raw,
            });
        }

        // Win rules run on every message; the fired flags keep each trigger
        // to one emission per set per side.
        let home_points = coerce_score(&home);
        let visitor_points = coerce_score(&visitor);

        if wins_set(home_points, visitor_points, set_number) && !self.state.local_set_win_fired {
            self.sink
                .write_slot(Slot::HomeSetWin, &format!("SET {set_number} WIN"))?;
            self.state.local_set_win_fired = true;
            fields.push(ChangedField::HomeSetWin { set_number });
        }
        if wins_set(visitor_points, home_points, set_number) && !self.state.visitor_set_win_fired {
            self.sink
                .write_slot(Slot::VisitorSetWin, &format!("SET {set_number} WIN"))?;
            self.state.visitor_set_win_fired = true;
            fields.push(ChangedField::VisitorSetWin { set_number });
        }

        let summary = summary_line(&home, &visitor, &clock, &set_number.to_string());
        if fields.is_empty() {
            debug!("Snapshot matched stored state, nothing to write");
        } else {
            self.sink.write_slot(Slot::SummaryLine, &summary)?;
            self.sink
                .write_slot(Slot::RawPayload, &serde_json::to_string_pretty(&value)?)?;
        }

        Ok(ChangeSet { fields, summary })
    }
}
