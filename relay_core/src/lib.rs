//! Relay Core - Shared volleyball scoreboard relay logic.
//!
//! This library provides:
//! - The `ScoreSnapshot` wire message exchanged between the console PC and
//!   the overlay PC (one UDP datagram per change)
//! - Sender-side deduplication of raw console updates
//! - The receiver state machine: per-field change detection, set transitions,
//!   and one-shot set-win triggers under volleyball rules
//! - The sink abstraction that materializes state for the overlay (text
//!   files for OBS in production, in-memory slots in tests)
//!
//! Every message is a full-state snapshot rather than a delta, so a dropped
//! or reordered datagram is corrected by the next one. That property is what
//! lets both services run unattended on a lossy link.

pub mod filter;
pub mod models;
pub mod rules;
pub mod sink;
pub mod tracker;

pub use filter::SenderFilter;
pub use models::ScoreSnapshot;
pub use sink::{FileSink, MemorySink, ScoreboardSink, Slot};
pub use tracker::{ChangeSet, ChangedField, ScoreTracker, TrackerError};
