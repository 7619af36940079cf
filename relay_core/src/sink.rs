//! Materialization sinks for the overlay.
//!
//! The receiver writes each piece of state into a named slot; the physical
//! medium is behind the `ScoreboardSink` trait. Production uses `FileSink`
//! (one text file per slot, the layout the OBS scenes reference); tests use
//! `MemorySink`.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

/// The output slots the overlay consumes. Each write replaces the slot's
/// entire value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    HomeScore,
    VisitorScore,
    Clock,
    SetNumber,
    SummaryLine,
    RawPayload,
    HomeSetWin,
    VisitorSetWin,
}

impl Slot {
    /// File name used by `FileSink`.
    pub fn file_name(&self) -> &'static str {
        match self {
            Slot::HomeScore => "home.txt",
            Slot::VisitorScore => "visit.txt",
            Slot::Clock => "timer.txt",
            Slot::SetNumber => "set.txt",
            Slot::SummaryLine => "line.txt",
            Slot::RawPayload => "raw.json",
            Slot::HomeSetWin => "local_set_win.txt",
            Slot::VisitorSetWin => "visit_set_win.txt",
        }
    }
}

/// Destination for scoreboard state: one value per slot, overwritten in full.
pub trait ScoreboardSink {
    fn write_slot(&mut self, slot: Slot, value: &str) -> io::Result<()>;
}

/// One text file per slot under a base directory.
pub struct FileSink {
    base_dir: PathBuf,
}

impl FileSink {
    /// Create the base directory and initialize both win triggers to "0" so
    /// the overlay starts from a known-neutral state.
    pub fn new(base_dir: impl Into<PathBuf>) -> io::Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir)?;
        let mut sink = Self { base_dir };
        sink.write_slot(Slot::HomeSetWin, "0")?;
        sink.write_slot(Slot::VisitorSetWin, "0")?;
        Ok(sink)
    }

    pub fn path_for(&self, slot: Slot) -> PathBuf {
        self.base_dir.join(slot.file_name())
    }
}

impl ScoreboardSink for FileSink {
    fn write_slot(&mut self, slot: Slot, value: &str) -> io::Result<()> {
        fs::write(self.path_for(slot), value)
    }
}

/// In-memory sink for tests: keeps latest values plus the full write history.
#[derive(Debug, Default)]
pub struct MemorySink {
    values: HashMap<Slot, String>,
    writes: Vec<(Slot, String)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest value written to `slot`, if any.
    pub fn get(&self, slot: Slot) -> Option<&str> {
        self.values.get(&slot).map(String::as_str)
    }

    pub fn write_count(&self) -> usize {
        self.writes.len()
    }

    /// Every write in order, for asserting reset-then-fire sequences.
    pub fn writes(&self) -> &[(Slot, String)] {
        &self.writes
    }
}

impl ScoreboardSink for MemorySink {
    fn write_slot(&mut self, slot: Slot, value: &str) -> io::Result<()> {
        self.values.insert(slot, value.to_string());
        self.writes.push((slot, value.to_string()));
        Ok(())
    }
}
