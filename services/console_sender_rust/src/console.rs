//! Source adapter for the scoring console.
//!
//! The Daktronics serial reader is an external collaborator: anything that
//! can push raw state maps into the update channel can drive the sender.
//! `StdinConsole` bridges one JSON object per line, which is what the serial
//! shim emits.

use anyhow::Result;
use async_trait::async_trait;
use log::warn;
use serde_json::{Map, Value};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

/// Raw console state as loose key/value pairs (`home_score`,
/// `visitor_score`, `clock`, and one of `set`/`period`/`quarter`).
pub type RawState = Map<String, Value>;

/// A scoring console source. Implementations poll their device and deliver
/// each reported state on the channel handed to them at construction.
#[async_trait]
pub trait ScoreConsole {
    /// Poll until the source is exhausted or the receiver side hangs up.
    async fn run(&mut self) -> Result<()>;
}

/// Reads one JSON object per line from stdin.
pub struct StdinConsole {
    updates: mpsc::Sender<RawState>,
}

impl StdinConsole {
    pub fn new(updates: mpsc::Sender<RawState>) -> Self {
        Self { updates }
    }
}

#[async_trait]
impl ScoreConsole for StdinConsole {
    async fn run(&mut self) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str::<Value>(line) {
                Ok(Value::Object(map)) => {
                    if self.updates.send(map).await.is_err() {
                        // Publisher gone, nothing left to feed
                        break;
                    }
                }
                Ok(other) => warn!("Ignoring non-object console line: {other}"),
                Err(e) => warn!("Ignoring unparseable console line: {e}"),
            }
        }
        Ok(())
    }
}
