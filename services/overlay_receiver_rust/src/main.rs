//! Overlay Receiver Service (PC2)
//!
//! Listens for scoreboard datagrams from the console sender and materializes
//! state into the text files the OBS overlay reads.
//!
//! Architecture:
//! ```text
//! console_sender (UDP :5005) ──> overlay_receiver ──> OUTPUT_DIR/*.txt
//! ```
//!
//! Each datagram is a full-state snapshot, so lost or reordered packets are
//! corrected by the next one. Messages are processed one at a time to
//! completion; a malformed payload is logged and skipped without touching
//! stored state.

mod config;

use anyhow::Result;
use config::Config;
use dotenv::dotenv;
use log::{info, warn};
use relay_core::{FileSink, ScoreTracker};
use tokio::net::UdpSocket;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env()?;

    let sink = FileSink::new(&config.output_dir)?;
    let mut tracker = ScoreTracker::new(sink);

    let socket = UdpSocket::bind(config.bind_addr).await?;
    info!("Listening for scoreboard datagrams on {}", config.bind_addr);
    info!("Overlay files in {}", config.output_dir.display());

    let mut buf = [0u8; 4096];
    loop {
        let (len, addr) = tokio::select! {
            received = socket.recv_from(&mut buf) => match received {
                Ok(pair) => pair,
                Err(e) => {
                    warn!("UDP receive error: {e}");
                    continue;
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!("Ctrl-C received, shutting down");
                break;
            }
        };

        match tracker.on_message(&buf[..len]) {
            Ok(changes) if !changes.is_empty() => {
                info!("{addr} -> {}  (changes: {})", changes.summary, changes.describe());
            }
            Ok(_) => {}
            Err(e) => warn!("Dropping datagram from {addr}: {e}"),
        }
    }

    Ok(())
}
