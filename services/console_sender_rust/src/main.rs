//! Console Sender Service (PC1)
//!
//! Reads scoreboard state from the scoring console adapter, deduplicates
//! consecutive identical snapshots, and relays each change to the overlay
//! receiver as one UDP datagram.
//!
//! Architecture:
//! ```text
//! scoring console ──> ScoreConsole adapter ──> SenderFilter ──UDP──> overlay_receiver (PC2)
//! ```
//!
//! The console adapter owns the keep-alive polling; this service just
//! processes one update at a time. Network failures are logged and
//! swallowed so the console keeps being read regardless of link state.

mod config;
mod console;
mod publisher;

use anyhow::Result;
use config::Config;
use console::{ScoreConsole, StdinConsole};
use dotenv::dotenv;
use log::{error, info};
use publisher::Publisher;
use std::sync::Arc;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env()?;
    info!("Starting console sender (serial port {})", config.serial_port);
    info!("Relaying score changes to {} (UDP)", config.target_addr);

    let publisher = Arc::new(Publisher::new(config.target_addr).await?);

    let (tx, mut rx) = mpsc::channel(64);
    let mut console = StdinConsole::new(tx);
    tokio::spawn(async move {
        if let Err(e) = console.run().await {
            error!("Console adapter exited: {e}");
        }
    });

    loop {
        tokio::select! {
            maybe_update = rx.recv() => {
                match maybe_update {
                    Some(raw_state) => publisher.handle_update(raw_state).await,
                    None => {
                        info!("Console adapter closed, shutting down");
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Ctrl-C received, shutting down");
                break;
            }
        }
    }

    Ok(())
}
