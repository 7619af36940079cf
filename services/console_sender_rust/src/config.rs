use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;

#[derive(Debug, Clone)]
pub struct Config {
    /// Overlay receiver (PC2) address for outgoing datagrams.
    pub target_addr: SocketAddr,
    /// Serial port the scoring console is attached to.
    pub serial_port: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let raw_target =
            env::var("UDP_TARGET_ADDR").unwrap_or_else(|_| "127.0.0.1:5005".to_string());
        let target_addr = raw_target
            .parse()
            .with_context(|| format!("Invalid UDP_TARGET_ADDR: {raw_target} (expected ip:port)"))?;

        let serial_port = env::var("SERIAL_PORT").unwrap_or_else(|_| "COM4".to_string());

        Ok(Self {
            target_addr,
            serial_port,
        })
    }
}
