use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// Listen address; must match the sender's target port.
    pub bind_addr: SocketAddr,
    /// Directory the OBS overlay reads its text files from.
    pub output_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let raw_bind = env::var("UDP_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:5005".to_string());
        let bind_addr = raw_bind
            .parse()
            .with_context(|| format!("Invalid UDP_BIND_ADDR: {raw_bind} (expected ip:port)"))?;

        let output_dir =
            PathBuf::from(env::var("OUTPUT_DIR").unwrap_or_else(|_| "./scoreboard".to_string()));

        Ok(Self {
            bind_addr,
            output_dir,
        })
    }
}
