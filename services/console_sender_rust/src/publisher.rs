//! Dedup-and-transmit half of the sender.

use anyhow::Result;
use log::{debug, info, warn};
use relay_core::SenderFilter;
use std::net::SocketAddr;
use tokio::net::UdpSocket;
use tokio::sync::Mutex;

use crate::console::RawState;

/// Publishes changed snapshots to the overlay receiver.
///
/// Filter and socket sit behind one mutex so concurrent console callbacks
/// cannot interleave compare-update-send sequences.
pub struct Publisher {
    target: SocketAddr,
    inner: Mutex<Inner>,
}

struct Inner {
    filter: SenderFilter,
    socket: UdpSocket,
}

impl Publisher {
    pub async fn new(target: SocketAddr) -> Result<Self> {
        let socket = UdpSocket::bind("0.0.0.0:0").await?;
        Ok(Self {
            target,
            inner: Mutex::new(Inner {
                filter: SenderFilter::new(),
                socket,
            }),
        })
    }

    /// Handle one console update. Send failures are logged and swallowed so
    /// the console adapter keeps running regardless of network state.
    pub async fn handle_update(&self, raw_state: RawState) {
        let mut inner = self.inner.lock().await;

        let snapshot = match inner.filter.on_update(&raw_state) {
            Some(snapshot) => snapshot,
            None => {
                debug!("Console state unchanged, not transmitting");
                return;
            }
        };

        info!("{}", snapshot.summary_line());

        let payload = match serde_json::to_vec(&snapshot) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Failed to encode snapshot: {e}");
                return;
            }
        };
        if let Err(e) = inner.socket.send_to(&payload, self.target).await {
            warn!("UDP send error: {e}");
        }
    }
}
