//! UDP backend for the connectionless beacon link
//!
//! Models the radio link on a host network: one bound datagram socket, a
//! peer table mapping 6-byte link addresses to socket endpoints, and an
//! outcome channel carrying one [`SendOutcome`] per send call.

use crate::link::traits::{OutcomeReceiver, SendOutcome, Transmitter};
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use beacon_shared::LinkAddr;
use bytes::Bytes;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::mpsc;
use tracing::warn;

/// Connectionless link over UDP
pub struct UdpLink {
    socket: Arc<UdpSocket>,
    /// Link address to endpoint mapping; one fixed peer in this design,
    /// registered once at startup
    peers: HashMap<LinkAddr, SocketAddr>,
    outcome_tx: mpsc::UnboundedSender<SendOutcome>,
}

impl UdpLink {
    /// Bring up the link: bind the local socket and open the outcome
    /// channel. Failure here is fatal to the process; there is no degraded
    /// mode.
    pub async fn bring_up(bind: SocketAddr) -> Result<(Self, OutcomeReceiver)> {
        let socket = UdpSocket::bind(bind)
            .await
            .with_context(|| format!("Failed to bind link socket on {bind}"))?;

        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();

        Ok((
            Self {
                socket: Arc::new(socket),
                peers: HashMap::new(),
                outcome_tx,
            },
            outcome_rx,
        ))
    }

    /// Register the fixed peer; called once at startup
    pub fn register_peer(&mut self, addr: LinkAddr, endpoint: SocketAddr) -> Result<()> {
        if self.peers.contains_key(&addr) {
            bail!("Peer {addr} already registered");
        }
        self.peers.insert(addr, endpoint);
        Ok(())
    }

    /// Local endpoint the socket is bound to
    pub fn local_endpoint(&self) -> Result<SocketAddr> {
        self.socket
            .local_addr()
            .context("Link socket has no local address")
    }
}

#[async_trait]
impl Transmitter for UdpLink {
    async fn send(&self, peer: LinkAddr, payload: Bytes) {
        let success = match self.peers.get(&peer) {
            Some(endpoint) => match self.socket.send_to(&payload, endpoint).await {
                Ok(_) => true,
                Err(e) => {
                    warn!("Link send to {peer} failed: {e}");
                    false
                }
            },
            None => {
                warn!("Dropping payload for unregistered peer {peer}");
                false
            }
        };

        // Exactly one outcome per send; the observer may already be gone
        // during shutdown, which is fine
        let _ = self.outcome_tx.send(SendOutcome { peer, success });
    }
}
