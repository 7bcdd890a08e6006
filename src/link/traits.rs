//! Transmitter trait abstraction for pluggable link backends

use async_trait::async_trait;
use beacon_shared::LinkAddr;
use bytes::Bytes;
use tokio::sync::mpsc;

/// Asynchronous confirmation of one transmission
///
/// Outcomes are observational only: nothing in the sweep waits on them and
/// a failure is never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendOutcome {
    /// Peer the payload was addressed to
    pub peer: LinkAddr,
    /// Whether the link accepted the payload for delivery
    pub success: bool,
}

/// Receiving half of the outcome channel; handed out once at bring-up
pub type OutcomeReceiver = mpsc::UnboundedReceiver<SendOutcome>;

/// A connectionless, fire-and-forget send primitive
///
/// `send` never fails from the caller's perspective; the result of each
/// transmission arrives later as a [`SendOutcome`] on the outcome channel,
/// exactly one per call.
#[async_trait]
pub trait Transmitter: Send + Sync {
    /// Submit one payload addressed to `peer`
    async fn send(&self, peer: LinkAddr, payload: Bytes);
}
