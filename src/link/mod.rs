//! Connectionless link to the fixed peer
//!
//! This module handles:
//! - Link bring-up and one-time peer registration
//! - Fire-and-forget payload submission
//! - Asynchronous per-send outcome reporting

mod traits;
mod udp;

pub use traits::{OutcomeReceiver, SendOutcome, Transmitter};
pub use udp::UdpLink;

use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Spawn the single send-outcome observer for the process lifetime
///
/// Must be registered before the first send. The observer only reports;
/// it never touches cycle state and never triggers a retry.
pub fn spawn_outcome_logger(mut outcomes: OutcomeReceiver) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(outcome) = outcomes.recv().await {
            if outcome.success {
                info!("Delivered to {}", outcome.peer);
            } else {
                warn!("Delivery to {} failed", outcome.peer);
            }
        }
    })
}
