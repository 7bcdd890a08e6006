//! Receiving peer for the beacon link
//!
//! Binds the datagram socket the beacon node transmits to, decodes each
//! fixed-size payload, and logs the readings. Malformed datagrams are
//! dropped. The schema must match the sender's
//! (`BEACON_SCHEMA=compact|timestamped`).

use anyhow::Context;
use beacon_shared::{codec, PayloadSchema};
use std::collections::HashMap;
use tokio::net::UdpSocket;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let bind = std::env::var("BEACON_RECEIVER_BIND").unwrap_or_else(|_| "0.0.0.0:7373".into());
    let schema: PayloadSchema = match std::env::var("BEACON_SCHEMA") {
        Ok(v) => v.parse().map_err(anyhow::Error::msg)?,
        Err(_) => PayloadSchema::default(),
    };

    let socket = UdpSocket::bind(&bind)
        .await
        .with_context(|| format!("Failed to bind receiver on {bind}"))?;
    info!("Receiver listening on {bind} (schema: {schema:?})");

    // Readings seen per source, for spotting gaps in a sweep
    let mut seen: HashMap<u8, u64> = HashMap::new();
    let mut buf = vec![0u8; 64];

    loop {
        let (n, from) = socket.recv_from(&mut buf).await?;

        match codec::decode(&buf[..n], schema) {
            Ok(reading) => {
                let count = seen.entry(reading.source_id).or_insert(0);
                *count += 1;
                info!(
                    "[{}] source {} (#{}): temperature={:.2}C humidity={:.2}% at {:?}",
                    from,
                    reading.source_id,
                    count,
                    reading.temperature,
                    reading.humidity,
                    reading.captured_at
                );
            }
            Err(e) => {
                warn!("Dropping malformed datagram from {from} ({n} bytes): {e}");
            }
        }
    }
}
