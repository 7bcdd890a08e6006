//! Node configuration
//!
//! Everything the scheduler needs is fixed at startup: the peer, the source
//! set, the pacing interval, the idle strategy, and the payload schema.
//! Idle-mode selection in particular is a deliberate static choice between
//! state retention (blocking) and power consumption (suspend), never a
//! runtime decision.

use crate::idle::{IdleMode, DEFAULT_BLOCKING_INTERVAL, DEFAULT_SUSPEND_WAKE_AFTER};
use anyhow::{bail, Context, Result};
use beacon_shared::{LinkAddr, PayloadSchema};
use std::env;
use std::net::SocketAddr;
use std::time::Duration;

/// Configuration for the beacon node
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Fixed peer link address, invariant for the process lifetime
    pub peer: LinkAddr,
    /// Network endpoint the peer's link address resolves to
    pub peer_endpoint: SocketAddr,
    /// Local endpoint to bind the link socket on
    pub bind_endpoint: SocketAddr,
    /// Number of virtual sources; the sweep visits ids 1..=source_count
    pub source_count: u8,
    /// Minimum spacing between consecutive sends within a sweep
    pub pacing: Duration,
    /// Inter-cycle idle strategy
    pub idle: IdleMode,
    /// Wire schema for transmitted readings
    pub schema: PayloadSchema,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            peer: LinkAddr([0xFC, 0xE8, 0xC0, 0x7C, 0xE3, 0xE0]),
            peer_endpoint: "127.0.0.1:7373".parse().expect("valid default endpoint"),
            bind_endpoint: "0.0.0.0:0".parse().expect("valid default endpoint"),
            source_count: 9,
            pacing: Duration::from_millis(200),
            idle: IdleMode::Blocking {
                interval: DEFAULT_BLOCKING_INTERVAL,
            },
            schema: PayloadSchema::Timestamped,
        }
    }
}

impl NodeConfig {
    /// Build the configuration from defaults plus `BEACON_*` environment
    /// overrides. Any malformed override is a fatal startup error.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(v) = env::var("BEACON_PEER_ADDR") {
            config.peer = v
                .parse()
                .with_context(|| format!("BEACON_PEER_ADDR {v:?}"))?;
        }
        if let Ok(v) = env::var("BEACON_PEER_ENDPOINT") {
            config.peer_endpoint = v
                .parse()
                .with_context(|| format!("BEACON_PEER_ENDPOINT {v:?}"))?;
        }
        if let Ok(v) = env::var("BEACON_BIND_ENDPOINT") {
            config.bind_endpoint = v
                .parse()
                .with_context(|| format!("BEACON_BIND_ENDPOINT {v:?}"))?;
        }
        if let Ok(v) = env::var("BEACON_SOURCES") {
            config.source_count = v.parse().with_context(|| format!("BEACON_SOURCES {v:?}"))?;
            if config.source_count == 0 {
                bail!("BEACON_SOURCES must be at least 1");
            }
        }
        if let Ok(v) = env::var("BEACON_PACING_MS") {
            let ms: u64 = v.parse().with_context(|| format!("BEACON_PACING_MS {v:?}"))?;
            config.pacing = Duration::from_millis(ms);
        }
        if let Ok(v) = env::var("BEACON_SCHEMA") {
            config.schema = v
                .parse()
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("BEACON_SCHEMA {v:?}"))?;
        }

        config.idle = idle_from_env(&config)?;

        Ok(config)
    }
}

/// Resolve the idle strategy: `BEACON_IDLE` selects the mode
/// (`blocking` or `suspend`), `BEACON_IDLE_SECS` overrides its duration.
fn idle_from_env(config: &NodeConfig) -> Result<IdleMode> {
    let secs = match env::var("BEACON_IDLE_SECS") {
        Ok(v) => Some(Duration::from_secs(
            v.parse().with_context(|| format!("BEACON_IDLE_SECS {v:?}"))?,
        )),
        Err(_) => None,
    };

    match env::var("BEACON_IDLE").as_deref() {
        Ok("blocking") => Ok(IdleMode::Blocking {
            interval: secs.unwrap_or(DEFAULT_BLOCKING_INTERVAL),
        }),
        Ok("suspend") => Ok(IdleMode::Suspend {
            wake_after: secs.unwrap_or(DEFAULT_SUSPEND_WAKE_AFTER),
        }),
        Ok(other) => bail!("BEACON_IDLE {other:?} (expected 'blocking' or 'suspend')"),
        Err(_) => Ok(match (config.idle, secs) {
            (IdleMode::Blocking { .. }, Some(interval)) => IdleMode::Blocking { interval },
            (idle, _) => idle,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = NodeConfig::default();
        assert_eq!(config.peer.to_string(), "FC:E8:C0:7C:E3:E0");
        assert_eq!(config.source_count, 9);
        assert_eq!(config.pacing, Duration::from_millis(200));
        assert_eq!(
            config.idle,
            IdleMode::Blocking {
                interval: Duration::from_secs(60)
            }
        );
        assert_eq!(config.schema, PayloadSchema::Timestamped);
    }
}
