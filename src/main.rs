mod config;
mod idle;
mod link;
mod readings;
mod scheduler;

use config::NodeConfig;
use idle::ProcessSuspend;
use link::{spawn_outcome_logger, UdpLink};
use readings::SyntheticGenerator;
use scheduler::CycleScheduler;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = NodeConfig::from_env().context("Loading node configuration")?;

    info!("Beacon node starting");
    info!("  peer: {} via {}", config.peer, config.peer_endpoint);
    info!(
        "  sources: 1..={}, pacing: {}ms, schema: {:?}",
        config.source_count,
        config.pacing.as_millis(),
        config.schema
    );
    info!("  idle mode: {:?}", config.idle);

    // Link bring-up and peer registration are fatal on failure; there is
    // no degraded mode
    let (mut link, outcomes) = UdpLink::bring_up(config.bind_endpoint)
        .await
        .context("Link bring-up failed")?;
    link.register_peer(config.peer, config.peer_endpoint)
        .context("Peer registration failed")?;
    info!("Link up on {}; peer registered", link.local_endpoint()?);

    // The single outcome observer for the process lifetime, registered
    // before the first send
    let _outcome_task = spawn_outcome_logger(outcomes);

    let scheduler = CycleScheduler::new(config, link, SyntheticGenerator);
    match scheduler.run(ProcessSuspend::default()).await {}
}
