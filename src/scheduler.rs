//! Cycle Scheduler
//!
//! Drives one full ordered sweep of transmissions per cycle: for every
//! source id in ascending order, generate a reading, encode it, submit it
//! to the fixed peer, then wait out the pacing interval. At sweep end the
//! configured idle strategy runs; the scheduler itself never terminates.
//!
//! Send outcomes are observed elsewhere (see [`crate::link`]); a failed
//! transmission never aborts, delays, or retries anything here.

use crate::config::NodeConfig;
use crate::idle::{IdleMode, SuspendTimer};
use crate::link::Transmitter;
use crate::readings::ReadingGenerator;
use beacon_shared::codec;
use std::convert::Infallible;
use tokio::time::sleep;
use tracing::info;

/// The per-process sweep driver; exactly one exists per process
pub struct CycleScheduler<T, G> {
    config: NodeConfig,
    transmitter: T,
    generator: G,
}

impl<T: Transmitter, G: ReadingGenerator> CycleScheduler<T, G> {
    pub fn new(config: NodeConfig, transmitter: T, generator: G) -> Self {
        Self {
            config,
            transmitter,
            generator,
        }
    }

    /// Execute exactly one full sweep over the source set
    ///
    /// Issues `source_count` sends in ascending source order with at least
    /// the pacing interval between consecutive submissions. Cycle position
    /// starts fresh here every time; nothing carries over from earlier
    /// sweeps.
    pub async fn run_sweep(&self) {
        for source_id in 1..=self.config.source_count {
            let reading = self.generator.generate(source_id);

            info!(
                "Source {}: temperature={:.2}C humidity={:.2}%",
                reading.source_id, reading.temperature, reading.humidity
            );

            let payload = codec::encode(&reading, self.config.schema);
            self.transmitter.send(self.config.peer, payload).await;

            sleep(self.config.pacing).await;
        }

        info!(
            "Sweep complete: {} sources transmitted to {}",
            self.config.source_count, self.config.peer
        );
    }

    /// Run sweeps for the lifetime of the process
    ///
    /// In blocking idle mode control loops here forever. In suspend mode
    /// the first completed sweep arms the wake timer and suspends the
    /// process; execution then resumes at process entry, never here.
    pub async fn run<S: SuspendTimer>(self, suspend: S) -> Infallible {
        loop {
            self.run_sweep().await;

            match self.config.idle {
                IdleMode::Blocking { interval } => {
                    info!("Idling for {}s before the next sweep", interval.as_secs());
                    sleep(interval).await;
                }
                IdleMode::Suspend { wake_after } => {
                    // No cleanup runs once suspension starts; log first
                    info!("Cycle complete; entering low-power suspend");
                    suspend.arm(wake_after);
                    suspend.suspend();
                }
            }
        }
    }
}
