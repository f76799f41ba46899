//! # CargoTrack Node
//!
//! ## Startup Sequence
//!
//! 1. Load configuration from the environment
//! 2. Initialize logging and metrics
//! 3. Build the bus and registry, start the observer
//! 4. Serve JSON commands on stdin until EOF or Ctrl+C

use anyhow::{Context, Result};
use ct_node::{run_shim, NodeConfig, NodeRuntime};
use ct_telemetry::init_telemetry;
use tokio::io::{self, BufReader};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = NodeConfig::from_env().context("Failed to load node configuration")?;
    let _telemetry =
        init_telemetry(config.telemetry.clone()).context("Failed to initialize telemetry")?;

    let runtime = NodeRuntime::new(config);
    let observer = runtime.start();
    let handler = runtime.handler();

    info!("Node is running. Reading commands from stdin.");
    tokio::select! {
        served = run_shim(&handler, BufReader::new(io::stdin()), io::stdout()) => {
            let served = served.context("Command shim I/O failed")?;
            info!(served, "Input closed");
        }
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for Ctrl+C")?;
            info!("Ctrl+C received");
        }
    }

    runtime.shutdown();
    observer.await.context("Observer task panicked")?;
    info!("Shutdown complete");
    Ok(())
}
