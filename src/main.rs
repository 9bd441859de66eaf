use cloud_kitchen::config::{ConfigError, KitchenConfig, USAGE};
use cloud_kitchen::lifecycle::tracing::setup_tracing;
use cloud_kitchen::lifecycle::{KitchenSystem, SimulationError};
use cloud_kitchen::model::load_orders;
use std::process::ExitCode;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    setup_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(SimulationError::Config(ConfigError::HelpRequested)) => {
            println!("{USAGE}");
            ExitCode::SUCCESS
        }
        Err(SimulationError::Config(e)) => {
            eprintln!("error: {e}\n\n{USAGE}");
            ExitCode::from(2)
        }
        Err(e) => {
            error!(error = %e, "Simulation failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), SimulationError> {
    let config = KitchenConfig::load(std::env::args().skip(1))?;

    let orders = match &config.orders_path {
        Some(path) => load_orders(path)?,
        None => Vec::new(),
    };
    info!(count = orders.len(), "Orders loaded");

    let system = KitchenSystem::start(&config, orders)?;

    if config.keep_running {
        info!("Running until Ctrl-C");
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Cannot listen for Ctrl-C, shutting down");
        }
    }

    let report = system.shutdown().await?;
    info!(
        received = report.stats.received,
        picked_up = report.stats.picked_up,
        expired = report.stats.expired,
        evicted = report.stats.evicted,
        dropped = report.stats.dropped,
        remaining = report.remaining.total_orders(),
        "Simulation complete"
    );
    println!("{}", report.remaining);
    Ok(())
}
