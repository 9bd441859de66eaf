use crate::config::KitchenConfig;
use crate::dispatcher::{DispatchReport, Dispatcher, KitchenClient};
use crate::kitchen::Kitchen;
use crate::lifecycle::SimulationError;
use crate::model::Order;
use tokio::task::JoinHandle;
use tracing::{error, info};

const REQUEST_BUFFER: usize = 32;

/// A running simulation: the dispatcher task plus a client for talking to it.
///
/// # Example
///
/// ```ignore
/// let config = KitchenConfig::load(std::env::args().skip(1))?;
/// let orders = load_orders(config.orders_path.as_ref().unwrap())?;
///
/// let system = KitchenSystem::start(&config, orders)?;
/// let snapshot = system.client.snapshot().await?;
///
/// let report = system.shutdown().await?;
/// ```
pub struct KitchenSystem {
    /// Client for the dispatcher. Clone it freely; the loop in service mode
    /// runs until every clone is dropped.
    pub client: KitchenClient,

    handle: JoinHandle<DispatchReport>,
}

impl KitchenSystem {
    /// Builds the kitchen from `config` and spawns the dispatcher with `orders` queued.
    ///
    /// Fails if a shelf capacity is invalid. Must be called inside a Tokio runtime.
    pub fn start(config: &KitchenConfig, orders: Vec<Order>) -> Result<Self, SimulationError> {
        let kitchen = match config.seed {
            Some(seed) => Kitchen::with_seed(config.capacities, seed)?,
            None => Kitchen::new(config.capacities)?,
        };
        let (dispatcher, client) =
            Dispatcher::new(kitchen, config.dispatch_settings(), REQUEST_BUFFER);

        info!(orders = orders.len(), "Starting kitchen");
        let handle = tokio::spawn(dispatcher.run(orders));

        Ok(Self { client, handle })
    }

    /// Waits for a batch run to finish while keeping the client usable until the end.
    ///
    /// Never returns in service mode; use [`shutdown`](Self::shutdown) there.
    pub async fn wait(self) -> Result<DispatchReport, SimulationError> {
        let Self { client, handle } = self;
        let report = handle.await;
        drop(client);
        Ok(report?)
    }

    /// Drops this client and waits for the dispatcher to drain.
    ///
    /// In batch mode the loop still finishes every queued order and courier first.
    pub async fn shutdown(self) -> Result<DispatchReport, SimulationError> {
        info!("Shutting down kitchen...");
        drop(self.client);

        match self.handle.await {
            Ok(report) => {
                info!("Kitchen shutdown complete.");
                Ok(report)
            }
            Err(e) => {
                error!(error = %e, "Dispatcher task failed");
                Err(e.into())
            }
        }
    }
}
