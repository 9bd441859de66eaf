//! Top-level error for starting and running a simulation.

use crate::config::ConfigError;
use crate::kitchen::KitchenError;
use crate::model::LoadError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Load(#[from] LoadError),

    /// The kitchen could not be built, e.g. a negative shelf capacity.
    #[error(transparent)]
    Kitchen(#[from] KitchenError),

    /// The dispatcher task panicked or was cancelled.
    #[error("dispatcher task failed: {0}")]
    DispatcherFailed(#[from] tokio::task::JoinError),
}
