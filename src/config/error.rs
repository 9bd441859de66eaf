//! Error types for configuration parsing.

use thiserror::Error;

/// Errors raised while assembling a [`KitchenConfig`](crate::config::KitchenConfig).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// `--help` or `-h` was passed. Not a failure; the binary prints usage and exits.
    #[error("help requested")]
    HelpRequested,

    #[error("no orders file given (use --orders <path>)")]
    MissingOrdersPath,

    #[error("unknown flag: {0}")]
    UnknownFlag(String),

    #[error("flag {0} expects a value")]
    MissingValue(String),

    /// A flag or environment variable held something that does not parse.
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: String, value: String },

    #[error("ingestion rate must be at least 1 order per second")]
    ZeroRate,

    #[error("discard rate must be at least 1 second")]
    ZeroSweepInterval,

    #[error("min pickup ({min}s) is greater than max pickup ({max}s)")]
    PickupWindow { min: u64, max: u64 },
}
