//! Error types for order validation and order-file loading.

use thiserror::Error;

/// A single order failed validation.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The order has an empty id.
    #[error("order is missing an id")]
    MissingId,

    /// The decay rate is negative, NaN or infinite.
    #[error("order {id}: invalid decay rate {decay_rate}")]
    InvalidDecayRate { id: String, decay_rate: f64 },
}

/// Errors that can occur while reading the order file. All of them abort startup.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("cannot read orders file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a JSON array of orders.
    #[error("cannot parse orders file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// An order at the given position is malformed.
    #[error("order #{index} is invalid: {source}")]
    Invalid {
        index: usize,
        #[source]
        source: OrderError,
    },

    /// Two orders share the same id.
    #[error("duplicate order id: {0}")]
    DuplicateId(String),
}
