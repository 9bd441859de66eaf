//! Error types for shelf construction and eviction.

use thiserror::Error;

/// Errors raised by a [`Shelf`](crate::shelf::Shelf).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ShelfError {
    /// The shelf was configured with a negative capacity.
    #[error("InvalidCapacity: shelf {name} cannot hold {capacity} orders")]
    InvalidCapacity { name: String, capacity: i64 },

    /// A random eviction victim was requested from an empty shelf.
    #[error("EmptyShelf: shelf {0} has no orders")]
    EmptyShelfOrders(String),
}
