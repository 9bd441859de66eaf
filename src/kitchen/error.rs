//! Error types for the kitchen.

use crate::shelf::ShelfError;
use thiserror::Error;

/// Errors that can occur while building or routing through the kitchen.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum KitchenError {
    /// The order's temperature label matches no known shelf.
    ///
    /// `accept_order` recovers from this by routing to overflow.
    #[error("InvalidTemperatureLookup: no shelf for temperature {0:?}")]
    InvalidTemperatureLookup(String),

    /// A shelf could not be built.
    #[error(transparent)]
    Shelf(#[from] ShelfError),
}
