//! # Dispatcher Errors
//!
//! Errors a [`KitchenClient`](crate::dispatcher::KitchenClient) call can return.

use crate::model::OrderError;

/// Errors that can occur while talking to the dispatcher loop.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum DispatchError {
    #[error("Dispatcher closed")]
    LoopClosed,
    #[error("Dispatcher dropped response channel")]
    ResponseDropped,
    #[error("Rejected order: {0}")]
    InvalidOrder(#[from] OrderError),
    /// An order with this id is still queued or on a shelf.
    #[error("Duplicate order id: {0}")]
    DuplicateId(String),
}
