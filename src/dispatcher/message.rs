//! # Dispatcher Messages
//!
//! Requests a [`KitchenClient`](crate::dispatcher::KitchenClient) sends to the
//! [`Dispatcher`](crate::dispatcher::Dispatcher). Each carries a oneshot sender
//! for the reply, so the loop stays the only owner of the kitchen.

use crate::dispatcher::DispatchError;
use crate::kitchen::ShelvesSnapshot;
use crate::model::Order;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the dispatcher.
pub type Response<T> = oneshot::Sender<Result<T, DispatchError>>;

#[derive(Debug)]
pub enum KitchenRequest {
    /// Queue an order for rate-limited ingestion. Replies with the queue length.
    Submit {
        order: Order,
        respond_to: Response<usize>,
    },
    /// Hand an order to a courier right now. Replies whether it was on a shelf.
    Pickup {
        order_id: String,
        respond_to: Response<bool>,
    },
    /// Read every shelf.
    Snapshot {
        respond_to: Response<ShelvesSnapshot>,
    },
    /// Run an expiry sweep immediately. Replies with the number discarded.
    Sweep { respond_to: Response<usize> },
}
