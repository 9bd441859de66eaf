//! # Kitchen Client
//!
//! Type-safe async handle for the dispatcher loop.

use crate::dispatcher::{DispatchError, KitchenRequest};
use crate::kitchen::ShelvesSnapshot;
use crate::model::Order;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

/// Sends [`KitchenRequest`]s to a running [`Dispatcher`](crate::dispatcher::Dispatcher).
///
/// Holds only a sender, so clones are cheap. In service mode the loop keeps
/// running until every clone has been dropped.
#[derive(Clone, Debug)]
pub struct KitchenClient {
    sender: mpsc::Sender<KitchenRequest>,
}

impl KitchenClient {
    pub fn new(sender: mpsc::Sender<KitchenRequest>) -> Self {
        Self { sender }
    }

    /// Queues an order behind any not yet ingested.
    #[instrument(skip(self, order), fields(order_id = %order.id))]
    pub async fn submit(&self, order: Order) -> Result<usize, DispatchError> {
        debug!(?order, "submit called");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(KitchenRequest::Submit { order, respond_to })
            .await
            .map_err(|_| DispatchError::LoopClosed)?;
        response.await.map_err(|_| DispatchError::ResponseDropped)?
    }

    /// Picks up an order immediately. `Ok(false)` if it is no longer on a shelf.
    #[instrument(skip(self))]
    pub async fn pickup(&self, order_id: String) -> Result<bool, DispatchError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(KitchenRequest::Pickup { order_id, respond_to })
            .await
            .map_err(|_| DispatchError::LoopClosed)?;
        response.await.map_err(|_| DispatchError::ResponseDropped)?
    }

    pub async fn snapshot(&self) -> Result<ShelvesSnapshot, DispatchError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(KitchenRequest::Snapshot { respond_to })
            .await
            .map_err(|_| DispatchError::LoopClosed)?;
        response.await.map_err(|_| DispatchError::ResponseDropped)?
    }

    pub async fn sweep(&self) -> Result<usize, DispatchError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(KitchenRequest::Sweep { respond_to })
            .await
            .map_err(|_| DispatchError::LoopClosed)?;
        response.await.map_err(|_| DispatchError::ResponseDropped)?
    }
}
