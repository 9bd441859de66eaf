//! Represents a food order as it arrives from the order feed.
//!
//! Orders are immutable once created. The shelf they end up on decides how fast
//! they decay; see [`Shelf::freshness`](crate::shelf::Shelf::freshness).

use crate::model::{OrderError, Temperature};
use serde::{Deserialize, Serialize};
use tokio::time::Instant;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Raw temperature label. Unrecognized labels are kept verbatim.
    pub temp: String,
    /// Lifespan in seconds under ideal storage.
    pub shelf_life: u32,
    pub decay_rate: f64,
}

impl Order {
    /// Creates a new Order instance.
    ///
    /// # Arguments
    /// * `id` - Unique identifier
    /// * `name` - Dish name, display only
    /// * `temp` - Temperature label (`hot`, `cold`, `frozen` or anything else)
    /// * `shelf_life` - Seconds the order lasts in ideal conditions
    /// * `decay_rate` - How fast the order deteriorates
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        temp: impl Into<String>,
        shelf_life: u32,
        decay_rate: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            temp: temp.into(),
            shelf_life,
            decay_rate,
        }
    }

    /// The recognized temperature class, or `None` when the label matches none.
    pub fn temperature(&self) -> Option<Temperature> {
        Temperature::from_label(&self.temp)
    }

    /// Checks the fields the kitchen relies on.
    pub fn validate(&self) -> Result<(), OrderError> {
        if self.id.trim().is_empty() {
            return Err(OrderError::MissingId);
        }
        if !self.decay_rate.is_finite() || self.decay_rate < 0.0 {
            return Err(OrderError::InvalidDecayRate {
                id: self.id.clone(),
                decay_rate: self.decay_rate,
            });
        }
        Ok(())
    }
}

/// An order sitting on a shelf, stamped with the instant it was placed.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedOrder {
    pub order: Order,
    pub queued_at: Instant,
}

impl PlacedOrder {
    pub fn new(order: Order, queued_at: Instant) -> Self {
        Self { order, queued_at }
    }

    pub fn id(&self) -> &str {
        &self.order.id
    }
}
