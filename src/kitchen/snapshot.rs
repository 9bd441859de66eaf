//! Read-only views of shelf contents, used for the verbose kitchen dump.

use crate::shelf::Shelf;
use std::fmt::Display;
use tokio::time::Instant;

/// Contents of every shelf at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct ShelvesSnapshot {
    pub shelves: Vec<ShelfSnapshot>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShelfSnapshot {
    pub name: String,
    pub capacity: usize,
    pub orders: Vec<OrderSnapshot>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderSnapshot {
    pub id: String,
    pub name: String,
    pub temp: String,
    pub freshness: f64,
}

impl ShelvesSnapshot {
    pub(crate) fn capture<'a>(shelves: impl IntoIterator<Item = &'a Shelf>, now: Instant) -> Self {
        let shelves = shelves
            .into_iter()
            .map(|shelf| ShelfSnapshot {
                name: shelf.name().to_string(),
                capacity: shelf.capacity(),
                orders: shelf
                    .orders()
                    .iter()
                    .map(|placed| OrderSnapshot {
                        id: placed.order.id.clone(),
                        name: placed.order.name.clone(),
                        temp: placed.order.temp.clone(),
                        freshness: shelf.freshness(placed, now),
                    })
                    .collect(),
            })
            .collect();
        Self { shelves }
    }

    pub fn shelf(&self, name: &str) -> Option<&ShelfSnapshot> {
        self.shelves.iter().find(|s| s.name == name)
    }

    pub fn total_orders(&self) -> usize {
        self.shelves.iter().map(|s| s.orders.len()).sum()
    }

    /// True if any shelf holds an order with `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.shelves
            .iter()
            .any(|s| s.orders.iter().any(|o| o.id == id))
    }
}

impl Display for ShelvesSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for shelf in &self.shelves {
            writeln!(f, "{} ({}/{})", shelf.name, shelf.orders.len(), shelf.capacity)?;
            if shelf.orders.is_empty() {
                writeln!(f, "  (empty)")?;
            }
            for order in &shelf.orders {
                writeln!(
                    f,
                    "  - {} {} [{}] freshness={:.3}",
                    order.id, order.name, order.temp, order.freshness
                )?;
            }
        }
        Ok(())
    }
}
