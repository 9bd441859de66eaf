use crate::kitchen::{KitchenError, ShelvesSnapshot};
use crate::model::{Order, PlacedOrder, Temperature};
use crate::shelf::Shelf;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt::Display;
use tokio::time::Instant;
use tracing::{debug, info, warn};

pub const DEFAULT_PRIMARY_CAPACITY: i64 = 10;
pub const DEFAULT_OVERFLOW_CAPACITY: i64 = 15;

/// Shelf sizes for a kitchen. Signed so that a negative value from configuration
/// is rejected by [`Shelf::new`] instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShelfCapacities {
    pub hot: i64,
    pub cold: i64,
    pub frozen: i64,
    pub overflow: i64,
}

impl Default for ShelfCapacities {
    fn default() -> Self {
        Self {
            hot: DEFAULT_PRIMARY_CAPACITY,
            cold: DEFAULT_PRIMARY_CAPACITY,
            frozen: DEFAULT_PRIMARY_CAPACITY,
            overflow: DEFAULT_OVERFLOW_CAPACITY,
        }
    }
}

/// Where [`Kitchen::accept_order`] put an order.
#[derive(Debug, Clone, PartialEq)]
pub enum Placement {
    /// Stored on the shelf dedicated to its temperature.
    Primary(Temperature),
    /// Stored on the overflow shelf.
    Overflow {
        /// The temperature label was unrecognized.
        fallback: bool,
        /// Id of an overflow order moved to its primary shelf to make room.
        migrated: Option<String>,
        /// Order discarded from overflow to make room.
        evicted: Option<Order>,
    },
    /// Overflow has zero capacity, so the order could not be stored anywhere.
    Dropped,
}

impl Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Placement::Primary(temp) => write!(f, "{temp}"),
            Placement::Overflow { .. } => f.write_str("overflow"),
            Placement::Dropped => f.write_str("dropped"),
        }
    }
}

/// Owns every shelf and resolves placement, pickup and expiry across them.
///
/// # Concurrency Model
/// `Kitchen` has no interior locking. It is owned by the
/// [`Dispatcher`](crate::dispatcher::Dispatcher) loop, which handles one event at
/// a time, so accept, pickup and sweep never interleave.
#[derive(Debug)]
pub struct Kitchen {
    hot: Shelf,
    cold: Shelf,
    frozen: Shelf,
    overflow: Shelf,
    rng: StdRng,
}

impl Kitchen {
    /// Builds a kitchen whose eviction choices are seeded from OS entropy.
    pub fn new(capacities: ShelfCapacities) -> Result<Self, KitchenError> {
        Self::with_rng(capacities, StdRng::from_entropy())
    }

    /// Builds a kitchen with a deterministic eviction sequence.
    pub fn with_seed(capacities: ShelfCapacities, seed: u64) -> Result<Self, KitchenError> {
        Self::with_rng(capacities, StdRng::seed_from_u64(seed))
    }

    /// Builds a kitchen around an injected random generator.
    ///
    /// # Errors
    /// [`KitchenError::Shelf`] if any capacity is negative.
    pub fn with_rng(capacities: ShelfCapacities, rng: StdRng) -> Result<Self, KitchenError> {
        let kitchen = Self {
            hot: Shelf::new("Hot Shelf", [Temperature::Hot], capacities.hot)?,
            cold: Shelf::new("Cold Shelf", [Temperature::Cold], capacities.cold)?,
            frozen: Shelf::new("Frozen Shelf", [Temperature::Frozen], capacities.frozen)?,
            overflow: Shelf::new("Overflow Shelf", Temperature::ALL, capacities.overflow)?,
            rng,
        };
        info!(
            hot = kitchen.hot.capacity(),
            cold = kitchen.cold.capacity(),
            frozen = kitchen.frozen.capacity(),
            overflow = kitchen.overflow.capacity(),
            "Kitchen ready"
        );
        Ok(kitchen)
    }

    /// The primary shelf for `temp`.
    pub fn shelf(&self, temp: Temperature) -> &Shelf {
        match temp {
            Temperature::Hot => &self.hot,
            Temperature::Cold => &self.cold,
            Temperature::Frozen => &self.frozen,
        }
    }

    fn shelf_mut(&mut self, temp: Temperature) -> &mut Shelf {
        match temp {
            Temperature::Hot => &mut self.hot,
            Temperature::Cold => &mut self.cold,
            Temperature::Frozen => &mut self.frozen,
        }
    }

    pub fn overflow(&self) -> &Shelf {
        &self.overflow
    }

    /// All shelves, primaries first.
    pub fn shelves(&self) -> [&Shelf; 4] {
        [&self.hot, &self.cold, &self.frozen, &self.overflow]
    }

    fn shelves_mut(&mut self) -> [&mut Shelf; 4] {
        [&mut self.hot, &mut self.cold, &mut self.frozen, &mut self.overflow]
    }

    /// Total orders currently stored.
    pub fn order_count(&self) -> usize {
        self.shelves().iter().map(|s| s.len()).sum()
    }

    /// True if any shelf holds an order with `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.shelves()
            .iter()
            .any(|shelf| shelf.orders().iter().any(|placed| placed.id() == id))
    }

    /// Resolves a temperature label to its primary shelf.
    ///
    /// # Errors
    /// [`KitchenError::InvalidTemperatureLookup`] for an unrecognized label.
    pub fn select_shelf_by_temperature(&self, label: &str) -> Result<&Shelf, KitchenError> {
        resolve_temperature(label).map(|temp| self.shelf(temp))
    }

    /// Places an order, stamping it with the current instant.
    pub fn accept_order(&mut self, order: Order) -> Placement {
        self.accept_order_at(order, Instant::now())
    }

    /// Places an order queued at `now`.
    ///
    /// The primary shelf is tried first. When it is full (or the temperature is
    /// unrecognized) the order goes to overflow; a full overflow shelf first tries
    /// to move one of its orders home to a primary shelf with room, and failing
    /// that discards a random order.
    pub fn accept_order_at(&mut self, order: Order, now: Instant) -> Placement {
        debug!(?order, "accept_order called");
        let placed = PlacedOrder::new(order, now);

        let fallback = match resolve_temperature(&placed.order.temp) {
            Ok(temp) => {
                let shelf = self.shelf_mut(temp);
                if !shelf.is_full() {
                    shelf.place_order(placed);
                    return Placement::Primary(temp);
                }
                false
            }
            Err(e) => {
                warn!(order_id = %placed.order.id, error = %e, "Routing to overflow");
                true
            }
        };

        let mut migrated = None;
        let mut evicted = None;
        if self.overflow.is_full() {
            migrated = self.migrate_from_overflow(placed.order.temperature());
            if self.overflow.is_full() {
                evicted = self.evict_from_overflow();
            }
        }

        let order_id = placed.order.id.clone();
        if !self.overflow.place_order(placed) {
            warn!(%order_id, "No room on any shelf, order dropped");
            return Placement::Dropped;
        }

        Placement::Overflow {
            fallback,
            migrated,
            evicted,
        }
    }

    /// Moves the first overflow order of a temperature other than `incoming` whose
    /// primary shelf has room. Scans overflow once and stops at the first move.
    fn migrate_from_overflow(&mut self, incoming: Option<Temperature>) -> Option<String> {
        let (index, temp) = self
            .overflow
            .orders()
            .iter()
            .enumerate()
            .find_map(|(index, placed)| {
                let temp = placed.order.temperature()?;
                (Some(temp) != incoming && !self.shelf(temp).is_full()).then_some((index, temp))
            })?;

        let placed = self.overflow.take_order_at_index(index)?;
        let order_id = placed.order.id.clone();
        self.shelf_mut(temp).place_order(placed);
        info!(%order_id, shelf = %temp, "Moved order from overflow");
        Some(order_id)
    }

    fn evict_from_overflow(&mut self) -> Option<Order> {
        let index = match self.overflow.random_order_index(&mut self.rng) {
            Ok(index) => index,
            Err(e) => {
                debug!(error = %e, "Nothing to evict");
                return None;
            }
        };
        let placed = self.overflow.take_order_at_index(index)?;
        warn!(order_id = %placed.order.id, "Evicted order from overflow");
        Some(placed.order)
    }

    /// Removes the order with `id` from whichever shelf holds it.
    ///
    /// Returns `false` when the order is gone already (expired, evicted or
    /// picked up); that is an expected race, not an error.
    pub fn pickup_order_by_id(&mut self, id: &str) -> bool {
        self.shelves_mut()
            .into_iter()
            .any(|shelf| shelf.remove_order_by_id(id))
    }

    /// Discards expired orders on every shelf.
    pub fn remove_expired_orders(&mut self) -> Vec<Order> {
        self.remove_expired_orders_at(Instant::now())
    }

    /// Discards every order whose freshness at `now` is `<= 0`.
    pub fn remove_expired_orders_at(&mut self, now: Instant) -> Vec<Order> {
        let mut expired = Vec::new();
        for shelf in self.shelves_mut() {
            let removed = shelf.remove_expired_orders_at(now);
            if !removed.is_empty() {
                debug!(shelf = %shelf.name(), count = removed.len(), "Expired");
            }
            expired.extend(removed.into_iter().map(|placed| placed.order));
        }
        expired
    }

    /// Read-only view of every shelf with current freshness values.
    pub fn shelves_snapshot(&self) -> ShelvesSnapshot {
        self.shelves_snapshot_at(Instant::now())
    }

    pub fn shelves_snapshot_at(&self, now: Instant) -> ShelvesSnapshot {
        ShelvesSnapshot::capture(self.shelves(), now)
    }
}

fn resolve_temperature(label: &str) -> Result<Temperature, KitchenError> {
    Temperature::from_label(label)
        .ok_or_else(|| KitchenError::InvalidTemperatureLookup(label.to_string()))
}
