//! Counters for a dispatcher run.

use crate::kitchen::{Placement, ShelvesSnapshot};

/// What happened to every order the dispatcher touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchStats {
    pub received: usize,
    pub placed_on_primary: usize,
    pub placed_on_overflow: usize,
    /// Orders with an unrecognized temperature label.
    pub fallbacks: usize,
    pub migrated: usize,
    pub evicted: usize,
    pub dropped: usize,
    pub picked_up: usize,
    /// Couriers that arrived for an order no longer on any shelf.
    pub pickup_misses: usize,
    pub expired: usize,
    pub sweeps: usize,
}

impl DispatchStats {
    pub fn record_placement(&mut self, placement: &Placement) {
        self.received += 1;
        match placement {
            Placement::Primary(_) => self.placed_on_primary += 1,
            Placement::Overflow {
                fallback,
                migrated,
                evicted,
            } => {
                self.placed_on_overflow += 1;
                self.fallbacks += usize::from(*fallback);
                self.migrated += usize::from(migrated.is_some());
                self.evicted += usize::from(evicted.is_some());
            }
            Placement::Dropped => self.dropped += 1,
        }
    }

    pub fn record_pickup(&mut self, delivered: bool) {
        if delivered {
            self.picked_up += 1;
        } else {
            self.pickup_misses += 1;
        }
    }
}

/// Final outcome of [`Dispatcher::run`](crate::dispatcher::Dispatcher::run).
#[derive(Debug, Clone)]
pub struct DispatchReport {
    pub stats: DispatchStats,
    /// Orders still on a shelf when the loop stopped.
    pub remaining: ShelvesSnapshot,
}
