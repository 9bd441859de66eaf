//! # Shelf
//!
//! Storage for in-flight orders plus the freshness formula.
//!
//! ## Freshness
//!
//! ```text
//! age       = now - queued_at                      (seconds)
//! modifier  = 1 if the shelf serves one temperature, else 2
//! freshness = (shelf_life - decay_rate * age * modifier) / shelf_life
//! ```
//!
//! A value `<= 0` means the order has expired. An order with `shelf_life == 0`
//! has freshness `0` and is therefore expired the moment it is placed.

use crate::model::{PlacedOrder, Temperature};
use crate::shelf::ShelfError;
use rand::Rng;
use tokio::time::Instant;
use tracing::debug;

/// A capacity-bounded container of placed orders.
///
/// Primary shelves serve exactly one [`Temperature`]; the overflow shelf serves
/// all of them and decays its contents twice as fast.
#[derive(Debug, Clone)]
pub struct Shelf {
    name: String,
    temperatures: Vec<Temperature>,
    capacity: usize,
    orders: Vec<PlacedOrder>,
}

impl Shelf {
    /// Builds an empty shelf.
    ///
    /// # Errors
    /// [`ShelfError::InvalidCapacity`] when `capacity` is negative.
    pub fn new(
        name: impl Into<String>,
        temperatures: impl IntoIterator<Item = Temperature>,
        capacity: i64,
    ) -> Result<Self, ShelfError> {
        let name = name.into();
        let capacity = usize::try_from(capacity)
            .map_err(|_| ShelfError::InvalidCapacity { name: name.clone(), capacity })?;

        let mut temperatures: Vec<Temperature> = temperatures.into_iter().collect();
        temperatures.sort();
        temperatures.dedup();

        Ok(Self {
            name,
            temperatures,
            capacity,
            orders: Vec::with_capacity(capacity),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn temperatures(&self) -> &[Temperature] {
        &self.temperatures
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// True once the shelf holds `capacity` orders. A zero-capacity shelf is always full.
    pub fn is_full(&self) -> bool {
        self.orders.len() >= self.capacity
    }

    /// Ids of the stored orders, in insertion order.
    pub fn order_ids(&self) -> Vec<String> {
        self.orders.iter().map(|p| p.order.id.clone()).collect()
    }

    pub(crate) fn orders(&self) -> &[PlacedOrder] {
        &self.orders
    }

    /// Appends `placed` unless the shelf is full. Returns whether it was stored.
    pub fn place_order(&mut self, placed: PlacedOrder) -> bool {
        if self.is_full() {
            debug!(shelf = %self.name, order_id = %placed.order.id, "Shelf full, order not placed");
            return false;
        }
        self.orders.push(placed);
        true
    }

    /// Removes the first order with `id`. Returns `false` if none matched.
    pub fn remove_order_by_id(&mut self, id: &str) -> bool {
        match self.orders.iter().position(|p| p.order.id == id) {
            Some(index) => {
                self.orders.remove(index);
                true
            }
            None => false,
        }
    }

    /// Removes the order at `index`. Returns `false` if out of range.
    pub fn remove_order_at_index(&mut self, index: usize) -> bool {
        self.take_order_at_index(index).is_some()
    }

    /// Removes and returns the order at `index`.
    pub fn take_order_at_index(&mut self, index: usize) -> Option<PlacedOrder> {
        (index < self.orders.len()).then(|| self.orders.remove(index))
    }

    /// Drops every order whose freshness has reached zero, as of now.
    pub fn remove_expired_orders(&mut self) -> Vec<PlacedOrder> {
        self.remove_expired_orders_at(Instant::now())
    }

    /// Drops every order whose freshness at `now` is `<= 0` and returns them.
    pub fn remove_expired_orders_at(&mut self, now: Instant) -> Vec<PlacedOrder> {
        let modifier = self.decay_modifier();
        let (kept, expired): (Vec<_>, Vec<_>) = std::mem::take(&mut self.orders)
            .into_iter()
            .partition(|placed| freshness_with(placed, now, modifier) > 0.0);
        self.orders = kept;
        expired
    }

    /// Picks a uniformly random position among the stored orders.
    ///
    /// # Errors
    /// [`ShelfError::EmptyShelfOrders`] when there is nothing to pick.
    pub fn random_order_index<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<usize, ShelfError> {
        if self.orders.is_empty() {
            return Err(ShelfError::EmptyShelfOrders(self.name.clone()));
        }
        Ok(rng.gen_range(0..self.orders.len()))
    }

    /// `1` for a single-temperature shelf, `2` otherwise.
    pub fn decay_modifier(&self) -> f64 {
        if self.temperatures.len() == 1 {
            1.0
        } else {
            2.0
        }
    }

    /// Freshness of `placed` at `now` if it were stored on this shelf.
    pub fn freshness(&self, placed: &PlacedOrder, now: Instant) -> f64 {
        freshness_with(placed, now, self.decay_modifier())
    }
}

fn freshness_with(placed: &PlacedOrder, now: Instant, modifier: f64) -> f64 {
    let order = &placed.order;
    // zero shelf life is expired on arrival, not a division by zero
    if order.shelf_life == 0 {
        return 0.0;
    }
    let shelf_life = f64::from(order.shelf_life);
    let age = now.saturating_duration_since(placed.queued_at).as_secs_f64();
    (shelf_life - order.decay_rate * age * modifier) / shelf_life
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Order;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Duration;

    fn placed(id: &str, shelf_life: u32, decay_rate: f64, queued_at: Instant) -> PlacedOrder {
        PlacedOrder::new(Order::new(id, "food", "hot", shelf_life, decay_rate), queued_at)
    }

    #[test]
    fn test_new_shelf() {
        let s1 = Shelf::new("shelf1", [], 0).unwrap();
        assert!(s1.is_full());

        let s2 = Shelf::new("shelf2", [], 1).unwrap();
        assert!(!s2.is_full());

        let s3 = Shelf::new("shelf3", [], -1);
        assert_eq!(
            s3.unwrap_err(),
            ShelfError::InvalidCapacity { name: "shelf3".into(), capacity: -1 }
        );
    }

    #[test]
    fn test_place_order() {
        let mut shelf = Shelf::new("shelf", [Temperature::Hot], 1).unwrap();
        assert!(shelf.place_order(placed("1", 10, 0.1, Instant::now())));
        assert_eq!(shelf.len(), 1);
        assert!(shelf.is_full());
    }

    #[test]
    fn test_place_order_when_full() {
        let mut shelf = Shelf::new("shelf", [Temperature::Hot], 0).unwrap();
        assert!(!shelf.place_order(placed("1", 10, 0.1, Instant::now())));
        assert!(shelf.is_empty());

        let mut shelf = Shelf::new("shelf", [Temperature::Hot], 2).unwrap();
        for id in ["1", "2", "3"] {
            shelf.place_order(placed(id, 10, 0.1, Instant::now()));
        }
        assert_eq!(shelf.order_ids(), vec!["1", "2"]);
    }

    #[test]
    fn test_decay_modifier() {
        for temp in Temperature::ALL {
            assert_eq!(Shelf::new("p", [temp], 1).unwrap().decay_modifier(), 1.0);
        }
        assert_eq!(Shelf::new("none", [], 1).unwrap().decay_modifier(), 2.0);
        assert_eq!(Shelf::new("overflow", Temperature::ALL, 1).unwrap().decay_modifier(), 2.0);
        // duplicates collapse to one temperature
        let dup = Shelf::new("dup", [Temperature::Hot, Temperature::Hot], 1).unwrap();
        assert_eq!(dup.decay_modifier(), 1.0);
    }

    #[test]
    fn test_freshness_sign() {
        let hot = Shelf::new("hot", [Temperature::Hot], 10).unwrap();
        let queued = Instant::now();
        let after = |secs| queued + Duration::from_secs(secs);

        let cases = [
            // (shelf_life, decay_rate, age, expired)
            (300, 0.45, 0, false),
            (300, 1.0, 0, false),
            (300, 0.45, 50, false),
            (300, 0.45, 800, true),
            (300, 0.0, 800, false),
            (0, 1.0, 0, true),
            (0, 0.0, 0, true),
            (0, 100.0, 1000, true),
        ];
        for (shelf_life, decay_rate, age, expired) in cases {
            let order = placed("o", shelf_life, decay_rate, queued);
            let value = hot.freshness(&order, after(age));
            assert!(value.is_finite());
            assert_eq!(value <= 0.0, expired, "life={shelf_life} rate={decay_rate} age={age}");
        }
    }

    #[test]
    fn test_freshness_values() {
        let queued = Instant::now();
        let order = placed("o", 300, 0.45, queued);
        let now = queued + Duration::from_secs(100);

        let hot = Shelf::new("hot", [Temperature::Hot], 10).unwrap();
        let overflow = Shelf::new("overflow", Temperature::ALL, 10).unwrap();
        assert!((hot.freshness(&order, now) - 0.85).abs() < 1e-9);
        assert!((overflow.freshness(&order, now) - 0.70).abs() < 1e-9);
    }

    #[test]
    fn test_freshness_before_queued_time_is_full() {
        let hot = Shelf::new("hot", [Temperature::Hot], 10).unwrap();
        let now = Instant::now();
        let order = placed("o", 300, 0.45, now + Duration::from_secs(5));
        assert_eq!(hot.freshness(&order, now), 1.0);
    }

    #[test]
    fn test_remove_expired_orders() {
        let mut shelf = Shelf::new("hot", [Temperature::Hot], 3).unwrap();
        let queued = Instant::now();
        shelf.place_order(placed("zero", 0, 0.45, queued));
        shelf.place_order(placed("fresh", 300, 0.45, queued));
        shelf.place_order(placed("stale", 300, 0.45, queued));

        let removed = shelf.remove_expired_orders_at(queued + Duration::from_secs(1));
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].id(), "zero");
        assert_eq!(shelf.order_ids(), vec!["fresh", "stale"]);

        let removed = shelf.remove_expired_orders_at(queued + Duration::from_secs(800));
        assert_eq!(removed.len(), 2);
        assert!(shelf.is_empty());
    }

    #[test]
    fn test_overflow_expires_twice_as_fast() {
        let queued = Instant::now();
        // expires after 400s on a primary shelf, 200s on overflow
        let mut hot = Shelf::new("hot", [Temperature::Hot], 1).unwrap();
        let mut overflow = Shelf::new("overflow", Temperature::ALL, 1).unwrap();
        hot.place_order(placed("a", 200, 0.5, queued));
        overflow.place_order(placed("a", 200, 0.5, queued));

        let now = queued + Duration::from_secs(250);
        assert!(hot.remove_expired_orders_at(now).is_empty());
        assert_eq!(overflow.remove_expired_orders_at(now).len(), 1);
    }

    #[test]
    fn test_remove_order_at_index() {
        let mut shelf = Shelf::new("s", [], 2).unwrap();
        shelf.place_order(placed("1", 10, 0.1, Instant::now()));
        shelf.place_order(placed("2", 10, 0.1, Instant::now()));

        assert!(shelf.remove_order_at_index(0));
        assert_eq!(shelf.order_ids(), vec!["2"]);
        assert!(!shelf.remove_order_at_index(5));
        assert_eq!(shelf.take_order_at_index(0).map(|p| p.order.id), Some("2".to_string()));
        assert!(shelf.take_order_at_index(0).is_none());
    }

    #[test]
    fn test_remove_order_by_id() {
        let mut shelf = Shelf::new("s", [], 1).unwrap();
        shelf.place_order(placed("1", 10, 0.1, Instant::now()));

        // unknown id leaves the shelf untouched
        assert!(!shelf.remove_order_by_id("2"));
        assert_eq!(shelf.len(), 1);

        assert!(shelf.remove_order_by_id("1"));
        assert!(shelf.is_empty());
        assert!(!shelf.remove_order_by_id("1"));
    }

    #[test]
    fn test_random_order_index() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut shelf = Shelf::new("s", [], 5).unwrap();
        assert_eq!(
            shelf.random_order_index(&mut rng),
            Err(ShelfError::EmptyShelfOrders("s".into()))
        );

        shelf.place_order(placed("only", 10, 0.1, Instant::now()));
        assert_eq!(shelf.random_order_index(&mut rng), Ok(0));

        for id in ["a", "b", "c", "d"] {
            shelf.place_order(placed(id, 10, 0.1, Instant::now()));
        }
        let mut hits = [0usize; 5];
        for _ in 0..500 {
            hits[shelf.random_order_index(&mut rng).unwrap()] += 1;
        }
        assert!(hits.iter().all(|&n| n > 0), "every index should be picked: {hits:?}");
    }

    #[test]
    fn test_random_order_index_is_reproducible() {
        let mut shelf = Shelf::new("s", [], 10).unwrap();
        for i in 0..10 {
            shelf.place_order(placed(&i.to_string(), 10, 0.1, Instant::now()));
        }
        let picks = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..8).map(|_| shelf.random_order_index(&mut rng).unwrap()).collect::<Vec<_>>()
        };
        assert_eq!(picks(42), picks(42));
    }
}
