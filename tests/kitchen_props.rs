use cloud_kitchen::kitchen::{Kitchen, Placement, ShelfCapacities};
use cloud_kitchen::model::Order;
use proptest::prelude::*;
use std::collections::HashSet;
use std::time::Duration;
use tokio::time::Instant;

const LABELS: [&str; 4] = ["hot", "cold", "frozen", "any"];

#[derive(Debug, Clone)]
enum Op {
    Accept { label: usize, shelf_life: u32, decay_rate: f64 },
    Pickup(usize),
    Sweep { advance_secs: u64 },
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..LABELS.len(), 0u32..60, 0.0f64..2.0).prop_map(|(label, shelf_life, decay_rate)| {
            Op::Accept { label, shelf_life, decay_rate }
        }),
        2 => any::<usize>().prop_map(Op::Pickup),
        1 => (0u64..20).prop_map(|advance_secs| Op::Sweep { advance_secs }),
    ]
}

fn capacities() -> impl Strategy<Value = ShelfCapacities> {
    (0i64..4, 0i64..4, 0i64..4, 0i64..4).prop_map(|(hot, cold, frozen, overflow)| {
        ShelfCapacities { hot, cold, frozen, overflow }
    })
}

proptest! {
    /// No shelf ever holds more than its capacity, no order sits on two shelves,
    /// and every accepted order is accounted for.
    #[test]
    fn kitchen_invariants_hold(
        caps in capacities(),
        seed in any::<u64>(),
        ops in prop::collection::vec(op(), 1..80),
    ) {
        let mut kitchen = Kitchen::with_seed(caps, seed).unwrap();
        let start = Instant::now();
        let mut now = start;
        let mut accepted: Vec<String> = Vec::new();
        let mut gone = 0usize;

        for op in ops {
            match op {
                Op::Accept { label, shelf_life, decay_rate } => {
                    let id = format!("o{}", accepted.len());
                    accepted.push(id.clone());
                    let order = Order::new(id, "dish", LABELS[label], shelf_life, decay_rate);
                    match kitchen.accept_order_at(order, now) {
                        Placement::Primary(temp) => {
                            prop_assert_eq!(temp.label(), LABELS[label]);
                        }
                        Placement::Overflow { evicted, .. } => {
                            gone += usize::from(evicted.is_some());
                        }
                        Placement::Dropped => gone += 1,
                    }
                }
                Op::Pickup(k) => {
                    if !accepted.is_empty() {
                        let id = &accepted[k % accepted.len()];
                        gone += usize::from(kitchen.pickup_order_by_id(id));
                    }
                }
                Op::Sweep { advance_secs } => {
                    now += Duration::from_secs(advance_secs);
                    gone += kitchen.remove_expired_orders_at(now).len();
                }
            }

            let mut seen = HashSet::new();
            for shelf in kitchen.shelves() {
                prop_assert!(shelf.len() <= shelf.capacity());
                for id in shelf.order_ids() {
                    prop_assert!(seen.insert(id));
                }
            }
            prop_assert_eq!(seen.len(), kitchen.order_count());
            prop_assert_eq!(accepted.len(), kitchen.order_count() + gone);
        }
    }

    /// A hot order never lands on the cold or frozen shelf.
    #[test]
    fn orders_only_on_compatible_shelves(
        labels in prop::collection::vec(0..LABELS.len(), 1..60),
        seed in any::<u64>(),
    ) {
        let caps = ShelfCapacities { hot: 2, cold: 2, frozen: 2, overflow: 3 };
        let mut kitchen = Kitchen::with_seed(caps, seed).unwrap();
        let now = Instant::now();

        for (i, label) in labels.iter().enumerate() {
            kitchen.accept_order_at(Order::new(format!("o{i}"), "dish", LABELS[*label], 100, 1.0), now);
        }

        for shelf in kitchen.shelves() {
            let snapshot = kitchen.shelves_snapshot_at(now);
            let orders = &snapshot.shelf(shelf.name()).unwrap().orders;
            if shelf.temperatures().len() == 1 {
                for order in orders {
                    prop_assert_eq!(order.temp.as_str(), shelf.temperatures()[0].label());
                }
            }
        }
    }
}
