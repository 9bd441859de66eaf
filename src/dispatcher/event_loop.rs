//! # Dispatcher Event Loop
//!
//! The `Dispatcher` is the only owner of the [`Kitchen`]. It waits on four sources
//! and handles exactly one event before waiting again:
//!
//! 1. **Ingestion tick** - every `1 / rate` seconds, accept the next queued order
//!    and schedule a courier at a random delay within the pickup window.
//! 2. **Courier arrival** - a pickup timer fired; remove that order if still present.
//! 3. **Sweep tick** - discard expired orders on every shelf.
//! 4. **Client request** - see [`KitchenRequest`].
//!
//! Courier timers run as detached tasks but only send an order id back over a
//! channel. They never touch the kitchen, so accept, pickup and sweep are
//! serialized without any locks.

use crate::dispatcher::{
    DispatchError, DispatchReport, DispatchStats, KitchenClient, KitchenRequest,
};
use crate::kitchen::Kitchen;
use crate::model::Order;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Timing knobs for the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchSettings {
    /// Orders ingested per second.
    pub ingestion_rate: u32,
    pub min_pickup: Duration,
    pub max_pickup: Duration,
    pub sweep_interval: Duration,
    /// Dump shelf contents after every event.
    pub verbose: bool,
    /// Keep running after the feed is drained until every client is dropped.
    pub keep_running: bool,
    /// Seed for courier delays. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            ingestion_rate: 2,
            min_pickup: Duration::from_secs(2),
            max_pickup: Duration::from_secs(6),
            sweep_interval: Duration::from_secs(10),
            verbose: false,
            keep_running: false,
            seed: None,
        }
    }
}

impl DispatchSettings {
    fn ingestion_period(&self) -> Duration {
        (Duration::from_secs(1) / self.ingestion_rate.max(1)).max(Duration::from_millis(1))
    }
}

/// Single-owner event loop over a [`Kitchen`].
pub struct Dispatcher {
    kitchen: Kitchen,
    settings: DispatchSettings,
    receiver: mpsc::Receiver<KitchenRequest>,
    requests_open: bool,
    pickup_tx: mpsc::UnboundedSender<String>,
    pickup_rx: mpsc::UnboundedReceiver<String>,
    pending_pickups: usize,
    queue: VecDeque<Order>,
    rng: StdRng,
    stats: DispatchStats,
}

impl Dispatcher {
    /// Creates the loop and its client.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - Capacity of the request channel. Client calls wait when it is full.
    pub fn new(
        kitchen: Kitchen,
        settings: DispatchSettings,
        buffer_size: usize,
    ) -> (Self, KitchenClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (pickup_tx, pickup_rx) = mpsc::unbounded_channel();
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let dispatcher = Self {
            kitchen,
            settings,
            receiver,
            requests_open: true,
            pickup_tx,
            pickup_rx,
            pending_pickups: 0,
            queue: VecDeque::new(),
            rng,
            stats: DispatchStats::default(),
        };
        (dispatcher, KitchenClient::new(sender))
    }

    /// Runs until the feed is drained and no courier is outstanding.
    ///
    /// In service mode (`keep_running`) the loop also waits for every
    /// [`KitchenClient`] to be dropped.
    pub async fn run(mut self, orders: Vec<Order>) -> DispatchReport {
        self.queue.extend(orders);
        info!(
            queued = self.queue.len(),
            rate = self.settings.ingestion_rate,
            keep_running = self.settings.keep_running,
            "Dispatcher started"
        );

        let start = Instant::now();
        let period = self.settings.ingestion_period();
        let mut ingest = time::interval_at(start + period, period);
        ingest.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let sweep_every = self.settings.sweep_interval.max(Duration::from_millis(1));
        let mut sweep = time::interval_at(start + sweep_every, sweep_every);
        sweep.set_missed_tick_behavior(MissedTickBehavior::Delay);

        while !self.is_finished() {
            tokio::select! {
                _ = ingest.tick(), if !self.queue.is_empty() => self.ingest_next(),
                Some(order_id) = self.pickup_rx.recv() => self.courier_arrived(order_id),
                _ = sweep.tick() => {
                    self.sweep();
                }
                request = self.receiver.recv(), if self.requests_open => match request {
                    Some(request) => self.handle_request(request),
                    None => {
                        debug!("All clients dropped");
                        self.requests_open = false;
                    }
                },
            }
        }

        let remaining = self.kitchen.shelves_snapshot();
        info!(
            stats = ?self.stats,
            remaining = remaining.total_orders(),
            "Dispatcher stopped"
        );
        DispatchReport {
            stats: self.stats,
            remaining,
        }
    }

    fn is_finished(&self) -> bool {
        let drained = self.queue.is_empty() && self.pending_pickups == 0;
        drained && (!self.settings.keep_running || !self.requests_open)
    }

    fn ingest_next(&mut self) {
        let Some(order) = self.queue.pop_front() else {
            return;
        };
        let order_id = order.id.clone();
        let name = order.name.clone();

        let placement = self.kitchen.accept_order(order);
        self.stats.record_placement(&placement);

        let delay = self.pickup_delay();
        self.schedule_pickup(order_id.clone(), delay);

        info!(
            %order_id,
            %name,
            shelf = %placement,
            pickup_in_secs = delay.as_secs(),
            "Order received"
        );
        self.dump_shelves();
    }

    /// Uniform over `[min_pickup, max_pickup]`.
    fn pickup_delay(&mut self) -> Duration {
        let (min, max) = (self.settings.min_pickup, self.settings.max_pickup);
        if max <= min {
            return min;
        }
        Duration::from_secs_f64(self.rng.gen_range(min.as_secs_f64()..=max.as_secs_f64()))
    }

    fn schedule_pickup(&mut self, order_id: String, delay: Duration) {
        self.pending_pickups += 1;
        let courier = self.pickup_tx.clone();
        tokio::spawn(async move {
            time::sleep(delay).await;
            // receiver lives as long as the loop; a send error means it already stopped
            let _ = courier.send(order_id);
        });
    }

    fn courier_arrived(&mut self, order_id: String) {
        self.pending_pickups = self.pending_pickups.saturating_sub(1);
        let delivered = self.kitchen.pickup_order_by_id(&order_id);
        self.stats.record_pickup(delivered);
        info!(%order_id, delivered, "Order picked up");
        self.dump_shelves();
    }

    fn sweep(&mut self) -> usize {
        let expired = self.kitchen.remove_expired_orders();
        self.stats.sweeps += 1;
        self.stats.expired += expired.len();
        for order in &expired {
            debug!(order_id = %order.id, name = %order.name, "Discarded expired order");
        }
        info!(count = expired.len(), "Expired orders discarded");
        self.dump_shelves();
        expired.len()
    }

    fn handle_request(&mut self, request: KitchenRequest) {
        match request {
            KitchenRequest::Submit { order, respond_to } => {
                debug!(order_id = %order.id, "Submit");
                let result = match order.validate() {
                    Ok(()) if self.is_in_flight(&order.id) => {
                        warn!(order_id = %order.id, "Submit rejected, id in flight");
                        Err(DispatchError::DuplicateId(order.id))
                    }
                    Ok(()) => {
                        self.queue.push_back(order);
                        Ok(self.queue.len())
                    }
                    Err(e) => {
                        warn!(error = %e, "Submit rejected");
                        Err(DispatchError::from(e))
                    }
                };
                let _ = respond_to.send(result);
            }
            KitchenRequest::Pickup {
                order_id,
                respond_to,
            } => {
                let delivered = self.kitchen.pickup_order_by_id(&order_id);
                self.stats.record_pickup(delivered);
                info!(%order_id, delivered, "Order picked up");
                self.dump_shelves();
                let _ = respond_to.send(Ok(delivered));
            }
            KitchenRequest::Snapshot { respond_to } => {
                let _ = respond_to.send(Ok(self.kitchen.shelves_snapshot()));
            }
            KitchenRequest::Sweep { respond_to } => {
                let removed = self.sweep();
                let _ = respond_to.send(Ok(removed));
            }
        }
    }

    /// Queued, or still on a shelf.
    fn is_in_flight(&self, order_id: &str) -> bool {
        self.queue.iter().any(|o| o.id == order_id) || self.kitchen.contains(order_id)
    }

    fn dump_shelves(&self) {
        if self.settings.verbose {
            info!("Kitchen:\n{}", self.kitchen.shelves_snapshot());
        }
    }
}
