//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter that hides
//! module targets. The level comes from `RUST_LOG` and defaults to `info`.
//!
//! ## Usage Examples
//!
//! ```bash
//! # Order lifecycle events only
//! cloud-kitchen --orders orders.json
//!
//! # Add rejected submits, discarded ids and client calls
//! RUST_LOG=debug cloud-kitchen --orders orders.json
//!
//! # Shelf dump after every event
//! cloud-kitchen --orders orders.json --verbose
//! ```
//!
//! ## What Gets Traced
//!
//! With `RUST_LOG=info` a run reads like:
//!
//! ```text
//! INFO Dispatcher started queued=132 rate=2 keep_running=false
//! INFO Order received order_id=a8cfcb76 name=Banana Split shelf=frozen pickup_in_secs=4
//! WARN Evicted order from overflow order_id=58e9b5fe
//! INFO Order picked up order_id=a8cfcb76 delivered=true
//! INFO Expired orders discarded count=0
//! INFO Dispatcher stopped stats=DispatchStats { .. } remaining=0
//! ```

use tracing_subscriber::EnvFilter;

pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
