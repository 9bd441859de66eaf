//! Capacity-bounded shelves and the freshness model.
//!
//! A [`Shelf`] stores [`PlacedOrder`](crate::model::PlacedOrder)s for one or more
//! temperatures. It never grows past its capacity: placing onto a full shelf is a
//! no-op, and making room is the [`Kitchen`](crate::kitchen::Kitchen)'s job.

pub mod core;
pub mod error;

pub use self::core::*;
pub use error::*;
