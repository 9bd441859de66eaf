//! The kitchen: one primary shelf per temperature plus a shared overflow shelf.
//!
//! [`Kitchen::accept_order`] decides where an order goes, moving or evicting
//! overflow orders when space runs out. Pickup and expiry act across every shelf,
//! since an order's temperature alone does not say where it is stored.

pub mod core;
pub mod error;
pub mod snapshot;

pub use self::core::*;
pub use error::*;
pub use snapshot::*;
