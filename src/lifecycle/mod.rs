//! # Lifecycle
//!
//! Spins up the dispatcher for a [`KitchenConfig`](crate::config::KitchenConfig)
//! and tears it down again. See [`KitchenSystem`].

mod error;
mod kitchen_system;
pub mod tracing;

pub use error::*;
pub use kitchen_system::*;
