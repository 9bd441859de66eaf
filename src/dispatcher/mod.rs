//! The event loop that drives the kitchen.
//!
//! # Main Components
//!
//! - [`Dispatcher`] - Owns the [`Kitchen`](crate::kitchen::Kitchen) and serializes every mutation
//! - [`KitchenClient`] - Cloneable handle for submitting orders and querying shelves
//! - [`KitchenRequest`] - Messages the client sends to the loop
//! - [`DispatchStats`] / [`DispatchReport`] - What happened during a run
//! - [`DispatchError`] - Failures of client calls

pub mod client;
pub mod error;
pub mod event_loop;
pub mod message;
pub mod stats;

pub use client::*;
pub use error::*;
pub use event_loop::*;
pub use message::*;
pub use stats::*;
