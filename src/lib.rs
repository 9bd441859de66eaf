//! # Cloud Kitchen
//!
//! > **A simulation of order fulfillment for a delivery-only kitchen.**
//!
//! Orders arrive at a fixed rate, are cooked instantly and placed on a shelf that
//! matches their temperature. Each order loses value over time; a courier
//! arrives a few seconds later to take it away. When shelves fill up, orders
//! spill onto a shared overflow shelf, where they decay twice as fast.
//!
//! ## 🏗️ Design
//!
//! ### One owner for all kitchen state
//! The [`Dispatcher`](dispatcher::Dispatcher) runs in a single Tokio task and owns the
//! [`Kitchen`](kitchen::Kitchen). Ingestion ticks, courier arrivals, expiry sweeps and
//! client requests are messages it handles one at a time, so shelf state needs no locks.
//!
//! ### Time is injected
//! Freshness is computed against [`tokio::time::Instant`]. Tests pause the Tokio clock
//! and advance it, which makes decay and courier timing deterministic.
//!
//! ### Type-Safe Error Handling
//! Each component defines its own error (`ShelfError`, `KitchenError`, `LoadError`,
//! `ConfigError`, `DispatchError`). [`SimulationError`](lifecycle::SimulationError)
//! collects them with `#[from]` for the binary.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Data ([`model`])
//! - **Role**: Orders as they appear in the input file, plus loading and validation.
//! - **Key items**: [`Order`](model::Order), [`Temperature`](model::Temperature), [`load_orders`](model::load_orders).
//!
//! ### 2. Storage ([`shelf`], [`kitchen`])
//! - **Role**: Capacity-bounded shelves, the freshness formula, routing with overflow, migration and eviction.
//! - **Key items**: [`Shelf`](shelf::Shelf), [`Kitchen::accept_order`](kitchen::Kitchen::accept_order).
//!
//! ### 3. The Engine ([`dispatcher`])
//! - **Role**: The event loop and its client.
//! - **Key items**: [`Dispatcher`](dispatcher::Dispatcher), [`KitchenClient`](dispatcher::KitchenClient).
//!
//! ### 4. The Orchestrator ([`config`], [`lifecycle`])
//! - **Role**: Layered settings, tracing setup, start and shutdown.
//! - **Key items**: [`KitchenConfig`](config::KitchenConfig), [`KitchenSystem`](lifecycle::KitchenSystem).
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! RUST_LOG=info cargo run -- --orders orders.json --verbose
//! ```

pub mod config;
pub mod dispatcher;
pub mod kitchen;
pub mod lifecycle;
pub mod model;
pub mod shelf;
