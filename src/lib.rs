//! # inventory-gateway
//!
//! REST API and WebSocket gateway for tracking physical inventory.
//!
//! Every product carries one of six lifecycle statuses. A product that is
//! `IN_EVENT` always names who holds it, and every status change leaves an
//! immutable entry in the checkout log, written in the same transaction as
//! the product update. Dashboard statistics are recomputed from the current
//! product set on each request.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Handler (ws/)
//!     │
//!     ├── InventoryService (service/)
//!     ├── EventBus (domain/)
//!     │
//!     ├── Products, statuses, log, statistics (domain/)
//!     │
//!     └── InventoryStore (persistence/)
//!             ├── PostgresStore
//!             └── MemoryStore
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
pub mod ws;
