//! WebSocket layer: connection handling and product subscriptions.
//!
//! The endpoint at `/ws` pushes change notifications so clients can refetch
//! the products and statistics they display instead of polling.

pub mod connection;
pub mod handler;
pub mod messages;
pub mod subscription;
