//! Service layer: business logic orchestration.
//!
//! [`InventoryService`] validates writes, delegates persistence to an
//! [`crate::persistence::InventoryStore`], and emits events through the
//! [`super::domain::EventBus`].

pub mod inventory_service;

pub use inventory_service::InventoryService;
