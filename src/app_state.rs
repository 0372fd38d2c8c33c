//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::EventBus;
use crate::service::InventoryService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Inventory service for all business logic.
    pub inventory_service: Arc<InventoryService>,
    /// Event bus for WebSocket subscriptions.
    pub event_bus: EventBus,
}

impl AppState {
    /// Builds the state around `service`, sharing its event bus.
    #[must_use]
    pub fn new(service: InventoryService) -> Self {
        let event_bus = service.event_bus().clone();
        Self {
            inventory_service: Arc::new(service),
            event_bus,
        }
    }
}
