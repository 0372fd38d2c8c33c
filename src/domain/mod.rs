//! Domain layer: products, statuses, the checkout log, statistics, and the
//! event system.
//!
//! Nothing in here touches storage or HTTP. The write rules live on the
//! domain types themselves so every store backend enforces them the same way.

pub mod checkout_log;
pub mod event_bus;
pub mod filter;
pub mod inventory_event;
pub mod product;
pub mod product_id;
pub mod product_status;
pub mod stats;

pub use checkout_log::{CheckoutAction, CheckoutHistoryEntry, CheckoutLogEntry, NewCheckoutLog};
pub use event_bus::EventBus;
pub use filter::ProductFilter;
pub use inventory_event::InventoryEvent;
pub use product::{NewProduct, Product, ProductPatch, UpdatePlan};
pub use product_id::ProductId;
pub use product_status::{ProductStatus, StatusInfo};
