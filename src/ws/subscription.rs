//! Per-connection subscription manager.
//!
//! Tracks which products a WebSocket client follows and filters events
//! server-side.

use std::collections::HashSet;

use crate::domain::ProductId;

/// Manages the set of product subscriptions for a single WebSocket
/// connection.
#[derive(Debug, Default)]
pub struct SubscriptionManager {
    /// Subscribed product IDs. Ignored while `subscribe_all` is set.
    product_ids: HashSet<ProductId>,
    /// Whether the client follows every product (wildcard `"*"`).
    subscribe_all: bool,
}

impl SubscriptionManager {
    /// Creates a new empty subscription manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds product IDs to the subscription set.
    pub fn subscribe(&mut self, ids: &[ProductId], wildcard: bool) {
        if wildcard {
            self.subscribe_all = true;
        }
        self.product_ids.extend(ids.iter().copied());
    }

    /// Removes product IDs from the subscription set.
    pub fn unsubscribe(&mut self, ids: &[ProductId], wildcard: bool) {
        if wildcard {
            self.subscribe_all = false;
        }
        for id in ids {
            self.product_ids.remove(id);
        }
    }

    /// Returns `true` if events for `product_id` should be forwarded.
    #[must_use]
    pub fn matches(&self, product_id: ProductId) -> bool {
        self.subscribe_all || self.product_ids.contains(&product_id)
    }

    /// Returns the number of explicitly subscribed product IDs.
    #[must_use]
    pub fn count(&self) -> usize {
        self.product_ids.len()
    }

    /// Returns `true` if the wildcard subscription is active.
    #[must_use]
    pub fn is_subscribed_all(&self) -> bool {
        self.subscribe_all
    }
}

/// Splits raw IDs into parsed product IDs, a wildcard flag, and the raw
/// values that were neither.
#[must_use]
pub fn parse_targets(raw: &[String]) -> (Vec<ProductId>, bool, Vec<String>) {
    let mut ids = Vec::new();
    let mut wildcard = false;
    let mut rejected = Vec::new();
    for value in raw {
        if value == "*" {
            wildcard = true;
        } else if let Ok(uuid) = value.parse::<uuid::Uuid>() {
            ids.push(ProductId::from_uuid(uuid));
        } else {
            rejected.push(value.clone());
        }
    }
    (ids, wildcard, rejected)
}
