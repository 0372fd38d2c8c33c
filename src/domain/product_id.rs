//! Type-safe product identifier.
//!
//! [`ProductId`] is a newtype wrapper around [`uuid::Uuid`] (v4) so that
//! product identifiers cannot be confused with log entry IDs or other UUIDs.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for a tracked product.
///
/// Generated once at creation time and immutable thereafter. Used as the
/// store key, the foreign key of every checkout log entry, and the
/// WebSocket subscription target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(uuid::Uuid);

impl ProductId {
    /// Creates a new random `ProductId` (UUID v4).
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Creates a `ProductId` from an existing [`uuid::Uuid`].
    #[must_use]
    pub const fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner [`uuid::Uuid`].
    #[must_use]
    pub const fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<uuid::Uuid> for ProductId {
    fn from(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }
}

impl From<ProductId> for uuid::Uuid {
    fn from(id: ProductId) -> Self {
        id.0
    }
}
