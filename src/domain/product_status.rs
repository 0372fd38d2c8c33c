//! Product lifecycle statuses and their display registry.
//!
//! [`ProductStatus`] is the closed set of six lifecycle states, in their
//! canonical order. Display metadata lives in a separate lookup table
//! ([`StatusInfo`]) so that "which statuses exist" and "how one is rendered"
//! stay independent.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::InventoryError;

/// Lifecycle status of a product. Wire values are `SCREAMING_SNAKE_CASE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductStatus {
    /// Ready for use.
    Available,
    /// Checked out to a person for an event. Requires `picked_by`.
    InEvent,
    /// Broken and awaiting triage.
    Defective,
    /// With a repairer.
    InRepair,
    /// Whereabouts unknown.
    Missing,
    /// Permanently out of service.
    Retired,
}

/// Display metadata for a single status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusInfo {
    /// Status this entry describes.
    pub status: ProductStatus,
    /// Human-readable label, e.g. `"In Event"`.
    pub label: &'static str,
    /// Icon glyph.
    pub icon: &'static str,
    /// CSS utility classes used for badges.
    pub color_class: &'static str,
    /// One-line description.
    pub description: &'static str,
}

const AVAILABLE_INFO: StatusInfo = StatusInfo {
    status: ProductStatus::Available,
    label: "Available",
    icon: "✓",
    color_class: "bg-green-100 text-green-800 border-green-200",
    description: "Ready for use",
};

const IN_EVENT_INFO: StatusInfo = StatusInfo {
    status: ProductStatus::InEvent,
    label: "In Event",
    icon: "📅",
    color_class: "bg-orange-100 text-orange-800 border-orange-200",
    description: "Currently in use",
};

const DEFECTIVE_INFO: StatusInfo = StatusInfo {
    status: ProductStatus::Defective,
    label: "Defective",
    icon: "⚠️",
    color_class: "bg-red-100 text-red-800 border-red-200",
    description: "Needs attention",
};

const IN_REPAIR_INFO: StatusInfo = StatusInfo {
    status: ProductStatus::InRepair,
    label: "In Repair",
    icon: "🔧",
    color_class: "bg-blue-100 text-blue-800 border-blue-200",
    description: "Being repaired",
};

const MISSING_INFO: StatusInfo = StatusInfo {
    status: ProductStatus::Missing,
    label: "Missing",
    icon: "❓",
    color_class: "bg-gray-100 text-gray-800 border-gray-200",
    description: "Location unknown",
};

const RETIRED_INFO: StatusInfo = StatusInfo {
    status: ProductStatus::Retired,
    label: "Retired",
    icon: "📦",
    color_class: "bg-purple-100 text-purple-800 border-purple-200",
    description: "Out of service",
};

impl ProductStatus {
    /// All statuses in canonical order.
    pub const ALL: [Self; 6] = [
        Self::Available,
        Self::InEvent,
        Self::Defective,
        Self::InRepair,
        Self::Missing,
        Self::Retired,
    ];

    /// Returns the wire string for this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::InEvent => "IN_EVENT",
            Self::Defective => "DEFECTIVE",
            Self::InRepair => "IN_REPAIR",
            Self::Missing => "MISSING",
            Self::Retired => "RETIRED",
        }
    }

    /// Returns the display metadata for this status.
    #[must_use]
    pub const fn info(self) -> &'static StatusInfo {
        match self {
            Self::Available => &AVAILABLE_INFO,
            Self::InEvent => &IN_EVENT_INFO,
            Self::Defective => &DEFECTIVE_INFO,
            Self::InRepair => &IN_REPAIR_INFO,
            Self::Missing => &MISSING_INFO,
            Self::Retired => &RETIRED_INFO,
        }
    }

    /// Whether a product in this status must name who holds it.
    #[must_use]
    pub const fn requires_holder(self) -> bool {
        matches!(self, Self::InEvent)
    }
}

/// Returns display metadata for every status, in canonical order.
pub fn registry() -> impl Iterator<Item = &'static StatusInfo> {
    ProductStatus::ALL.into_iter().map(ProductStatus::info)
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductStatus {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| InventoryError::InvalidStatus(s.to_string()))
    }
}
