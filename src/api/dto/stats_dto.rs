//! Statistics DTOs for the dashboard endpoints.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::product_dto::ProductResponse;
use crate::domain::ProductStatus;
use crate::domain::stats::{GroupCount, GroupField, GroupValue, InventorySummary, StatusShare};

/// Number of groups listed in each top-N section of the summary.
pub const SUMMARY_TOP: usize = 5;

/// Number of products listed as recent activity in the summary.
pub const SUMMARY_RECENT: usize = 5;

/// Response body for `GET /stats/summary`.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    /// Number of products.
    pub total: usize,
    /// Per-status counts, in registry order.
    pub status_distribution: Vec<StatusShare>,
    /// Most populated status, absent for an empty inventory.
    pub most_common_status: Option<ProductStatus>,
    /// Sum of all purchase values.
    pub total_value: f64,
    /// Summed value per category.
    pub value_by_category: Vec<GroupValue>,
    /// Largest categories.
    pub top_categories: Vec<GroupCount>,
    /// Largest locations.
    pub top_locations: Vec<GroupCount>,
    /// Number of distinct categories.
    pub distinct_categories: usize,
    /// Number of distinct locations.
    pub distinct_locations: usize,
    /// Most recently updated products.
    pub recent_activity: Vec<ProductResponse>,
}

impl From<InventorySummary> for SummaryResponse {
    fn from(s: InventorySummary) -> Self {
        Self {
            total: s.total,
            status_distribution: s.status_distribution,
            most_common_status: s.most_common_status,
            total_value: s.total_value,
            value_by_category: s.value_by_category,
            top_categories: s.top_categories,
            top_locations: s.top_locations,
            distinct_categories: s.distinct_categories,
            distinct_locations: s.distinct_locations,
            recent_activity: s.recent_activity.into_iter().map(Into::into).collect(),
        }
    }
}

/// Query parameters for `GET /stats/groups`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GroupsQuery {
    /// `category` or `location`.
    pub field: GroupField,
    /// Maximum number of groups; all groups when omitted.
    pub limit: Option<usize>,
}

/// Response body for `GET /stats/groups`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GroupsResponse {
    /// Field the products were grouped by.
    pub field: GroupField,
    /// Groups, largest first; ties keep first-seen order.
    pub groups: Vec<GroupCount>,
}

/// Query parameters for `GET /stats/recent`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RecentQuery {
    /// Number of products. Defaults to 5.
    #[serde(default = "default_recent_limit")]
    pub limit: usize,
}

fn default_recent_limit() -> usize {
    SUMMARY_RECENT
}
