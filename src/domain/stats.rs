//! Derived statistics over a product snapshot.
//!
//! Everything here is a pure reduction over `&[Product]`, recomputed on
//! every call. There is no cache and nothing to invalidate.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Product, ProductStatus};

/// Count and share of products in one status.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusShare {
    /// Status counted.
    pub status: ProductStatus,
    /// Display label from the registry.
    pub label: &'static str,
    /// Number of products in this status.
    pub count: usize,
    /// Percentage of all products, `0.0` when there are none.
    pub percentage: f64,
}

/// Text field products can be grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum GroupField {
    /// Group by `category`.
    Category,
    /// Group by `location`.
    Location,
}

impl GroupField {
    fn key(self, product: &Product) -> &str {
        match self {
            Self::Category => &product.category,
            Self::Location => &product.location,
        }
    }
}

/// Number of products sharing one field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct GroupCount {
    /// Field value.
    pub key: String,
    /// Number of products with that value.
    pub count: usize,
}

/// Summed value of products sharing one field value.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct GroupValue {
    /// Field value.
    pub key: String,
    /// Sum of `value` over the group.
    pub value: f64,
}

/// Dashboard snapshot combining all reductions.
#[derive(Debug, Clone, PartialEq)]
pub struct InventorySummary {
    /// Number of products.
    pub total: usize,
    /// Per-status distribution, all six statuses.
    pub status_distribution: Vec<StatusShare>,
    /// Most populated status; ties go to the earlier status.
    pub most_common_status: Option<ProductStatus>,
    /// Sum of all values.
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
    pub recent_activity: Vec<Product>,
}

/// Counts products per status, including statuses with no products.
pub fn status_distribution(products: &[Product]) -> Vec<StatusShare> {
    let total = products.len();
    ProductStatus::ALL
        .into_iter()
        .map(|status| {
            let count = products.iter().filter(|p| p.status == status).count();
            let percentage = if total == 0 {
                0.0
            } else {
                count as f64 * 100.0 / total as f64
            };
            StatusShare {
                status,
                label: status.info().label,
                count,
                percentage,
            }
        })
        .collect()
}

/// Counts products per value of `field`, in first-seen order.
pub fn group_counts(products: &[Product], field: GroupField) -> Vec<GroupCount> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for product in products {
        *counts.entry(field.key(product)).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(key, count)| GroupCount {
            key: key.to_string(),
            count,
        })
        .collect()
}

/// Sorts groups by descending count and keeps the first `n`.
///
/// The sort is stable, so equal counts keep their first-seen order.
pub fn top_n(mut groups: Vec<GroupCount>, n: usize) -> Vec<GroupCount> {
    groups.sort_by(|a, b| b.count.cmp(&a.count));
    groups.truncate(n);
    groups
}

/// Sums `value` over all products, counting absent values as zero.
pub fn total_value(products: &[Product]) -> f64 {
    products.iter().filter_map(|p| p.value).sum()
}

/// Sums `value` per category over products that have one.
pub fn value_by_category(products: &[Product]) -> Vec<GroupValue> {
    let mut sums: IndexMap<&str, f64> = IndexMap::new();
    for product in products {
        if let Some(value) = product.value {
            *sums.entry(product.category.as_str()).or_insert(0.0) += value;
        }
    }
    sums.into_iter()
        .map(|(key, value)| GroupValue {
            key: key.to_string(),
            value,
        })
        .collect()
}

/// Returns the `n` most recently updated products.
///
/// Equal `updated_at` values keep their snapshot order.
pub fn recent_activity(products: &[Product], n: usize) -> Vec<&Product> {
    let mut sorted: Vec<&Product> = products.iter().collect();
    sorted.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    sorted.truncate(n);
    sorted
}

/// Computes every reduction in one pass over the snapshot.
pub fn summarize(products: &[Product], top: usize, recent: usize) -> InventorySummary {
    let status_distribution = status_distribution(products);
    let most_common_status = status_distribution
        .iter()
        .filter(|share| share.count > 0)
        .fold(None::<&StatusShare>, |best, share| match best {
            Some(b) if b.count >= share.count => Some(b),
            _ => Some(share),
        })
        .map(|share| share.status);

    let categories = group_counts(products, GroupField::Category);
    let locations = group_counts(products, GroupField::Location);

    InventorySummary {
        total: products.len(),
        most_common_status,
        status_distribution,
        total_value: total_value(products),
        value_by_category: value_by_category(products),
        distinct_categories: categories.len(),
        distinct_locations: locations.len(),
        top_categories: top_n(categories, top),
        top_locations: top_n(locations, top),
        recent_activity: recent_activity(products, recent)
            .into_iter()
            .cloned()
            .collect(),
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::ProductId;
    use chrono::{DateTime, Duration, Utc};

    fn product(
        name: &str,
        category: &str,
        location: &str,
        status: ProductStatus,
        value: Option<f64>,
        updated_at: DateTime<Utc>,
    ) -> Product {
        Product {
            id: ProductId::new(),
            name: name.to_string(),
            description: format!("{name} description"),
            category: category.to_string(),
            location: location.to_string(),
            status,
            picked_by: status.requires_holder().then(|| "Alice".to_string()),
            serial_number: None,
            value,
            purchase_date: None,
            created_at: updated_at,
            updated_at,
        }
    }

    fn fixture() -> Vec<Product> {
        let t0 = Utc::now();
        vec![
            product("a", "AV", "Hall", ProductStatus::Available, Some(100.0), t0),
            product("b", "Lighting", "Depot", ProductStatus::InEvent, None, t0 + Duration::seconds(5)),
            product("c", "AV", "Depot", ProductStatus::Available, Some(50.5), t0 + Duration::seconds(1)),
            product("d", "Audio", "Hall", ProductStatus::Defective, Some(20.0), t0 + Duration::seconds(5)),
        ]
    }

    #[test]
    fn distribution_covers_all_statuses() {
        let shares = status_distribution(&fixture());
        assert_eq!(shares.len(), 6);
        let counts: Vec<usize> = shares.iter().map(|s| s.count).collect();
        assert_eq!(counts, [2, 1, 1, 0, 0, 0]);
        let sum: f64 = shares.iter().map(|s| s.percentage).sum();
        assert!((sum - 100.0).abs() < 1e-9);
        assert_eq!(shares.first().map(|s| s.label), Some("Available"));
    }

    #[test]
    fn distribution_of_empty_set_is_all_zero() {
        let shares = status_distribution(&[]);
        assert_eq!(shares.len(), 6);
        assert!(shares.iter().all(|s| s.count == 0 && s.percentage == 0.0));
    }

    #[test]
    fn distribution_percentages_sum_to_hundred_for_thirds() {
        let t0 = Utc::now();
        let products = vec![
            product("a", "x", "y", ProductStatus::Available, None, t0),
            product("b", "x", "y", ProductStatus::Missing, None, t0),
            product("c", "x", "y", ProductStatus::Retired, None, t0),
        ];
        let sum: f64 = status_distribution(&products).iter().map(|s| s.percentage).sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn groups_keep_first_seen_order() {
        let groups = group_counts(&fixture(), GroupField::Location);
        let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, ["Hall", "Depot"]);
    }

    #[test]
    fn top_n_breaks_ties_by_first_seen() {
        let groups = group_counts(&fixture(), GroupField::Category);
        let top = top_n(groups, 2);
        assert_eq!(
            top,
            vec![
                GroupCount { key: "AV".to_string(), count: 2 },
                GroupCount { key: "Lighting".to_string(), count: 1 },
            ]
        );
    }

    #[test]
    fn total_value_treats_missing_as_zero() {
        assert!((total_value(&fixture()) - 170.5).abs() < 1e-9);
        assert_eq!(total_value(&[]), 0.0);
    }

    #[test]
    fn value_by_category_skips_unvalued() {
        let sums = value_by_category(&fixture());
        let keys: Vec<&str> = sums.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, ["AV", "Audio"]);
        assert!(sums.first().is_some_and(|g| (g.value - 150.5).abs() < 1e-9));
    }

    #[test]
    fn recent_activity_is_stable_on_ties() {
        let products = fixture();
        let recent = recent_activity(&products, 3);
        let names: Vec<&str> = recent.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["b", "d", "c"]);
    }

    #[test]
    fn summary_combines_reductions() {
        let summary = summarize(&fixture(), 5, 2);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.most_common_status, Some(ProductStatus::Available));
        assert_eq!(summary.distinct_categories, 3);
        assert_eq!(summary.distinct_locations, 2);
        assert_eq!(summary.recent_activity.len(), 2);
        assert_eq!(summary.top_locations.len(), 2);
    }

    #[test]
    fn summary_of_nothing() {
        let summary = summarize(&[], 5, 5);
        assert_eq!(summary.total, 0);
        assert!(summary.most_common_status.is_none());
        assert!(summary.recent_activity.is_empty());
        assert!(summary.top_categories.is_empty());
    }
}
