//! Optional narrowing of the product list.

use super::{Product, ProductStatus};

/// Criteria for narrowing a product list. Empty criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Exact status.
    pub status: Option<ProductStatus>,
    /// Location, compared case-insensitively.
    pub location: Option<String>,
    /// Case-insensitive substring of name, description, category, or serial.
    pub search: Option<String>,
}

impl ProductFilter {
    /// Returns `true` when no criterion is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && blank(self.location.as_deref()) && blank(self.search.as_deref())
    }

    /// Returns `true` if `product` satisfies every criterion.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if self.status.is_some_and(|status| status != product.status) {
            return false;
        }
        if let Some(location) = self.location.as_deref().map(str::trim).filter(|s| !s.is_empty())
            && !product.location.eq_ignore_ascii_case(location)
        {
            return false;
        }
        if let Some(term) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let term = term.to_lowercase();
            let hit = [
                Some(product.name.as_str()),
                Some(product.description.as_str()),
                Some(product.category.as_str()),
                product.serial_number.as_deref(),
            ]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&term));
            if !hit {
                return false;
            }
        }
        true
    }

    /// Keeps the products that match, preserving order.
    #[must_use]
    pub fn apply(&self, products: Vec<Product>) -> Vec<Product> {
        if self.is_empty() {
            return products;
        }
        products.into_iter().filter(|p| self.matches(p)).collect()
    }
}

fn blank(value: Option<&str>) -> bool {
    value.is_none_or(|s| s.trim().is_empty())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::NewProduct;
    use chrono::Utc;

    fn product(name: &str, location: &str, serial: Option<&str>) -> Product {
        let input = NewProduct {
            name: name.to_string(),
            description: "stage equipment".to_string(),
            category: "AV".to_string(),
            location: location.to_string(),
            serial_number: serial.map(str::to_string),
            ..NewProduct::default()
        };
        let Ok(product) = input.into_product(Utc::now()) else {
            panic!("fixture must be valid");
        };
        product
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let products = vec![product("Mixer", "Hall", None), product("Cable", "Depot", None)];
        assert_eq!(ProductFilter::default().apply(products).len(), 2);
    }

    #[test]
    fn location_is_case_insensitive_exact() {
        let filter = ProductFilter {
            location: Some("hall".to_string()),
            ..ProductFilter::default()
        };
        assert!(filter.matches(&product("Mixer", "Hall", None)));
        assert!(!filter.matches(&product("Mixer", "Hallway", None)));
    }

    #[test]
    fn search_covers_serial_number() {
        let filter = ProductFilter {
            search: Some("sn-42".to_string()),
            ..ProductFilter::default()
        };
        assert!(filter.matches(&product("Mixer", "Hall", Some("SN-42"))));
        assert!(!filter.matches(&product("Mixer", "Hall", None)));
    }

    #[test]
    fn status_must_match() {
        let filter = ProductFilter {
            status: Some(ProductStatus::Missing),
            ..ProductFilter::default()
        };
        assert!(!filter.matches(&product("Mixer", "Hall", None)));
    }
}
