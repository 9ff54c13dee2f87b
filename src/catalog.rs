//! In-memory product catalog with a client-side search view.
//!
//! The full list is kept as fetched; the visible subset is derived on every
//! read by a case-insensitive substring scan over name and description.

use crate::models::Product;

/// Products whose name, or description when present, contains `search`
/// case-insensitively. A blank search returns every product in order.
///
/// Surrounding whitespace in a non-blank search is part of the needle.
pub fn filter_products(products: &[Product], search: &str) -> Vec<Product> {
    if search.trim().is_empty() {
        return products.to_vec();
    }
    let needle = search.to_lowercase();
    products
        .iter()
        .filter(|p| matches(p, &needle))
        .cloned()
        .collect()
}

fn matches(product: &Product, needle_lower: &str) -> bool {
    product.name.to_lowercase().contains(needle_lower)
        || product
            .description
            .as_deref()
            .map(|d| d.to_lowercase().contains(needle_lower))
            .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// ProductCatalog
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    products: Vec<Product>,
    search: String,
}

impl ProductCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            search: String::new(),
        }
    }

    /// Replace the cached list, keeping the current search term.
    pub fn replace(&mut self, products: Vec<Product>) {
        self.products = products;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn has_search(&self) -> bool {
        !self.search.trim().is_empty()
    }

    pub fn all(&self) -> &[Product] {
        &self.products
    }

    pub fn visible(&self) -> Vec<Product> {
        filter_products(&self.products, &self.search)
    }

    pub fn get(&self, id: i64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Empty-state description when the visible list has nothing to show.
    pub fn empty_state(&self) -> Option<EmptyState> {
        if !self.visible().is_empty() {
            return None;
        }
        Some(if self.has_search() {
            EmptyState {
                message: "No products match your search.".to_string(),
                show_add_product: false,
            }
        } else {
            EmptyState {
                message: "No products found. Get started by adding your first product.".to_string(),
                show_add_product: true,
            }
        })
    }
}

/// What to show in place of an empty product grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    /// Offer the "Add Product" action; only when no search is active.
    pub show_add_product: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, name: &str, description: Option<&str>) -> Product {
        Product {
            id,
            name: name.to_string(),
            price: 1.0,
            description: description.map(str::to_string),
            stock: 1,
        }
    }

    #[test]
    fn whitespace_search_keeps_everything() {
        let list = vec![product(2, "B", None), product(1, "A", None)];
        assert_eq!(filter_products(&list, "   "), list);
    }

    #[test]
    fn surrounding_spaces_are_matched_literally() {
        let list = vec![product(1, "Laptop", Some("High-end laptop"))];
        assert!(filter_products(&list, "top ").is_empty());
        assert!(filter_products(&list, " laptop").len() == 1);
        assert!(filter_products(&list, "  ").len() == 1);
    }

    #[test]
    fn missing_description_never_matches() {
        let list = vec![product(1, "Mouse", None)];
        assert!(filter_products(&list, "none").is_empty());
    }
}
