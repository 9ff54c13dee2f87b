use serde::{Deserialize, Serialize};

use super::product::Product;

// ---------------------------------------------------------------------------
// CartItem — One line of a cart, with a snapshot of its product
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: i64,
    pub product_id: i64,
    pub quantity: u32,
    pub product: Product,
}

// ---------------------------------------------------------------------------
// Cart — Per-session cart with server-computed totals
// ---------------------------------------------------------------------------

/// `total_items` and `total_price` are computed by the backend on every read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub id: i64,
    pub session_id: String,
    #[serde(default)]
    pub items: Vec<CartItem>,
    pub total_items: u32,
    pub total_price: f64,
}

impl Cart {
    pub fn item(&self, item_id: i64) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id == item_id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItemCreate {
    pub product_id: i64,
    pub quantity: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItemUpdate {
    pub quantity: u32,
}
