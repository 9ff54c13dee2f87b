use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Product — Catalog entry as returned by the backend
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
    pub stock: i64,
}

// ---------------------------------------------------------------------------
// ProductCreate — Full record required by POST /products/
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub stock: i64,
}

// ---------------------------------------------------------------------------
// ProductUpdate — Partial update for PUT /products/{id}
// ---------------------------------------------------------------------------

/// Unset fields are omitted from the body and left untouched by the backend.
///
/// `description` is doubly optional: `Some(None)` is sent as `null` and
/// clears the stored description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
}
