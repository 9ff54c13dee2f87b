//! Product CRUD and form validation.

use crate::error::{Result, ShopfrontError};
use crate::models::{Product, ProductCreate, ProductUpdate};
use crate::transport::Backend;

// ---------------------------------------------------------------------------
// ProductQuery
// ---------------------------------------------------------------------------

/// Query interface for catalog products.
pub struct ProductQuery<'a> {
    backend: &'a dyn Backend,
}

impl<'a> ProductQuery<'a> {
    /// Create a new `ProductQuery` bound to the given backend.
    pub fn new(backend: &'a dyn Backend) -> Self {
        Self { backend }
    }

    pub fn list(&self) -> Result<Vec<Product>> {
        self.backend.list_products()
    }

    pub fn get(&self, id: i64) -> Result<Product> {
        self.backend.get_product(id)
    }

    pub fn create(&self, product: &ProductCreate) -> Result<Product> {
        self.backend.create_product(product)
    }

    pub fn update(&self, id: i64, update: &ProductUpdate) -> Result<Product> {
        self.backend.update_product(id, update)
    }

    pub fn delete(&self, id: i64) -> Result<()> {
        self.backend.delete_product(id)
    }
}

// ---------------------------------------------------------------------------
// ProductForm
// ---------------------------------------------------------------------------

/// Raw text buffers behind the add/edit product form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    /// Target product when editing; `None` for the add form.
    pub id: Option<i64>,
    pub name: String,
    pub price: String,
    pub description: String,
    pub stock: String,
}

impl ProductForm {
    /// Pre-fill the edit form from an existing product.
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: Some(product.id),
            name: product.name.clone(),
            price: product.price.to_string(),
            description: product.description.clone().unwrap_or_default(),
            stock: product.stock.to_string(),
        }
    }

    /// Validate the buffers into a create request.
    pub fn to_create(&self) -> Result<ProductCreate> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ShopfrontError::InvalidArgument(
                "Product name is required".to_string(),
            ));
        }

        let price: f64 = self.price.trim().parse().map_err(|_| {
            ShopfrontError::InvalidArgument(format!("Invalid price: '{}'", self.price))
        })?;
        if !price.is_finite() || price < 0.0 {
            return Err(ShopfrontError::InvalidArgument(
                "Price must be a non-negative number".to_string(),
            ));
        }

        let stock: i64 = self.stock.trim().parse().map_err(|_| {
            ShopfrontError::InvalidArgument(format!("Invalid stock: '{}'", self.stock))
        })?;
        if stock < 0 {
            return Err(ShopfrontError::InvalidArgument(
                "Stock must be a non-negative integer".to_string(),
            ));
        }

        let description = self.description.trim();
        Ok(ProductCreate {
            name: name.to_string(),
            price,
            description: (!description.is_empty()).then(|| description.to_string()),
            stock,
        })
    }

    /// Validate the buffers into an update carrying every field.
    ///
    /// A blank description is sent as `null` so clearing it in the form
    /// clears it on the backend.
    pub fn to_update(&self) -> Result<ProductUpdate> {
        let create = self.to_create()?;
        Ok(ProductUpdate {
            name: Some(create.name),
            price: Some(create.price),
            description: Some(create.description),
            stock: Some(create.stock),
        })
    }
}
