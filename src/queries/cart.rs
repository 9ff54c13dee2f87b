//! Cart queries for a single guest session.
//!
//! Every mutation is followed by a full re-fetch of the cart, so the totals the
//! caller sees are always the backend's. Quantities never reach zero on the
//! wire: lowering a line below one removes it instead.

use crate::error::Result;
use crate::models::{Cart, CartItem, CartItemCreate, CartItemUpdate};
use crate::session::SessionId;
use crate::transport::Backend;
use tracing::debug;

// ---------------------------------------------------------------------------
// QuantityChange
// ---------------------------------------------------------------------------

/// The request a quantity adjustment turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// Set the line to this quantity (always >= 1).
    Set(u32),
    /// Delete the line.
    Remove,
}

impl QuantityChange {
    pub fn increment(current: u32) -> Self {
        Self::Set(current.saturating_add(1))
    }

    pub fn decrement(current: u32) -> Self {
        if current > 1 {
            Self::Set(current - 1)
        } else {
            Self::Remove
        }
    }

    /// Explicit target quantity; zero means removal.
    pub fn target(quantity: u32) -> Self {
        if quantity == 0 {
            Self::Remove
        } else {
            Self::Set(quantity)
        }
    }
}

// ---------------------------------------------------------------------------
// CartQuery
// ---------------------------------------------------------------------------

/// Query interface for the cart identified by a session token.
pub struct CartQuery<'a> {
    backend: &'a dyn Backend,
    session: &'a SessionId,
}

impl<'a> CartQuery<'a> {
    /// Create a new `CartQuery` bound to the given backend and session.
    pub fn new(backend: &'a dyn Backend, session: &'a SessionId) -> Self {
        Self { backend, session }
    }

    /// Fetch the cart; the backend creates an empty one for new sessions.
    pub fn fetch(&self) -> Result<Cart> {
        self.backend.get_cart(self.session.as_str())
    }

    /// Add one unit of a product.
    ///
    /// Whether this creates a line or bumps an existing one is decided by the
    /// backend; the client always sends a quantity of one.
    pub fn add_product(&self, product_id: i64) -> Result<Cart> {
        debug!(session_id = %self.session, product_id, "adding product to cart");
        self.backend.add_cart_item(
            self.session.as_str(),
            &CartItemCreate {
                product_id,
                quantity: 1,
            },
        )?;
        self.fetch()
    }

    pub fn increment(&self, item: &CartItem) -> Result<Cart> {
        self.apply(item.id, QuantityChange::increment(item.quantity))
    }

    /// Lower the quantity by one, removing the line when it is already at one.
    pub fn decrement(&self, item: &CartItem) -> Result<Cart> {
        self.apply(item.id, QuantityChange::decrement(item.quantity))
    }

    pub fn set_quantity(&self, item_id: i64, quantity: u32) -> Result<Cart> {
        self.apply(item_id, QuantityChange::target(quantity))
    }

    pub fn remove(&self, item_id: i64) -> Result<Cart> {
        self.apply(item_id, QuantityChange::Remove)
    }

    fn apply(&self, item_id: i64, change: QuantityChange) -> Result<Cart> {
        debug!(session_id = %self.session, item_id, ?change, "changing cart line");
        match change {
            QuantityChange::Set(quantity) => self.backend.update_cart_item(
                self.session.as_str(),
                item_id,
                &CartItemUpdate { quantity },
            )?,
            QuantityChange::Remove => {
                self.backend.delete_cart_item(self.session.as_str(), item_id)?
            }
        }
        self.fetch()
    }
}
