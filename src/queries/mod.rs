//! Query modules for the Shopfront SDK.
//!
//! Each module provides a query struct that borrows a [`Backend`](crate::transport::Backend)
//! and exposes methods returning `Result<T>` with typed model payloads.

pub mod cart;
pub mod products;

pub use cart::{CartQuery, QuantityChange};
pub use products::{ProductForm, ProductQuery};
