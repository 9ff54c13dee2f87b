//! REST transport for the product and cart endpoints.
//!
//! [`Backend`] is the seam between the SDK and the network: query wrappers and
//! the controller only ever talk to a `&dyn Backend`, and [`HttpBackend`] is the
//! `reqwest` implementation used in production.

use crate::config;
use crate::error::{Result, ShopfrontError};
use crate::models::{
    Cart, CartItemCreate, CartItemUpdate, Product, ProductCreate, ProductUpdate,
};
use reqwest::blocking::{Client, Response};
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

/// One method per backend endpoint.
pub trait Backend {
    fn list_products(&self) -> Result<Vec<Product>>;
    fn get_product(&self, id: i64) -> Result<Product>;
    fn create_product(&self, product: &ProductCreate) -> Result<Product>;
    fn update_product(&self, id: i64, update: &ProductUpdate) -> Result<Product>;
    fn delete_product(&self, id: i64) -> Result<()>;

    /// The backend creates an empty cart for unknown sessions.
    fn get_cart(&self, session_id: &str) -> Result<Cart>;
    fn add_cart_item(&self, session_id: &str, item: &CartItemCreate) -> Result<()>;
    fn update_cart_item(&self, session_id: &str, item_id: i64, update: &CartItemUpdate)
        -> Result<()>;
    fn delete_cart_item(&self, session_id: &str, item_id: i64) -> Result<()>;
}

// ---------------------------------------------------------------------------
// HttpBackend
// ---------------------------------------------------------------------------

/// `reqwest`-backed [`Backend`] speaking JSON to the configured base URL.
pub struct HttpBackend {
    base_url: Url,
    client: Client,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(&config::normalize_base_url(base_url)).map_err(|e| {
            ShopfrontError::InvalidArgument(format!("Invalid base URL '{base_url}': {e}"))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ShopfrontError::InvalidArgument(format!(
                "Base URL '{base_url}' cannot carry a path"
            )));
        }
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Append `segments` to the base URL, percent-encoding each one.
    fn url(&self, segments: &[String]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                ShopfrontError::InvalidArgument(format!(
                    "Base URL '{}' cannot carry a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send a request, turning any non-2xx status into a transport error.
    fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        segments: &[String],
        body: Option<&B>,
    ) -> Result<Response> {
        let url = self.url(segments)?;
        let path = url.path().to_string();
        debug!(%method, path = %path, "sending request");
        let mut request = self.client.request(method.clone(), url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let resp = request.send()?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let text = resp.text().unwrap_or_default();
        warn!(%method, path = %path, status = status.as_u16(), "request failed");
        Err(ShopfrontError::status(status.as_u16(), error_detail(&text, status)))
    }

    fn get_json<T: DeserializeOwned>(&self, segments: &[String]) -> Result<T> {
        Ok(self.send::<()>(Method::GET, segments, None)?.json()?)
    }

    /// `GET /`, returning the backend's greeting message.
    pub fn welcome(&self) -> Result<String> {
        let value: serde_json::Value = self.get_json(&[])?;
        Ok(value
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or_default()
            .to_string())
    }
}

/// Prefer the backend's `detail` field, falling back to the status reason.
fn error_detail(body: &str, status: reqwest::StatusCode) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string())
}

impl Backend for HttpBackend {
    fn list_products(&self) -> Result<Vec<Product>> {
        self.get_json(&config::products_path())
    }

    fn get_product(&self, id: i64) -> Result<Product> {
        self.get_json(&config::product_path(id))
    }

    fn create_product(&self, product: &ProductCreate) -> Result<Product> {
        let resp = self.send(Method::POST, &config::products_path(), Some(product))?;
        Ok(resp.json()?)
    }

    fn update_product(&self, id: i64, update: &ProductUpdate) -> Result<Product> {
        let resp = self.send(Method::PUT, &config::product_path(id), Some(update))?;
        Ok(resp.json()?)
    }

    fn delete_product(&self, id: i64) -> Result<()> {
        self.send::<()>(Method::DELETE, &config::product_path(id), None)?;
        Ok(())
    }

    fn get_cart(&self, session_id: &str) -> Result<Cart> {
        self.get_json(&config::cart_path(session_id))
    }

    fn add_cart_item(&self, session_id: &str, item: &CartItemCreate) -> Result<()> {
        self.send(Method::POST, &config::cart_items_path(session_id), Some(item))?;
        Ok(())
    }

    fn update_cart_item(
        &self,
        session_id: &str,
        item_id: i64,
        update: &CartItemUpdate,
    ) -> Result<()> {
        let path = config::cart_item_path(session_id, item_id);
        self.send(Method::PUT, &path, Some(update))?;
        Ok(())
    }

    fn delete_cart_item(&self, session_id: &str, item_id: i64) -> Result<()> {
        let path = config::cart_item_path(session_id, item_id);
        self.send::<()>(Method::DELETE, &path, None)?;
        Ok(())
    }
}
