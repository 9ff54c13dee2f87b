//! Shopfront SDK for Rust.
//!
//! Typed client for the Shopfront product catalog and guest cart REST API,
//! plus the client-side logic the storefront frontends share: case-insensitive
//! product search, the decrement-to-remove cart policy, a persisted guest
//! session token, and a command-driven controller.
//!
//! # Quick start
//!
//! ```no_run
//! use shopfront_sdk::ShopfrontSdk;
//!
//! let sdk = ShopfrontSdk::builder()
//!     .base_url("http://localhost:8000")
//!     .build()
//!     .unwrap();
//!
//! // Browse the catalog
//! let products = sdk.products().list().unwrap();
//!
//! // Put the first product in the guest cart
//! if let Some(p) = products.first() {
//!     let cart = sdk.cart().add_product(p.id).unwrap();
//!     println!("{} item(s)", cart.total_items);
//! }
//! ```

pub mod app;
#[cfg(feature = "async")]
pub mod async_client;
pub mod catalog;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod queries;
pub mod session;
pub mod transport;

pub use app::{Banner, Command, Modal, PendingSubmit, Storefront};
#[cfg(feature = "async")]
pub use async_client::AsyncStorefront;
pub use catalog::{filter_products, ProductCatalog};
pub use error::{Result, ShopfrontError};
pub use session::{SessionId, SessionStore};
pub use transport::{Backend, HttpBackend};

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

// ---------------------------------------------------------------------------
// ShopfrontSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`ShopfrontSdk`] instance.
///
/// Use [`ShopfrontSdk::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](ShopfrontSdkBuilder::build) to create the SDK.
pub struct ShopfrontSdkBuilder {
    base_url: String,
    data_dir: Option<PathBuf>,
    session_id: Option<SessionId>,
    timeout: Duration,
}

impl Default for ShopfrontSdkBuilder {
    fn default() -> Self {
        Self {
            base_url: config::DEFAULT_API_URL.to_string(),
            data_dir: None,
            session_id: None,
            timeout: Duration::from_secs(30),
        }
    }
}

impl ShopfrontSdkBuilder {
    /// Set the backend base URL. Defaults to `http://localhost:8000`.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the directory holding the persisted session token.
    ///
    /// If not set, the platform-appropriate local data directory is used
    /// (e.g. `~/.local/share/shopfront-sdk` on Linux).
    pub fn data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Use a fixed session token instead of the persisted one.
    pub fn session_id(mut self, id: impl Into<String>) -> Self {
        self.session_id = Some(SessionId::new(id));
        self
    }

    /// Set the HTTP request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Apply `SHOPFRONT_API_URL` and `SHOPFRONT_DATA_DIR` when set.
    pub fn from_env(mut self) -> Self {
        if let Ok(url) = std::env::var(config::API_URL_ENV) {
            if !url.trim().is_empty() {
                self.base_url = url;
            }
        }
        if let Ok(dir) = std::env::var(config::DATA_DIR_ENV) {
            if !dir.trim().is_empty() {
                self.data_dir = Some(PathBuf::from(dir));
            }
        }
        self
    }

    /// Build the SDK, resolving the session token and HTTP client.
    ///
    /// The session token is read from (or created in) the data directory
    /// once here and stays fixed for the lifetime of the SDK. No network
    /// request is made.
    pub fn build(self) -> Result<ShopfrontSdk> {
        let session = match self.session_id {
            Some(id) => id,
            None => SessionStore::new(self.data_dir)?.load_or_create()?,
        };
        let backend = HttpBackend::new(&self.base_url, self.timeout)?;
        debug!(base_url = backend.base_url(), session_id = %session, "sdk ready");
        Ok(ShopfrontSdk { backend, session })
    }
}

// ---------------------------------------------------------------------------
// ShopfrontSdk
// ---------------------------------------------------------------------------

/// The main entry point for the Shopfront SDK.
///
/// Owns the HTTP backend and the guest session token, and exposes query
/// interfaces as lightweight borrowing wrappers.
pub struct ShopfrontSdk {
    backend: HttpBackend,
    session: SessionId,
}

impl ShopfrontSdk {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> ShopfrontSdkBuilder {
        ShopfrontSdkBuilder::default()
    }

    /// Access the product query interface.
    pub fn products(&self) -> queries::ProductQuery<'_> {
        queries::ProductQuery::new(&self.backend)
    }

    /// Access the cart of this SDK's guest session.
    pub fn cart(&self) -> queries::CartQuery<'_> {
        queries::CartQuery::new(&self.backend, &self.session)
    }

    pub fn session(&self) -> &SessionId {
        &self.session
    }

    /// Call the backend root endpoint and return its greeting.
    pub fn ping(&self) -> Result<String> {
        self.backend.welcome()
    }

    /// Return a reference to the underlying [`HttpBackend`].
    pub fn backend(&self) -> &HttpBackend {
        &self.backend
    }

    /// Consume the SDK into a [`Storefront`] controller.
    pub fn into_storefront(self) -> Storefront<HttpBackend> {
        Storefront::new(self.backend, self.session)
    }
}

impl fmt::Display for ShopfrontSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ShopfrontSdk(base_url={}, session={})",
            self.backend.base_url(),
            self.session
        )
    }
}
