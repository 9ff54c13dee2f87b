//! Async wrapper around [`Storefront`] for use in async runtimes (Tokio, etc.).
//!
//! Runs every dispatch on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free while the
//! blocking HTTP client waits on the backend.
//!
//! # Example
//!
//! ```no_run
//! use shopfront_sdk::{AsyncStorefront, Command, ShopfrontSdk};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let storefront = AsyncStorefront::build(ShopfrontSdk::builder()).await.unwrap();
//!     storefront.dispatch(Command::LoadProducts).await.unwrap();
//!     let _count = storefront.run(|s| s.visible_products().len()).await.unwrap();
//! }
//! ```

use std::sync::{Arc, Mutex};

use crate::app::{Command, Storefront};
use crate::error::{Result, ShopfrontError};
use crate::transport::{Backend, HttpBackend};
use crate::ShopfrontSdkBuilder;

/// Async wrapper around [`Storefront`].
///
/// The controller is protected by a [`Mutex`], so dispatches from concurrent
/// tasks are applied one at a time.
pub struct AsyncStorefront<B: Backend + Send + 'static = HttpBackend> {
    inner: Arc<Mutex<Storefront<B>>>,
}

impl<B: Backend + Send + 'static> Clone for AsyncStorefront<B> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl AsyncStorefront<HttpBackend> {
    /// Build the SDK on the blocking pool and wrap its storefront.
    pub async fn build(builder: ShopfrontSdkBuilder) -> Result<Self> {
        tokio::task::spawn_blocking(move || {
            let sdk = builder.build()?;
            Ok(Self::new(sdk.into_storefront()))
        })
        .await
        .map_err(|e| ShopfrontError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

impl<B: Backend + Send + 'static> AsyncStorefront<B> {
    pub fn new(storefront: Storefront<B>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(storefront)),
        }
    }

    /// Run a closure against the controller on the blocking thread pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Storefront<B>) -> T + Send + 'static,
        T: Send + 'static,
    {
        let inner = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let mut guard = inner
                .lock()
                .map_err(|_| ShopfrontError::InvalidArgument("Storefront lock poisoned".into()))?;
            Ok(f(&mut guard))
        })
        .await
        .map_err(|e| ShopfrontError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Dispatch a command asynchronously.
    pub async fn dispatch(&self, command: Command) -> Result<()> {
        self.run(move |s| s.dispatch(command)).await
    }
}
