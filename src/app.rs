//! Storefront controller.
//!
//! Views never mutate state directly. They emit a [`Command`], the controller
//! performs the backend calls, and the resulting state is read back through
//! accessors. Failures never escape [`Storefront::dispatch`]: they become a
//! [`Banner`] and the previously displayed data stays in place.

use crate::catalog::ProductCatalog;
use crate::error::{Result, ShopfrontError};
use crate::models::{Cart, CartItem, Product, ProductCreate, ProductUpdate};
use crate::queries::{CartQuery, ProductForm, ProductQuery};
use crate::session::SessionId;
use crate::transport::Backend;
use tracing::{debug, error, info};

// ---------------------------------------------------------------------------
// Modal
// ---------------------------------------------------------------------------

/// The single modal slot. Opening one replaces whatever was open.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Modal {
    #[default]
    Closed,
    Add,
    Edit(Product),
    View(Product),
    Delete(Product),
}

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// User intents dispatched upward from the views.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    LoadProducts,
    /// Retry the initial product load after it failed.
    Retry,
    Search(String),
    OpenAdd,
    OpenView(i64),
    OpenEdit(i64),
    OpenDelete(i64),
    Cancel,
    SubmitAdd(ProductForm),
    SubmitEdit(ProductForm),
    ConfirmDelete,
    LoadCart,
    ToggleCart,
    AddToCart(i64),
    Increment(i64),
    Decrement(i64),
    RemoveItem(i64),
    DismissError,
}

// ---------------------------------------------------------------------------
// PendingSubmit
// ---------------------------------------------------------------------------

/// A validated primary form action whose backend call has not run yet.
///
/// Produced by [`Storefront::begin_submit`], which marks the storefront busy
/// until [`Storefront::complete_submit`] receives the outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingSubmit {
    Create(ProductCreate),
    Update(i64, ProductUpdate),
    Delete(i64),
}

impl PendingSubmit {
    /// Issue the backend call for this action.
    pub fn execute(&self, backend: &dyn Backend) -> Result<()> {
        let products = ProductQuery::new(backend);
        match self {
            Self::Create(create) => {
                let product = products.create(create)?;
                info!(product_id = product.id, "created product");
            }
            Self::Update(id, update) => {
                products.update(*id, update)?;
                info!(product_id = *id, "updated product");
            }
            Self::Delete(id) => {
                products.delete(*id)?;
                info!(product_id = *id, "deleted product");
            }
        }
        Ok(())
    }
}

/// Dismissible error message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub message: String,
    /// Offer a retry action; only set when the initial product load failed.
    pub retry: bool,
}

// ---------------------------------------------------------------------------
// Storefront
// ---------------------------------------------------------------------------

pub struct Storefront<B: Backend> {
    backend: B,
    session: SessionId,
    catalog: ProductCatalog,
    cart: Option<Cart>,
    cart_enabled: bool,
    cart_open: bool,
    modal: Modal,
    banner: Option<Banner>,
    busy: bool,
    loaded: bool,
}

impl<B: Backend> Storefront<B> {
    pub fn new(backend: B, session: SessionId) -> Self {
        Self {
            backend,
            session,
            catalog: ProductCatalog::default(),
            cart: None,
            cart_enabled: true,
            cart_open: false,
            modal: Modal::Closed,
            banner: None,
            busy: false,
            loaded: false,
        }
    }

    /// Enable or disable the shopping-cart feature. Enabled by default.
    pub fn with_cart(mut self, enabled: bool) -> Self {
        self.cart_enabled = enabled;
        self
    }

    // -- State accessors ---------------------------------------------------

    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    pub fn visible_products(&self) -> Vec<Product> {
        self.catalog.visible()
    }

    pub fn cart(&self) -> Option<&Cart> {
        self.cart.as_ref()
    }

    pub fn cart_enabled(&self) -> bool {
        self.cart_enabled
    }

    pub fn cart_open(&self) -> bool {
        self.cart_open
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn session(&self) -> &SessionId {
        &self.session
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    // -- Dispatch ----------------------------------------------------------

    /// Apply a command. Errors are recorded in the banner, never returned.
    pub fn dispatch(&mut self, command: Command) {
        match command {
            Command::LoadProducts | Command::Retry => self.load_products(),
            Command::Search(term) => self.catalog.set_search(term),
            Command::OpenAdd => self.modal = Modal::Add,
            Command::OpenView(id) => self.open_with(id, Modal::View),
            Command::OpenEdit(id) => self.open_with(id, Modal::Edit),
            Command::OpenDelete(id) => self.open_with(id, Modal::Delete),
            Command::Cancel => self.modal = Modal::Closed,
            submit @ (Command::SubmitAdd(_) | Command::SubmitEdit(_) | Command::ConfirmDelete) => {
                if let Some(pending) = self.begin_submit(submit) {
                    let outcome = pending.execute(&self.backend);
                    self.complete_submit(outcome);
                }
            }
            Command::LoadCart => self.refresh_cart(),
            Command::ToggleCart => self.toggle_cart(),
            Command::AddToCart(product_id) => {
                self.cart_mutation("add to cart", |q, _| q.add_product(product_id))
            }
            Command::Increment(item_id) => {
                self.cart_line_mutation(item_id, "update quantity", |q, item| q.increment(item))
            }
            Command::Decrement(item_id) => {
                self.cart_line_mutation(item_id, "update quantity", |q, item| q.decrement(item))
            }
            Command::RemoveItem(item_id) => {
                self.cart_mutation("remove item", |q, _| q.remove(item_id))
            }
            Command::DismissError => self.banner = None,
        }
    }

    // -- Products ----------------------------------------------------------

    fn load_products(&mut self) {
        let outcome = ProductQuery::new(&self.backend).list();
        match outcome {
            Ok(products) => {
                info!(count = products.len(), "loaded products");
                self.catalog.replace(products);
                self.loaded = true;
                if self.banner.as_ref().is_some_and(|b| b.retry) {
                    self.banner = None;
                }
            }
            Err(e) => {
                let retry = !self.loaded;
                self.fail("Failed to load products", &e, retry);
            }
        }
    }

    fn open_with(&mut self, id: i64, make: fn(Product) -> Modal) {
        match self.catalog.get(id) {
            Some(product) => self.modal = make(product.clone()),
            None => self.fail(
                "Cannot open product",
                &ShopfrontError::NotFound(format!("product {id}")),
                false,
            ),
        }
    }

    /// Validate a primary form action and mark the storefront busy.
    ///
    /// Returns `None` when the command is not a form submit, when another
    /// submit is still in flight, or when validation failed (the banner then
    /// carries the reason and the modal stays open).
    pub fn begin_submit(&mut self, command: Command) -> Option<PendingSubmit> {
        if self.busy {
            debug!("submit ignored while busy");
            return None;
        }
        let prepared = match command {
            Command::SubmitAdd(form) => self.prepare_create(&form),
            Command::SubmitEdit(form) => self.prepare_update(&form),
            Command::ConfirmDelete => self.prepare_delete(),
            _ => return None,
        };
        match prepared {
            Ok(pending) => {
                self.busy = true;
                Some(pending)
            }
            Err(e) => {
                self.fail("Failed to save changes", &e, false);
                None
            }
        }
    }

    /// Finish the in-flight submit: close the modal and reload on success,
    /// keep the modal open and show the error otherwise.
    pub fn complete_submit(&mut self, outcome: Result<()>) {
        if !self.busy {
            return;
        }
        self.busy = false;
        match outcome {
            Ok(()) => {
                self.modal = Modal::Closed;
                self.load_products();
            }
            Err(e) => self.fail("Failed to save changes", &e, false),
        }
    }

    fn prepare_create(&self, form: &ProductForm) -> Result<PendingSubmit> {
        if self.modal != Modal::Add {
            return Err(ShopfrontError::InvalidArgument(
                "Add product form is not open".to_string(),
            ));
        }
        Ok(PendingSubmit::Create(form.to_create()?))
    }

    fn prepare_update(&self, form: &ProductForm) -> Result<PendingSubmit> {
        let Modal::Edit(product) = &self.modal else {
            return Err(ShopfrontError::InvalidArgument(
                "No product selected for editing".to_string(),
            ));
        };
        if form.id.is_some_and(|id| id != product.id) {
            return Err(ShopfrontError::InvalidArgument(format!(
                "Form targets a different product than the one being edited ({})",
                product.id
            )));
        }
        Ok(PendingSubmit::Update(product.id, form.to_update()?))
    }

    fn prepare_delete(&self) -> Result<PendingSubmit> {
        let Modal::Delete(product) = &self.modal else {
            return Err(ShopfrontError::InvalidArgument(
                "No product selected for deletion".to_string(),
            ));
        };
        Ok(PendingSubmit::Delete(product.id))
    }

    // -- Cart --------------------------------------------------------------

    fn toggle_cart(&mut self) {
        if !self.cart_enabled {
            return;
        }
        self.cart_open = !self.cart_open;
        if self.cart_open {
            self.refresh_cart();
        }
    }

    fn refresh_cart(&mut self) {
        if !self.cart_enabled {
            return;
        }
        let outcome = CartQuery::new(&self.backend, &self.session).fetch();
        match outcome {
            Ok(cart) => self.cart = Some(cart),
            Err(e) => self.fail("Failed to load cart", &e, false),
        }
    }

    fn cart_mutation(
        &mut self,
        what: &str,
        op: impl FnOnce(&CartQuery<'_>, Option<&CartItem>) -> Result<Cart>,
    ) {
        if !self.cart_enabled {
            return;
        }
        let outcome = op(&CartQuery::new(&self.backend, &self.session), None);
        match outcome {
            Ok(cart) => self.cart = Some(cart),
            Err(e) => self.fail(&format!("Failed to {what}"), &e, false),
        }
    }

    /// Mutate an existing line, looked up in the last fetched cart.
    fn cart_line_mutation(
        &mut self,
        item_id: i64,
        what: &str,
        op: impl FnOnce(&CartQuery<'_>, &CartItem) -> Result<Cart>,
    ) {
        if !self.cart_enabled {
            return;
        }
        let item = self.cart.as_ref().and_then(|c| c.item(item_id)).cloned();
        match item {
            Some(item) => self.cart_mutation(what, |q, _| op(q, &item)),
            None => self.fail(
                &format!("Failed to {what}"),
                &ShopfrontError::NotFound(format!("cart item {item_id}")),
                false,
            ),
        }
    }

    fn fail(&mut self, context: &str, err: &ShopfrontError, retry: bool) {
        error!(session_id = %self.session, status = ?err.status_code(), "{context}: {err}");
        self.banner = Some(Banner {
            message: format!("{context}: {err}"),
            retry,
        });
    }
}
