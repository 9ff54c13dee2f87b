//! Shared test fixtures for the Shopfront SDK integration tests.
//!
//! Provides `FakeBackend`, an in-memory `Backend` that follows the backend
//! contract (merge-or-create on add, server-computed totals, 404 on unknown
//! ids) and records every call, plus `serve_once()`, a loopback HTTP responder
//! for exercising `HttpBackend`.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::JoinHandle;

use shopfront_sdk::models::{
    Cart, CartItem, CartItemCreate, CartItemUpdate, Product, ProductCreate, ProductUpdate,
};
use shopfront_sdk::{Backend, Result, ShopfrontError};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListProducts,
    GetProduct(i64),
    CreateProduct(ProductCreate),
    UpdateProduct(i64, ProductUpdate),
    DeleteProduct(i64),
    GetCart(String),
    AddCartItem(String, CartItemCreate),
    UpdateCartItem(String, i64, u32),
    DeleteCartItem(String, i64),
}

#[derive(Default)]
pub struct FakeBackend {
    products: RefCell<Vec<Product>>,
    carts: RefCell<HashMap<String, Vec<(i64, i64, u32)>>>,
    next_product_id: Cell<i64>,
    next_item_id: Cell<i64>,
    calls: RefCell<Vec<Call>>,
    /// Fail this many upcoming calls with `fail_status`.
    fail_next: Cell<usize>,
    fail_status: Cell<u16>,
    /// Fail every `get_cart` call while set.
    fail_cart_reads: Cell<bool>,
}

impl FakeBackend {
    pub fn with_products(products: Vec<Product>) -> Self {
        let next = products.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let fake = Self {
            products: RefCell::new(products),
            ..Default::default()
        };
        fake.next_product_id.set(next);
        fake.next_item_id.set(1);
        fake
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn fail_next(&self, count: usize, status: u16) {
        self.fail_next.set(count);
        self.fail_status.set(status);
    }

    pub fn fail_cart_reads(&self, fail: bool) {
        self.fail_cart_reads.set(fail);
    }

    /// Seed a cart line directly, bypassing the call log.
    pub fn seed_cart_line(&self, session_id: &str, product_id: i64, quantity: u32) -> i64 {
        let id = self.next_item_id.get().max(1);
        self.next_item_id.set(id + 1);
        self.carts
            .borrow_mut()
            .entry(session_id.to_string())
            .or_default()
            .push((id, product_id, quantity));
        id
    }

    fn record(&self, call: Call) -> Result<()> {
        self.calls.borrow_mut().push(call);
        let remaining = self.fail_next.get();
        if remaining > 0 {
            self.fail_next.set(remaining - 1);
            return Err(ShopfrontError::status(self.fail_status.get(), "injected failure"));
        }
        Ok(())
    }

    fn find_product(&self, id: i64) -> Result<Product> {
        self.products
            .borrow()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| ShopfrontError::status(404, "Product not found"))
    }

    fn build_cart(&self, session_id: &str) -> Result<Cart> {
        let carts = self.carts.borrow();
        let lines = carts.get(session_id).cloned().unwrap_or_default();
        let mut items = Vec::with_capacity(lines.len());
        for (id, product_id, quantity) in lines {
            items.push(CartItem {
                id,
                product_id,
                quantity,
                product: self.find_product(product_id)?,
            });
        }
        let total_items = items.iter().map(|i| i.quantity).sum();
        let total_price = items
            .iter()
            .map(|i| f64::from(i.quantity) * i.product.price)
            .sum();
        Ok(Cart {
            id: 1,
            session_id: session_id.to_string(),
            items,
            total_items,
            total_price,
        })
    }
}

impl Backend for FakeBackend {
    fn list_products(&self) -> Result<Vec<Product>> {
        self.record(Call::ListProducts)?;
        Ok(self.products.borrow().clone())
    }

    fn get_product(&self, id: i64) -> Result<Product> {
        self.record(Call::GetProduct(id))?;
        self.find_product(id)
    }

    fn create_product(&self, product: &ProductCreate) -> Result<Product> {
        self.record(Call::CreateProduct(product.clone()))?;
        let id = self.next_product_id.get();
        self.next_product_id.set(id + 1);
        let created = Product {
            id,
            name: product.name.clone(),
            price: product.price,
            description: product.description.clone(),
            stock: product.stock,
        };
        self.products.borrow_mut().push(created.clone());
        Ok(created)
    }

    fn update_product(&self, id: i64, update: &ProductUpdate) -> Result<Product> {
        self.record(Call::UpdateProduct(id, update.clone()))?;
        let mut products = self.products.borrow_mut();
        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| ShopfrontError::status(404, "Product not found"))?;
        apply_update(update, product);
        Ok(product.clone())
    }

    fn delete_product(&self, id: i64) -> Result<()> {
        self.record(Call::DeleteProduct(id))?;
        let mut products = self.products.borrow_mut();
        let before = products.len();
        products.retain(|p| p.id != id);
        if products.len() == before {
            return Err(ShopfrontError::status(404, "Product not found"));
        }
        Ok(())
    }

    fn get_cart(&self, session_id: &str) -> Result<Cart> {
        self.record(Call::GetCart(session_id.to_string()))?;
        if self.fail_cart_reads.get() {
            return Err(ShopfrontError::status(503, "cart unavailable"));
        }
        self.build_cart(session_id)
    }

    fn add_cart_item(&self, session_id: &str, item: &CartItemCreate) -> Result<()> {
        self.record(Call::AddCartItem(session_id.to_string(), *item))?;
        self.find_product(item.product_id)?;
        let mut carts = self.carts.borrow_mut();
        let lines = carts.entry(session_id.to_string()).or_default();
        if let Some(line) = lines.iter_mut().find(|l| l.1 == item.product_id) {
            line.2 += item.quantity;
        } else {
            let id = self.next_item_id.get().max(1);
            self.next_item_id.set(id + 1);
            lines.push((id, item.product_id, item.quantity));
        }
        Ok(())
    }

    fn update_cart_item(
        &self,
        session_id: &str,
        item_id: i64,
        update: &CartItemUpdate,
    ) -> Result<()> {
        self.record(Call::UpdateCartItem(
            session_id.to_string(),
            item_id,
            update.quantity,
        ))?;
        let mut carts = self.carts.borrow_mut();
        let line = carts
            .get_mut(session_id)
            .and_then(|lines| lines.iter_mut().find(|l| l.0 == item_id))
            .ok_or_else(|| ShopfrontError::status(404, "Cart item not found"))?;
        line.2 = update.quantity;
        Ok(())
    }

    fn delete_cart_item(&self, session_id: &str, item_id: i64) -> Result<()> {
        self.record(Call::DeleteCartItem(session_id.to_string(), item_id))?;
        let mut carts = self.carts.borrow_mut();
        let lines = carts
            .get_mut(session_id)
            .ok_or_else(|| ShopfrontError::status(404, "Cart item not found"))?;
        let before = lines.len();
        lines.retain(|l| l.0 != item_id);
        if lines.len() == before {
            return Err(ShopfrontError::status(404, "Cart item not found"));
        }
        Ok(())
    }
}

/// Merge the set fields of `update` into `product`, as the backend does.
pub fn apply_update(update: &ProductUpdate, product: &mut Product) {
    if let Some(name) = &update.name {
        product.name = name.clone();
    }
    if let Some(price) = update.price {
        product.price = price;
    }
    if let Some(description) = &update.description {
        product.description = description.clone();
    }
    if let Some(stock) = update.stock {
        product.stock = stock;
    }
}

// ---------------------------------------------------------------------------
// Sample data
// ---------------------------------------------------------------------------

pub fn product(id: i64, name: &str, price: f64, description: Option<&str>, stock: i64) -> Product {
    Product {
        id,
        name: name.to_string(),
        price,
        description: description.map(str::to_string),
        stock,
    }
}

pub fn sample_products() -> Vec<Product> {
    vec![
        product(1, "Laptop", 999.99, Some("High-end laptop"), 10),
        product(2, "Mouse", 29.99, Some("Wireless mouse"), 50),
        product(3, "Keyboard", 79.99, Some("Mechanical keyboard"), 30),
        product(4, "Webcam", 49.5, None, 0),
    ]
}

// ---------------------------------------------------------------------------
// Loopback HTTP
// ---------------------------------------------------------------------------

/// A request as received by `serve_once`.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// e.g. `POST /products/ HTTP/1.1`
    pub request_line: String,
    pub head: String,
    pub body: String,
}

impl RecordedRequest {
    /// Parse the body as JSON, or `Value::Null` when it is empty.
    pub fn json(&self) -> serde_json::Value {
        if self.body.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_str(&self.body).unwrap()
        }
    }
}

/// Accept a single connection on a loopback port, reply with `status` and a
/// JSON `body`, and return the request that was received, body included.
///
/// Returns `(base_url, handle)`.
pub fn serve_once(status: &str, body: &str) -> (String, JoinHandle<RecordedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let handle = std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut raw = Vec::new();
        let mut buf = [0u8; 1024];
        let head_end = loop {
            if let Some(pos) = raw.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break raw.len();
            }
            raw.extend_from_slice(&buf[..n]);
        };

        let head = String::from_utf8_lossy(&raw[..head_end]).into_owned();
        let content_length = head
            .lines()
            .filter_map(|l| l.split_once(':'))
            .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        while raw.len() < head_end + content_length {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            raw.extend_from_slice(&buf[..n]);
        }

        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
        RecordedRequest {
            request_line: head.lines().next().unwrap_or_default().to_string(),
            body: String::from_utf8_lossy(&raw[head_end..]).into_owned(),
            head,
        }
    });
    (format!("http://{addr}"), handle)
}
