//! Presentational helpers shared by every frontend.
//!
//! Renderers return plain text; a shell decides how to lay it out.

use crate::catalog::EmptyState;
use crate::models::{Cart, CartItem, Product};

pub const NO_DESCRIPTION: &str = "No description available";

/// Names longer than this are shortened in the delete prompt.
pub const MAX_NAME_DISPLAY: usize = 50;
const ELLIPSIS: &str = "...";

/// Render a price with exactly two decimal digits, e.g. `$9.50`.
pub fn format_price(price: f64) -> String {
    format!("${price:.2}")
}

/// Shorten `name` to `max` characters, ending in `...` when cut.
pub fn truncate_name(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        return name.to_string();
    }
    let keep = max.saturating_sub(ELLIPSIS.len());
    let mut out: String = name.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

pub fn description_or_placeholder(description: Option<&str>) -> &str {
    description.unwrap_or(NO_DESCRIPTION)
}

pub fn stock_label(stock: i64) -> String {
    if stock > 0 {
        format!("{stock} in stock")
    } else {
        "Out of stock".to_string()
    }
}

/// Item count shown on the cart button.
pub fn cart_badge(cart: &Cart) -> String {
    cart.total_items.to_string()
}

pub fn render_product_card(product: &Product) -> String {
    format!(
        "{}\n{}\n{} | {}",
        product.name,
        description_or_placeholder(product.description.as_deref()),
        format_price(product.price),
        stock_label(product.stock)
    )
}

pub fn render_product_detail(product: &Product) -> String {
    format!(
        "Product #{}\nName: {}\nPrice: {}\nStock: {}\nDescription: {}",
        product.id,
        product.name,
        format_price(product.price),
        stock_label(product.stock),
        description_or_placeholder(product.description.as_deref())
    )
}

fn render_cart_line(item: &CartItem) -> String {
    format!(
        "{} x{} @ {} = {}",
        item.product.name,
        item.quantity,
        format_price(item.product.price),
        format_price(item.product.price * f64::from(item.quantity))
    )
}

pub fn render_cart_panel(cart: &Cart) -> String {
    if cart.is_empty() {
        return "Your cart is empty".to_string();
    }
    let mut lines: Vec<String> = cart.items.iter().map(render_cart_line).collect();
    lines.push(format!("Items: {}", cart_badge(cart)));
    lines.push(format!("Total: {}", format_price(cart.total_price)));
    lines.join("\n")
}

pub fn render_delete_prompt(product: &Product) -> String {
    format!(
        "Are you sure you want to delete \"{}\"? This action cannot be undone.",
        truncate_name(&product.name, MAX_NAME_DISPLAY)
    )
}

pub fn render_empty_state(state: &EmptyState) -> String {
    if state.show_add_product {
        format!("{}\n[Add Product]", state.message)
    } else {
        state.message.clone()
    }
}
