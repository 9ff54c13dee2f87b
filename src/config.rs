use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Environment variable overriding the backend base URL.
pub const API_URL_ENV: &str = "SHOPFRONT_API_URL";
/// Environment variable overriding the directory holding the session token.
pub const DATA_DIR_ENV: &str = "SHOPFRONT_DATA_DIR";

/// File name of the persisted guest session token.
pub const SESSION_STORAGE_KEY: &str = "sessionId";

pub fn default_data_dir() -> PathBuf {
    if let Some(data) = dirs::data_local_dir() {
        data.join("shopfront-sdk")
    } else {
        PathBuf::from(".shopfront-sdk")
    }
}

/// Strip trailing slashes so paths can be appended verbatim.
pub fn normalize_base_url(base: &str) -> String {
    base.trim_end_matches('/').to_string()
}

// -- Endpoint paths ---------------------------------------------------------
//
// Paths are returned as raw segments; the transport percent-encodes each one
// when appending it to the base URL. A trailing empty segment yields a
// trailing slash.

pub fn products_path() -> Vec<String> {
    vec!["products".to_string(), String::new()]
}

pub fn product_path(id: i64) -> Vec<String> {
    vec!["products".to_string(), id.to_string()]
}

pub fn cart_path(session_id: &str) -> Vec<String> {
    vec!["cart".to_string(), session_id.to_string()]
}

pub fn cart_items_path(session_id: &str) -> Vec<String> {
    let mut path = cart_path(session_id);
    path.push("items".to_string());
    path
}

pub fn cart_item_path(session_id: &str, item_id: i64) -> Vec<String> {
    let mut path = cart_items_path(session_id);
    path.push(item_id.to_string());
    path
}
