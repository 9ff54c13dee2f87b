#[derive(Debug, thiserror::Error)]
pub enum ShopfrontError {
    #[error("{}", transport_message(*status, message))]
    Transport {
        status: Option<u16>,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl ShopfrontError {
    /// Build a transport error for a non-2xx response.
    pub fn status(code: u16, message: impl Into<String>) -> Self {
        Self::Transport {
            status: Some(code),
            message: message.into(),
        }
    }

    /// HTTP status carried by a transport error, if a response was received.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ShopfrontError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

fn transport_message(status: Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("HTTP error! status: {code} ({message})"),
        None => format!("Network error: {message}"),
    }
}

pub type Result<T> = std::result::Result<T, ShopfrontError>;
