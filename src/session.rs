//! Guest session identity persisted in the local data directory.
//!
//! The token is generated once, written to a single file, and reused on every
//! later run. It is opaque to the rest of the SDK and passed verbatim as the
//! cart partition key.

use crate::config;
use crate::error::Result;
use rand::Rng;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info};

const RANDOM_SUFFIX_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Opaque client-generated token identifying a guest cart.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generate a fresh token of the form `session_<unix-millis>_<base36>`.
///
/// Unique enough to partition guest carts; not suitable as a secret.
pub fn generate_session_id() -> SessionId {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let mut rng = rand::thread_rng();
    let suffix: String = (0..RANDOM_SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    SessionId(format!("session_{millis}_{suffix}"))
}

/// Reads and writes the persisted session token.
pub struct SessionStore {
    /// Directory holding the token file.
    pub dir: PathBuf,
}

impl SessionStore {
    /// Create a store rooted at `dir`, or the platform data directory when `None`.
    pub fn new(dir: Option<PathBuf>) -> Result<Self> {
        let dir = dir.unwrap_or_else(config::default_data_dir);
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn token_path(&self) -> PathBuf {
        self.dir.join(config::SESSION_STORAGE_KEY)
    }

    /// Read the persisted token, if one exists and is non-empty.
    pub fn load(&self) -> Option<SessionId> {
        let path = self.token_path();
        let contents = fs::read_to_string(path).ok()?;
        let trimmed = contents.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(SessionId(trimmed.to_string()))
        }
    }

    /// Return the persisted token, generating and saving one on first run.
    ///
    /// The file is written through a temp file and renamed into place so an
    /// interrupted write never leaves a truncated token behind.
    pub fn load_or_create(&self) -> Result<SessionId> {
        if let Some(existing) = self.load() {
            debug!(session_id = %existing, "reusing persisted session");
            return Ok(existing);
        }

        let id = generate_session_id();
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(id.as_str().as_bytes())?;
        tmp.flush()?;
        tmp.persist(self.token_path()).map_err(|e| e.error)?;
        info!(session_id = %id, "created new guest session");
        Ok(id)
    }

    /// Forget the persisted token. The next `load_or_create` starts a new cart.
    pub fn clear(&self) -> Result<()> {
        let path = self.token_path();
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}
