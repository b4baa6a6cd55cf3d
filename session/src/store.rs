//! Token persistence.
//!
//! SYSTEM CONTEXT
//! ==============
//! The only durable client-side state is the bearer token pair. A store is a
//! flat string key/value map (the shape of browser local storage); [`Session`]
//! layers the GreenMate key names and the login/logout transitions on top.
//!
//! Writes are not coordinated across processes. Two CLI invocations racing on
//! the same file see last-writer-wins.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::claims::{SessionClaims, TokenError, decode_claims};

/// Storage key holding the access token attached to authorized calls.
pub const ACCESS_TOKEN_KEY: &str = "accessToken";
/// Storage key holding the refresh token issued alongside the access token.
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

/// Error returned by [`TokenStore`] implementations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("session file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("session file is not a JSON string map: {0}")]
    Json(#[from] serde_json::Error),
}

/// Flat string key/value storage for session tokens.
pub trait TokenStore: Send + Sync {
    /// Read a value, `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete a value. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be written.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

// =============================================================================
// MEMORY STORE
// =============================================================================

/// In-process store; contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

// =============================================================================
// FILE STORE
// =============================================================================

/// JSON-file store. A missing file reads as an empty map.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), lock: Mutex::new(()) }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if entries.is_empty() {
            return match std::fs::remove_file(&self.path) {
                Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
                _ => Ok(()),
            };
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let rendered = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, rendered)?;
        Ok(())
    }
}

impl TokenStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.load()?;
        entries.insert(key.to_owned(), value.to_owned());
        self.save(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }
}

// =============================================================================
// SESSION
// =============================================================================

/// Shared handle over a [`TokenStore`] using the GreenMate key layout.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn TokenStore>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

impl Session {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self { store }
    }

    /// Session backed by a fresh [`MemoryStore`].
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// The stored access token, if signed in.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn access_token(&self) -> Result<Option<String>, StoreError> {
        Ok(self.store.get(ACCESS_TOKEN_KEY)?.filter(|t| !t.is_empty()))
    }

    /// The stored refresh token, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn refresh_token(&self) -> Result<Option<String>, StoreError> {
        self.store.get(REFRESH_TOKEN_KEY)
    }

    /// Persist a freshly issued token pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn store_tokens(&self, access_token: &str, refresh_token: &str) -> Result<(), StoreError> {
        self.store.set(ACCESS_TOKEN_KEY, access_token)?;
        self.store.set(REFRESH_TOKEN_KEY, refresh_token)
    }

    /// Forget both tokens, returning to the logged-out state.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.remove(ACCESS_TOKEN_KEY)?;
        self.store.remove(REFRESH_TOKEN_KEY)
    }

    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn is_authenticated(&self) -> Result<bool, StoreError> {
        Ok(self.access_token()?.is_some())
    }

    /// Decode the identity carried by the stored access token.
    ///
    /// Returns `Ok(None)` when logged out.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or the token is malformed.
    pub fn claims(&self) -> Result<Option<SessionClaims>, SessionReadError> {
        let Some(token) = self.access_token()? else {
            return Ok(None);
        };
        Ok(Some(decode_claims(&token)?))
    }
}

/// Error returned by [`Session::claims`].
#[derive(Debug, thiserror::Error)]
pub enum SessionReadError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Token(#[from] TokenError),
}
