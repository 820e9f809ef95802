//! Admin session held in persistent key/value storage.
//!
//! The session is two entries: an opaque bearer token and a string-typed
//! admin flag. Nothing is cached here; each call goes to the backend.

pub mod storage;

pub use storage::{FileStorage, MemoryStorage, SessionStorage};

use std::sync::Arc;

use crate::error::ClientResult;

pub const TOKEN_KEY: &str = "adminToken";
pub const ADMIN_FLAG_KEY: &str = "isAdmin";

#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self { storage }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// Persist token and flag. The token is stored as-is.
    pub fn set_session(&self, token: &str, is_admin: bool) -> ClientResult<()> {
        self.storage.set(TOKEN_KEY, token)?;
        self.storage
            .set(ADMIN_FLAG_KEY, if is_admin { "true" } else { "false" })?;
        tracing::debug!(is_admin, "session stored");
        Ok(())
    }

    pub fn get_token(&self) -> ClientResult<Option<String>> {
        Ok(self.storage.get(TOKEN_KEY)?.filter(|t| !t.is_empty()))
    }

    /// True only when the flag reads exactly `"true"` and a token is present
    pub fn is_authenticated(&self) -> ClientResult<bool> {
        let is_admin = self.storage.get(ADMIN_FLAG_KEY)?.as_deref() == Some("true");
        Ok(is_admin && self.get_token()?.is_some())
    }

    pub fn clear(&self) -> ClientResult<()> {
        self.storage.remove(TOKEN_KEY)?;
        self.storage.remove(ADMIN_FLAG_KEY)?;
        tracing::debug!("session cleared");
        Ok(())
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}
