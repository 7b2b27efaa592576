//! Session token persistence
//!
//! A session is a single opaque bearer token stored under [`TOKEN_KEY`].
//! There is no expiry metadata: a stale token is only discovered when the
//! API rejects it.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use thiserror::Error;

/// Fixed key under which the token is stored
pub const TOKEN_KEY: &str = "token";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session storage unavailable: {0}")]
    Storage(String),
}

/// Durable key-value slot holding the session token
#[cfg_attr(test, mockall::automock)]
pub trait SessionStore: Send + Sync {
    /// Last stored token, if any
    fn get(&self) -> Option<String>;

    /// Persist `token`, replacing any previous one
    fn set(&self, token: &str) -> Result<(), SessionError>;

    /// Remove the stored token
    fn clear(&self) -> Result<(), SessionError>;
}

/// Process-local store; nothing survives a restart
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    token: RwLock<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Option<String> {
        self.token.read().ok().and_then(|token| token.clone())
    }

    fn set(&self, token: &str) -> Result<(), SessionError> {
        let mut slot = self
            .token
            .write()
            .map_err(|_| SessionError::Storage("session lock poisoned".into()))?;
        *slot = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        let mut slot = self
            .token
            .write()
            .map_err(|_| SessionError::Storage("session lock poisoned".into()))?;
        *slot = None;
        Ok(())
    }
}

/// Token kept in a file named after [`TOKEN_KEY`] inside a state directory
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(TOKEN_KEY),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Option<String> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        let token = raw.trim();
        (!token.is_empty()).then(|| token.to_string())
    }

    fn set(&self, token: &str) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut options = OpenOptions::new();
        options.create(true).write(true).truncate(true);

        // On Unix, owner read/write only from the moment the file exists
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&self.path)?;

        // `mode` only applies on creation; tighten a file left by an older run
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
        }

        file.write_all(token.as_bytes())?;
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::LocalStorageSessionStore;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::{SessionError, SessionStore, TOKEN_KEY};
    use gloo::storage::{LocalStorage, Storage};

    /// Browser `localStorage`, shared by every tab of the same profile.
    ///
    /// The token is stored as a raw string rather than gloo's JSON encoding.
    /// `web_sys::Storage` is looked up on every call so the store stays `Send`.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct LocalStorageSessionStore;

    impl LocalStorageSessionStore {
        pub fn new() -> Self {
            Self
        }
    }

    impl SessionStore for LocalStorageSessionStore {
        fn get(&self) -> Option<String> {
            LocalStorage::raw().get_item(TOKEN_KEY).ok().flatten()
        }

        fn set(&self, token: &str) -> Result<(), SessionError> {
            LocalStorage::raw()
                .set_item(TOKEN_KEY, token)
                .map_err(|err| SessionError::Storage(format!("{err:?}")))
        }

        fn clear(&self) -> Result<(), SessionError> {
            LocalStorage::raw()
                .remove_item(TOKEN_KEY)
                .map_err(|err| SessionError::Storage(format!("{err:?}")))
        }
    }
}
