//! Session context and token persistence.
//!
//! A [`Session`] is the explicit value every authenticated backend call
//! receives. It is created from the persisted token when a page mounts and
//! carried by that page for its lifetime; nothing reads the token from
//! ambient storage mid-flight.
//!
//! The [`TokenStore`] is the single piece of state shared between pages. It
//! is read at page mount and written at login, checkout and logout.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
#[cfg(unix)]
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use cardshop_core::SessionToken;
use thiserror::Error;

/// Errors raised by a [`TokenStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the token file failed.
    #[error("token store I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An in-memory store's lock was poisoned.
    #[error("token store lock poisoned")]
    Poisoned,
}

/// The authenticated context handed to every backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: SessionToken,
}

impl Session {
    #[must_use]
    pub const fn new(token: SessionToken) -> Self {
        Self { token }
    }

    /// The bearer token of this session.
    #[must_use]
    pub const fn token(&self) -> &SessionToken {
        &self.token
    }

    /// Swap in a token re-issued by the backend (checkout does this).
    pub fn replace_token(&mut self, token: SessionToken) {
        self.token = token;
    }
}

/// Persistent storage for the session token.
pub trait TokenStore: Send + Sync {
    /// Load the stored token, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn load(&self) -> Result<Option<SessionToken>, StoreError>;

    /// Store `token`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn save(&self, token: &SessionToken) -> Result<(), StoreError>;

    /// Forget the stored token. Clearing an empty store is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn clear(&self) -> Result<(), StoreError>;
}

// =============================================================================
// FileTokenStore
// =============================================================================

/// Token store backed by a single file holding the raw token.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<SessionToken>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(SessionToken::new(token)))
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn save(&self, token: &SessionToken) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        write_private(&self.path, token.expose()).map_err(|e| self.io_error(e))?;
        tracing::debug!(path = %self.path.display(), "Session token stored");
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

/// Write `contents` to `path`, readable by the owner only on unix.
fn write_private(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(path)?;
    // A file left by an older version keeps its mode on open
    #[cfg(unix)]
    file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    file.write_all(contents.as_bytes())
}

// =============================================================================
// MemoryTokenStore
// =============================================================================

/// Token store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<SessionToken>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `token`.
    #[must_use]
    pub fn with_token(token: impl Into<SessionToken>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<SessionToken>, StoreError> {
        self.token
            .read()
            .map(|guard| guard.clone())
            .map_err(|_| StoreError::Poisoned)
    }

    fn save(&self, token: &SessionToken) -> Result<(), StoreError> {
        let mut guard = self.token.write().map_err(|_| StoreError::Poisoned)?;
        *guard = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut guard = self.token.write().map_err(|_| StoreError::Poisoned)?;
        *guard = None;
        Ok(())
    }
}
