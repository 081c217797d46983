//! Session context: the single accessor for the bearer token.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token storage I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("no user data directory available for token storage")]
    NoDataDir,

    #[error("token store lock poisoned")]
    Poisoned,
}

impl<T> From<std::sync::PoisonError<T>> for AuthError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        AuthError::Poisoned
    }
}

/// Where the bearer token lives between runs.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Result<Option<String>, AuthError>;

    fn save(&self, token: &str) -> Result<(), AuthError>;

    fn clear(&self) -> Result<(), AuthError>;
}

/// Token kept in a single file (`{data_dir}/tradedesk/token` by default).
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store under the platform data directory.
    pub fn in_data_dir() -> Result<Self, AuthError> {
        let base = dirs::data_dir().ok_or(AuthError::NoDataDir)?;
        Ok(Self::new(base.join("tradedesk").join("token")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>, AuthError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => {
                let token = raw.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, token: &str) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut options = std::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&self.path)?;
        // `mode` only applies on creation; tighten a file left by an older run.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
        }
        file.write_all(token.as_bytes())?;
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Process-local store (tests, one-shot commands).
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>, AuthError> {
        Ok(self.token.lock()?.clone())
    }

    fn save(&self, token: &str) -> Result<(), AuthError> {
        *self.token.lock()? = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        *self.token.lock()? = None;
        Ok(())
    }
}

/// Explicit session handle passed to the data-access layer.
///
/// Cloning shares the underlying store.
#[derive(Clone)]
pub struct SessionContext {
    store: Arc<dyn TokenStore>,
}

impl SessionContext {
    pub fn new(store: impl TokenStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Session with no persisted token.
    pub fn in_memory() -> Self {
        Self::new(MemoryTokenStore::default())
    }

    /// Current bearer token, if signed in.
    ///
    /// Storage failures are logged and read as "signed out".
    pub fn token(&self) -> Option<String> {
        match self.store.load() {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!("Failed to read session token: {}", e);
                None
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn sign_in(&self, token: &str) -> Result<(), AuthError> {
        self.store.save(token)?;
        tracing::info!("Session token stored");
        Ok(())
    }

    pub fn sign_out(&self) -> Result<(), AuthError> {
        self.store.clear()?;
        tracing::info!("Session token cleared");
        Ok(())
    }
}

impl core::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SessionContext")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
