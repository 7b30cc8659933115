//! Session state.
//!
//! A [`SessionStore`] is an explicit object handed to whoever needs it (the
//! CLI command runner, the frontend's context). It holds at most one
//! [`Session`] in memory and mirrors it into a [`SessionStorage`] under
//! [`SESSION_KEY`].

use crate::auth::AuthenticationProvider;
use crate::error::{AuthError, StorageError};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Storage key the session is persisted under.
pub const SESSION_KEY: &str = "ap_user";

/// The authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Display name.
    pub name: String,
    /// Login e-mail.
    pub email: String,
}

impl Session {
    /// Creates a session for `name` / `email`.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Durable key/value storage for string values, shaped like browser local storage.
pub trait SessionStorage: Send + Sync {
    /// Reads the value under `key`, `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`; removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory [`SessionStorage`], mostly for tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Creates an empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a storage pre-seeded with one entry.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage
            .entries
            .lock()
            .insert(key.to_string(), value.to_string());
        storage
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

impl<S: SessionStorage + ?Sized> SessionStorage for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Holds the current session and keeps storage in sync with it.
///
/// Written only by [`login`](Self::login) and [`logout`](Self::logout);
/// everything else reads.
pub struct SessionStore<S: SessionStorage> {
    storage: S,
    provider: Arc<dyn AuthenticationProvider>,
    current: RwLock<Option<Session>>,
}

impl<S: SessionStorage> SessionStore<S> {
    /// Creates an empty store. Call [`restore`](Self::restore) once at startup.
    pub fn new(storage: S, provider: Arc<dyn AuthenticationProvider>) -> Self {
        Self {
            storage,
            provider,
            current: RwLock::new(None),
        }
    }

    /// Reloads the session from storage.
    ///
    /// Missing, unreadable or corrupt data means "not authenticated".
    pub fn restore(&self) -> Option<Session> {
        let restored = match self.storage.get(SESSION_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Session>(&raw) {
                Ok(session) => Some(session),
                Err(e) => {
                    warn!("Ignoring corrupt persisted session: {}", e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!("Session storage unavailable, starting signed out: {}", e);
                None
            }
        };

        debug!(authenticated = restored.is_some(), "Session restored");
        *self.current.write() = restored.clone();
        restored
    }

    /// Authenticates through the provider, then persists and publishes the session.
    pub async fn login(&self, identifier: &str, secret: &str) -> Result<Session, AuthError> {
        let session = self.provider.authenticate(identifier, secret).await?;

        let encoded = serde_json::to_string(&session)
            .map_err(|e| AuthError::Storage(format!("failed to encode session: {}", e)))?;
        self.storage.set(SESSION_KEY, &encoded)?;

        *self.current.write() = Some(session.clone());
        info!(provider = self.provider.name(), email = %session.email, "Signed in");
        Ok(session)
    }

    /// Signs out. Memory is always cleared; a storage failure is only logged.
    pub fn logout(&self) {
        if let Err(e) = self.storage.remove(SESSION_KEY) {
            warn!("Failed to remove persisted session: {}", e);
        }
        if self.current.write().take().is_some() {
            info!("Signed out");
        }
    }

    /// The current session, if any.
    pub fn current(&self) -> Option<Session> {
        self.current.read().clone()
    }

    /// Whether a session is present.
    pub fn is_authenticated(&self) -> bool {
        self.current.read().is_some()
    }

    /// The underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }
}
