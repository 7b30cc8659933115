//! Global application state

use std::sync::Arc;

use greenayu_core::{
    Access, AuthError, RouteGuard, Session, SessionStore, StaticDemoProvider, Transport,
};
use leptos::prelude::*;

use crate::api::{default_base_url, BrowserStorage, BrowserTransport, REQUEST_TIMEOUT_MS};

/// Shared through context by [`crate::App`].
#[derive(Clone)]
pub struct AppState {
    /// Signed-in identity, mirrored from the store so views can track it.
    pub session: RwSignal<Option<Session>>,
    store: Arc<SessionStore<BrowserStorage>>,
    guard: RouteGuard,
    transport: Arc<dyn Transport>,
}

impl AppState {
    /// Restores any persisted session and wires the backend transport.
    pub fn new() -> Self {
        let store = SessionStore::new(BrowserStorage, Arc::new(StaticDemoProvider::new()));
        let restored = store.restore();

        let transport = BrowserTransport::new(default_base_url(), REQUEST_TIMEOUT_MS);
        tracing::info!(backend = transport.base_url(), "GreenAyu frontend started");

        Self {
            session: RwSignal::new(restored),
            store: Arc::new(store),
            guard: RouteGuard::new(),
            transport: Arc::new(transport),
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let session = self.store.login(email, password).await?;
        self.session.set(Some(session.clone()));
        Ok(session)
    }

    pub fn logout(&self) {
        self.store.logout();
        self.session.set(None);
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.get().is_some()
    }

    /// Guard decision for `path`; tracks the session signal.
    pub fn authorize(&self, path: &str) -> Access {
        self.guard.authorize(path, self.session.get().as_ref())
    }

    /// Where to go after signing in, given the login page's query string.
    pub fn return_target(&self, query: &str) -> String {
        self.guard.return_target(query)
    }

    pub fn transport(&self) -> Arc<dyn Transport> {
        self.transport.clone()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
