//! Authentication providers.
//!
//! The session store never checks credentials itself; it asks an
//! [`AuthenticationProvider`]. The only shipped provider is
//! [`StaticDemoProvider`], which accepts one hardcoded demo identity. A
//! backend-backed provider can replace it without touching the route guard.

use crate::error::AuthError;
use crate::session::Session;
use async_trait::async_trait;

/// Demo account e-mail.
pub const DEMO_EMAIL: &str = "demo@agricultor.lk";
/// Demo account password.
pub const DEMO_PASSWORD: &str = "Demo@123";
/// Display name of the demo identity.
pub const DEMO_NAME: &str = "Demo User";

/// Capability that turns an identifier/secret pair into a [`Session`].
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait AuthenticationProvider: Send + Sync {
    /// Checks the credentials and returns the identity they belong to.
    async fn authenticate(&self, identifier: &str, secret: &str) -> Result<Session, AuthError>;

    /// Short provider name for logs.
    fn name(&self) -> &'static str;
}

/// Accepts exactly one identity: [`DEMO_EMAIL`] / [`DEMO_PASSWORD`].
///
/// The identifier is trimmed and compared case-insensitively; the secret must
/// match exactly. The failure message reveals the demo credentials on purpose.
#[derive(Debug, Clone, Default)]
pub struct StaticDemoProvider;

impl StaticDemoProvider {
    /// Creates the demo provider.
    pub fn new() -> Self {
        Self
    }

    fn check(identifier: &str, secret: &str) -> Result<Session, AuthError> {
        if identifier.trim().to_lowercase() == DEMO_EMAIL && secret == DEMO_PASSWORD {
            Ok(Session::new(DEMO_NAME, DEMO_EMAIL))
        } else {
            Err(AuthError::InvalidCredentials(format!(
                "Invalid demo credentials. Try {} / {}",
                DEMO_EMAIL, DEMO_PASSWORD
            )))
        }
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl AuthenticationProvider for StaticDemoProvider {
    async fn authenticate(&self, identifier: &str, secret: &str) -> Result<Session, AuthError> {
        Self::check(identifier, secret)
    }

    fn name(&self) -> &'static str {
        "static-demo"
    }
}
