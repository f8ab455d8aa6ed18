//! Identity resolution: turning an auth token into a username.
//!
//! Rookline doesn't own accounts. Registration and login live elsewhere;
//! whatever issues tokens there implements [`IdentityProvider`] here, and
//! the coordinator calls it once per command.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use rand::Rng;
use rookline_protocol::Username;
use tokio::sync::RwLock;

use crate::SessionError;

/// Resolves a client's auth token to the account it belongs to.
///
/// `Send + Sync + 'static` because one provider is shared by every
/// connection task for the lifetime of the server.
///
/// # Example
///
/// ```rust
/// use rookline_protocol::Username;
/// use rookline_session::{IdentityProvider, SessionError};
///
/// /// Treats the token itself as the username. Development only.
/// struct TrustingProvider;
///
/// impl IdentityProvider for TrustingProvider {
///     async fn resolve(&self, token: &str) -> Result<Username, SessionError> {
///         if token.is_empty() {
///             return Err(SessionError::AuthFailed("empty token".into()));
///         }
///         Ok(Username::new(token))
///     }
/// }
/// ```
pub trait IdentityProvider: Send + Sync + 'static {
    /// Returns the username behind `token`.
    ///
    /// # Errors
    /// [`SessionError::AuthFailed`] if the token is unknown or revoked.
    fn resolve(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<Username, SessionError>> + Send;
}

impl<T: IdentityProvider> IdentityProvider for Arc<T> {
    fn resolve(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<Username, SessionError>> + Send {
        (**self).resolve(token)
    }
}

/// An [`IdentityProvider`] that keeps tokens in memory.
///
/// Tokens are minted with [`issue`](Self::issue) and invalidated with
/// [`revoke`](Self::revoke). Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryIdentityProvider {
    tokens: RwLock<HashMap<String, Username>>,
}

impl MemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mints a fresh token for `username` and returns it.
    ///
    /// A user may hold several tokens at once; each one resolves to the
    /// same username until revoked.
    pub async fn issue(&self, username: Username) -> String {
        let token = generate_token();
        tracing::debug!(%username, "issued auth token");
        self.tokens.write().await.insert(token.clone(), username);
        token
    }

    /// Invalidates `token`. Returns `false` if it was not known.
    pub async fn revoke(&self, token: &str) -> bool {
        self.tokens.write().await.remove(token).is_some()
    }
}

impl IdentityProvider for MemoryIdentityProvider {
    async fn resolve(&self, token: &str) -> Result<Username, SessionError> {
        self.tokens
            .read()
            .await
            .get(token)
            .cloned()
            .ok_or_else(|| SessionError::AuthFailed("unknown auth token".into()))
    }
}

/// 16 random bytes (128 bits) as 32 lowercase hex characters.
fn generate_token() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 16] = rng.random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

// =========================================================================
// Tests
// =========================================================================
