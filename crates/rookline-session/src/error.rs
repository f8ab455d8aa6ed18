//! Error types for the session layer.

/// Errors that can occur while resolving who a client is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The token was unknown, revoked, or rejected by the
    /// [`IdentityProvider`](crate::IdentityProvider).
    #[error("authentication failed: {0}")]
    AuthFailed(String),
}
