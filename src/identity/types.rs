//! Identity types - provider-neutral principal, intents, and errors.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by identity provider operations.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    /// The HTTP request to the provider failed (transport level).
    #[error("provider request failed: {0}")]
    Request(String),

    /// The provider returned a non-success HTTP status.
    #[error("provider response error: status {status}")]
    Response { status: u16, body: String },

    /// The provider response body could not be deserialized.
    #[error("provider response parse failed: {0}")]
    Parse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// PRINCIPAL
// =============================================================================

/// The authenticated identity of the current user, as reported by the
/// provider. This application only ever reads it; creation, mutation, and
/// expiry all happen on the provider's side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Provider-assigned identifier.
    pub id: Uuid,
    /// First name, if the account has one. Rendered verbatim (escaped) in
    /// the dashboard greeting.
    pub first_name: Option<String>,
    /// Avatar image URL, if available.
    pub avatar_url: Option<String>,
}

// =============================================================================
// AUTH INTENT
// =============================================================================

/// Which hosted screen a delegation redirect targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthIntent {
    SignIn,
    SignUp,
}

impl AuthIntent {
    /// Wire value forwarded to the provider's authorize endpoint.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SignIn => "sign_in",
            Self::SignUp => "sign_up",
        }
    }
}

// =============================================================================
// IDENTITY PROVIDER TRAIT
// =============================================================================

/// Vendor-neutral async trait for the hosted identity service. Enables
/// swapping the concrete provider and mocking in tests.
#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Hosted page to send the browser to for the given intent, carrying an
    /// opaque CSRF state value the callback must echo back.
    fn authorize_url(&self, intent: AuthIntent, state: &str) -> String;

    /// Redeem a callback code for a provider session token.
    ///
    /// # Errors
    ///
    /// Returns an [`IdentityError`] if the request fails, the provider
    /// rejects the code, or the response is malformed.
    async fn exchange_code(&self, code: &str) -> Result<String, IdentityError>;

    /// Resolve the principal a session token currently names. `Ok(None)`
    /// means the token no longer refers to a live provider session.
    ///
    /// # Errors
    ///
    /// Returns an [`IdentityError`] on transport failure, unexpected provider
    /// status, or a malformed response body.
    async fn current_principal(&self, session_token: &str) -> Result<Option<Principal>, IdentityError>;

    /// Revoke the provider session behind a token. Revoking a session that
    /// is already gone is not an error.
    ///
    /// # Errors
    ///
    /// Returns an [`IdentityError`] on transport failure or an unexpected
    /// provider status.
    async fn revoke_session(&self, session_token: &str) -> Result<(), IdentityError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
