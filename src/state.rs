//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the identity provider handle and the sign-in rate limiter. There is
//! no database and no server-side session store: the provider owns all
//! principal and session state, and each request carries its own proof.

use std::sync::Arc;

use crate::identity::IdentityProvider;
use crate::rate_limit::RateLimiter;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    /// Optional identity provider. `None` if identity env vars are not
    /// configured, in which case every request renders signed-out and the
    /// delegation routes answer 503.
    pub identity: Option<Arc<dyn IdentityProvider>>,
    /// In-memory rate limiter for auth requests.
    pub rate_limiter: RateLimiter,
}

impl AppState {
    #[must_use]
    pub fn new(identity: Option<Arc<dyn IdentityProvider>>) -> Self {
        Self { identity, rate_limiter: RateLimiter::new() }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
