//! Session cookie plumbing.
//!
//! ARCHITECTURE
//! ============
//! The provider owns all session state; this module only moves the provider's
//! token through cookies. Page auth uses the long-lived session cookie, while
//! the authorize/callback round trip uses a short-lived CSRF state cookie.

use std::fmt::Write;

use axum::http::HeaderMap;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use rand::Rng;
use time::Duration;

pub const SESSION_COOKIE_NAME: &str = "session_token";
pub const AUTH_STATE_COOKIE_NAME: &str = "auth_state";
const AUTH_STATE_TTL_MINUTES: i64 = 10;

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex token, used as the CSRF
/// state across the authorize/callback round trip.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

/// Whether cookies should carry the `Secure` attribute. Explicit
/// `COOKIE_SECURE` wins; otherwise inferred from the callback URL scheme.
#[must_use]
pub fn cookie_secure() -> bool {
    if let Some(value) = env_bool("COOKIE_SECURE") {
        return value;
    }

    std::env::var("IDENTITY_REDIRECT_URI")
        .map(|uri| uri.starts_with("https://"))
        .unwrap_or(false)
}

/// Extract the provider session token from the request's cookie header.
#[must_use]
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    jar.get(SESSION_COOKIE_NAME)
        .map(|c| c.value().to_owned())
        .filter(|v| !v.is_empty())
}

fn base_cookie(name: &'static str, value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

/// Session cookie carrying the provider token. Session-scoped: expiry is the
/// provider's concern, not the cookie's.
#[must_use]
pub fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    base_cookie(SESSION_COOKIE_NAME, token, secure)
}

#[must_use]
pub fn clear_session_cookie(secure: bool) -> Cookie<'static> {
    let mut cookie = base_cookie(SESSION_COOKIE_NAME, String::new(), secure);
    cookie.set_max_age(Duration::ZERO);
    cookie
}

/// CSRF state cookie for the authorize/callback round trip.
#[must_use]
pub fn auth_state_cookie(state: String, secure: bool) -> Cookie<'static> {
    let mut cookie = base_cookie(AUTH_STATE_COOKIE_NAME, state, secure);
    cookie.set_max_age(Duration::minutes(AUTH_STATE_TTL_MINUTES));
    cookie
}

#[must_use]
pub fn clear_auth_state_cookie(secure: bool) -> Cookie<'static> {
    let mut cookie = base_cookie(AUTH_STATE_COOKIE_NAME, String::new(), secure);
    cookie.set_max_age(Duration::ZERO);
    cookie
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
