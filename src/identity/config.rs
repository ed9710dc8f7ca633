//! Identity provider configuration parsed from environment variables.

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

/// Hosted identity provider configuration loaded from environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityConfig {
    /// Provider API origin, no trailing slash.
    pub base_url: String,
    pub client_id: String,
    pub client_secret: String,
    /// Callback URL registered with the provider (`/auth/callback`).
    pub redirect_uri: String,
    pub timeouts: IdentityTimeouts,
}

impl IdentityConfig {
    /// Load from `IDENTITY_BASE_URL`, `IDENTITY_CLIENT_ID`,
    /// `IDENTITY_CLIENT_SECRET`, `IDENTITY_REDIRECT_URI`.
    /// Returns `None` if any are missing (identity will be disabled).
    ///
    /// Optional:
    /// - `IDENTITY_REQUEST_TIMEOUT_SECS`: default 10
    /// - `IDENTITY_CONNECT_TIMEOUT_SECS`: default 5
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let base_url = normalize_base_url(&std::env::var("IDENTITY_BASE_URL").ok()?);
        let client_id = std::env::var("IDENTITY_CLIENT_ID").ok()?;
        let client_secret = std::env::var("IDENTITY_CLIENT_SECRET").ok()?;
        let redirect_uri = std::env::var("IDENTITY_REDIRECT_URI").ok()?;
        let timeouts = IdentityTimeouts {
            request_secs: env_parse_u64("IDENTITY_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("IDENTITY_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };

        Some(Self { base_url, client_id, client_secret, redirect_uri, timeouts })
    }
}

pub(crate) fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
