//! Hosted identity provider client.
//!
//! Thin HTTP wrapper over the provider's authorize/token/session endpoints.
//! Pure parsing in the `parse_*` helpers for testability.

use std::time::Duration;

use uuid::Uuid;

use super::config::IdentityConfig;
use super::types::{AuthIntent, IdentityError, IdentityProvider, Principal};

// =============================================================================
// CLIENT
// =============================================================================

pub struct HostedIdentity {
    http: reqwest::Client,
    config: IdentityConfig,
}

impl HostedIdentity {
    /// Build a client for the given provider configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: IdentityConfig) -> Result<Self, IdentityError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| IdentityError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, config })
    }

    /// Build from environment variables. `Ok(None)` means identity is not
    /// configured and the application should run with sign-in disabled.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is present but the HTTP client
    /// fails to build.
    pub fn from_env() -> Result<Option<Self>, IdentityError> {
        match IdentityConfig::from_env() {
            Some(config) => Ok(Some(Self::new(config)?)),
            None => Ok(None),
        }
    }

    /// Provider API origin this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(serde::Deserialize)]
struct TokenResponse {
    session_token: String,
}

#[derive(serde::Deserialize)]
struct PrincipalResponse {
    id: Uuid,
    first_name: Option<String>,
    avatar_url: Option<String>,
}

impl From<PrincipalResponse> for Principal {
    fn from(p: PrincipalResponse) -> Self {
        Self { id: p.id, first_name: p.first_name, avatar_url: p.avatar_url }
    }
}

// =============================================================================
// PURE PARSERS
// =============================================================================

fn parse_token_response(body: &str) -> Result<String, IdentityError> {
    let token: TokenResponse =
        serde_json::from_str(body).map_err(|_| IdentityError::Parse(format!("unexpected token response: {body}")))?;
    Ok(token.session_token)
}

/// Map a principal lookup response to `Some`/`None`/error.
///
/// 401 and 404 both mean "no live session behind this token" rather than a
/// failure: providers answer 401 for expired tokens and 404 for revoked ones.
fn parse_principal_response(status: u16, body: &str) -> Result<Option<Principal>, IdentityError> {
    match status {
        200 => {
            let principal: PrincipalResponse =
                serde_json::from_str(body).map_err(|e| IdentityError::Parse(e.to_string()))?;
            Ok(Some(principal.into()))
        }
        401 | 404 => Ok(None),
        _ => Err(IdentityError::Response { status, body: body.to_owned() }),
    }
}

// =============================================================================
// PROVIDER IMPL
// =============================================================================

#[async_trait::async_trait]
impl IdentityProvider for HostedIdentity {
    fn authorize_url(&self, intent: AuthIntent, state: &str) -> String {
        format!(
            "{}/oauth/authorize?client_id={}&redirect_uri={}&intent={}&state={}",
            self.config.base_url,
            self.config.client_id,
            self.config.redirect_uri,
            intent.as_str(),
            state
        )
    }

    async fn exchange_code(&self, code: &str) -> Result<String, IdentityError> {
        let response = self
            .http
            .post(format!("{}/oauth/token", self.config.base_url))
            .json(&serde_json::json!({
                "grant_type": "authorization_code",
                "client_id": self.config.client_id,
                "client_secret": self.config.client_secret,
                "code": code,
                "redirect_uri": self.config.redirect_uri,
            }))
            .send()
            .await
            .map_err(|e| IdentityError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| IdentityError::Request(e.to_string()))?;

        if status != 200 {
            return Err(IdentityError::Response { status, body });
        }

        parse_token_response(&body)
    }

    async fn current_principal(&self, session_token: &str) -> Result<Option<Principal>, IdentityError> {
        let response = self
            .http
            .get(format!("{}/v1/me", self.config.base_url))
            .header("Authorization", format!("Bearer {session_token}"))
            .send()
            .await
            .map_err(|e| IdentityError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| IdentityError::Request(e.to_string()))?;

        parse_principal_response(status, &body)
    }

    async fn revoke_session(&self, session_token: &str) -> Result<(), IdentityError> {
        let response = self
            .http
            .delete(format!("{}/v1/sessions/current", self.config.base_url))
            .header("Authorization", format!("Bearer {session_token}"))
            .send()
            .await
            .map_err(|e| IdentityError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        // Already-dead sessions are fine: sign-out is idempotent.
        if matches!(status, 200 | 204 | 401 | 404) {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(IdentityError::Response { status, body })
    }
}

#[cfg(test)]
#[path = "hosted_test.rs"]
mod tests;
