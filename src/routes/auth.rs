//! Auth routes - hosted identity delegation, callback, sign-out.
//!
//! Sign-in and sign-up never collect credentials here: they set a CSRF state
//! cookie and redirect to the provider's hosted screen for the requested
//! intent. The callback closes the loop by exchanging the provider code for
//! a session token and placing it in the session cookie.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Deserialize;

use crate::identity::AuthIntent;
use crate::routes::pages;
use crate::services::session;
use crate::state::AppState;
use crate::view;

// =============================================================================
// CALLBACK STATE CHECK
// =============================================================================

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum StateCheck {
    Ok,
    Missing,
    Mismatch,
}

/// Verify the CSRF state echoed by the provider against the state cookie.
pub(crate) fn check_auth_state(cookie_state: &str, callback_state: Option<&str>) -> StateCheck {
    let Some(provided) = callback_state else {
        return StateCheck::Missing;
    };
    if cookie_state.is_empty() || cookie_state != provided {
        return StateCheck::Mismatch;
    }
    StateCheck::Ok
}

fn check_rate_limit(state: &AppState, addr: SocketAddr) -> Result<(), Response> {
    if let Err(e) = state.rate_limiter.check_and_record(addr.ip()) {
        tracing::warn!(client = %addr.ip(), error = %e, "auth rate limit exceeded");
        return Err((StatusCode::TOO_MANY_REQUESTS, "too many requests").into_response());
    }
    Ok(())
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `GET /sign-in` - delegate to the provider's hosted sign-in screen.
pub async fn sign_in(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> Response {
    delegate(&state, addr, &headers, AuthIntent::SignIn).await
}

/// `GET /sign-up` - delegate to the provider's hosted sign-up screen.
pub async fn sign_up(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> Response {
    delegate(&state, addr, &headers, AuthIntent::SignUp).await
}

/// Shared delegation: already-authenticated requests skip straight to the
/// dashboard, everything else is sent to the provider with a fresh CSRF
/// state cookie.
async fn delegate(state: &AppState, addr: SocketAddr, headers: &HeaderMap, intent: AuthIntent) -> Response {
    if let Err(response) = check_rate_limit(state, addr) {
        return response;
    }

    if pages::resolve_principal(state, headers).await.is_some() {
        return Redirect::to(view::DASHBOARD_PATH).into_response();
    }

    let Some(identity) = &state.identity else {
        return (StatusCode::SERVICE_UNAVAILABLE, "identity provider not configured").into_response();
    };

    let auth_state = session::generate_token();
    let secure = session::cookie_secure();
    let jar = CookieJar::new().add(session::auth_state_cookie(auth_state.clone(), secure));

    (jar, Redirect::temporary(&identity.authorize_url(intent, &auth_state))).into_response()
}

#[derive(Deserialize)]
pub struct CallbackQuery {
    code: String,
    state: Option<String>,
}

/// `GET /auth/callback` - verify state, exchange code, set cookie, redirect
/// to the dashboard.
pub async fn callback(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    jar: CookieJar,
    Query(params): Query<CallbackQuery>,
) -> Response {
    if let Err(response) = check_rate_limit(&state, addr) {
        return response;
    }

    let Some(identity) = &state.identity else {
        return (StatusCode::SERVICE_UNAVAILABLE, "identity provider not configured").into_response();
    };
    let secure = session::cookie_secure();

    let expected_state = jar
        .get(session::AUTH_STATE_COOKIE_NAME)
        .map(Cookie::value)
        .unwrap_or_default();
    match check_auth_state(expected_state, params.state.as_deref()) {
        StateCheck::Missing => return (StatusCode::BAD_REQUEST, "missing auth state").into_response(),
        StateCheck::Mismatch => return (StatusCode::UNAUTHORIZED, "invalid auth state").into_response(),
        StateCheck::Ok => {}
    }

    let token = match identity.exchange_code(&params.code).await {
        Ok(t) => t,
        Err(e) => {
            tracing::error!(error = %e, "auth code exchange failed");
            return (StatusCode::BAD_GATEWAY, "sign-in could not be completed").into_response();
        }
    };

    let jar = jar
        .add(session::session_cookie(token, secure))
        .add(session::clear_auth_state_cookie(secure));

    (jar, Redirect::to(view::DASHBOARD_PATH)).into_response()
}

/// `POST /sign-out` - revoke the provider session (best effort), clear the
/// cookie, return to the landing page.
pub async fn sign_out(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = session::session_token(&headers) {
        if let Some(identity) = &state.identity {
            let _ = identity.revoke_session(&token).await;
        }
    }

    let secure = session::cookie_secure();
    let jar = CookieJar::new().add(session::clear_session_cookie(secure));

    (jar, Redirect::to(view::ROOT_PATH)).into_response()
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
