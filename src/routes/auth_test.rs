use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::header;

use super::*;
use crate::state::test_helpers::{StaticIdentity, dummy_principal, test_app_state, test_app_state_with_identity};

fn client_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 4411))
}

fn headers_with_cookies(cookies: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::COOKIE, cookies.parse().unwrap());
    headers
}

fn set_cookie_values(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_owned())
        .collect()
}

// =============================================================================
// check_auth_state
// =============================================================================

#[test]
fn auth_state_missing_from_callback() {
    assert_eq!(check_auth_state("abc", None), StateCheck::Missing);
}

#[test]
fn auth_state_mismatch() {
    assert_eq!(check_auth_state("abc", Some("xyz")), StateCheck::Mismatch);
}

#[test]
fn auth_state_empty_cookie_is_mismatch() {
    assert_eq!(check_auth_state("", Some("abc")), StateCheck::Mismatch);
}

#[test]
fn auth_state_match() {
    assert_eq!(check_auth_state("abc", Some("abc")), StateCheck::Ok);
}

// =============================================================================
// sign-in / sign-up delegation
// =============================================================================

#[tokio::test]
async fn sign_in_without_identity_answers_503() {
    let response = sign_in(
        axum::extract::State(test_app_state()),
        ConnectInfo(client_addr()),
        HeaderMap::new(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn sign_in_redirects_to_provider_with_state_cookie() {
    let state = test_app_state_with_identity(Arc::new(StaticIdentity::new()));
    let response = sign_in(axum::extract::State(state), ConnectInfo(client_addr()), HeaderMap::new()).await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    let location = response.headers().get(header::LOCATION).unwrap().to_str().unwrap();
    assert!(location.starts_with("https://id.test/oauth/authorize?intent=sign_in&state="));
    assert!(
        set_cookie_values(&response)
            .iter()
            .any(|c| c.starts_with("auth_state="))
    );
}

#[tokio::test]
async fn sign_up_targets_the_sign_up_intent() {
    let state = test_app_state_with_identity(Arc::new(StaticIdentity::new()));
    let response = sign_up(axum::extract::State(state), ConnectInfo(client_addr()), HeaderMap::new()).await;

    let location = response.headers().get(header::LOCATION).unwrap().to_str().unwrap();
    assert!(location.contains("intent=sign_up"));
}

#[tokio::test]
async fn sign_in_when_already_authenticated_goes_to_dashboard() {
    let state = test_app_state_with_identity(Arc::new(StaticIdentity::with_session("tok", dummy_principal("Ada"))));
    let response = sign_in(
        axum::extract::State(state),
        ConnectInfo(client_addr()),
        headers_with_cookies("session_token=tok"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/dashboard");
}

#[tokio::test]
async fn sign_in_rate_limit_answers_429() {
    let state = test_app_state_with_identity(Arc::new(StaticIdentity::new()));

    // Default per-client limit is 10/min; the 11th attempt from one address
    // must be rejected.
    for _ in 0..10 {
        let response = sign_in(
            axum::extract::State(state.clone()),
            ConnectInfo(client_addr()),
            HeaderMap::new(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    }

    let response = sign_in(axum::extract::State(state), ConnectInfo(client_addr()), HeaderMap::new()).await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
}

// =============================================================================
// callback
// =============================================================================

fn callback_query(code: &str, state: Option<&str>) -> Query<CallbackQuery> {
    Query(CallbackQuery { code: code.to_owned(), state: state.map(str::to_owned) })
}

#[tokio::test]
async fn callback_with_matching_state_sets_session_and_goes_to_dashboard() {
    let state = test_app_state_with_identity(Arc::new(StaticIdentity::new()));
    let jar = CookieJar::from_headers(&headers_with_cookies("auth_state=abc"));

    let response = callback(
        axum::extract::State(state),
        ConnectInfo(client_addr()),
        jar,
        callback_query("c1", Some("abc")),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/dashboard");

    let cookies = set_cookie_values(&response);
    assert!(cookies.iter().any(|c| c.starts_with("session_token=token-for-c1")));
    // The CSRF state cookie is cleared in the same response.
    assert!(cookies.iter().any(|c| c.starts_with("auth_state=") && c.contains("Max-Age=0")));
}

#[tokio::test]
async fn callback_without_state_answers_400() {
    let state = test_app_state_with_identity(Arc::new(StaticIdentity::new()));
    let jar = CookieJar::from_headers(&headers_with_cookies("auth_state=abc"));

    let response = callback(
        axum::extract::State(state),
        ConnectInfo(client_addr()),
        jar,
        callback_query("c1", None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn callback_with_mismatched_state_answers_401() {
    let state = test_app_state_with_identity(Arc::new(StaticIdentity::new()));
    let jar = CookieJar::from_headers(&headers_with_cookies("auth_state=abc"));

    let response = callback(
        axum::extract::State(state),
        ConnectInfo(client_addr()),
        jar,
        callback_query("c1", Some("evil")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn callback_without_state_cookie_answers_401() {
    let state = test_app_state_with_identity(Arc::new(StaticIdentity::new()));
    let jar = CookieJar::new();

    let response = callback(
        axum::extract::State(state),
        ConnectInfo(client_addr()),
        jar,
        callback_query("c1", Some("abc")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn callback_exchange_failure_answers_502() {
    let state = test_app_state_with_identity(Arc::new(StaticIdentity::failing()));
    let jar = CookieJar::from_headers(&headers_with_cookies("auth_state=abc"));

    let response = callback(
        axum::extract::State(state),
        ConnectInfo(client_addr()),
        jar,
        callback_query("c1", Some("abc")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

// =============================================================================
// sign-out
// =============================================================================

#[tokio::test]
async fn sign_out_clears_cookie_and_returns_to_root() {
    let state = test_app_state_with_identity(Arc::new(StaticIdentity::with_session("tok", dummy_principal("Ada"))));
    let response = sign_out(axum::extract::State(state), headers_with_cookies("session_token=tok")).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");
    assert!(
        set_cookie_values(&response)
            .iter()
            .any(|c| c.starts_with("session_token=") && c.contains("Max-Age=0"))
    );
}

#[tokio::test]
async fn sign_out_without_session_still_returns_to_root() {
    let response = sign_out(axum::extract::State(test_app_state()), HeaderMap::new()).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");
}
