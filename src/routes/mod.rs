//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the two pages and the identity delegation endpoints into a single
//! Axum router with request tracing and response compression. There is no
//! API surface beyond these routes.

pub mod auth;
pub mod pages;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

#[must_use]
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::landing))
        .route("/dashboard", get(pages::dashboard))
        .route("/sign-in", get(auth::sign_in))
        .route("/sign-up", get(auth::sign_up))
        .route("/auth/callback", get(auth::callback))
        .route("/sign-out", post(auth::sign_out))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
