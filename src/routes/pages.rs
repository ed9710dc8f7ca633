//! Page routes - landing and dashboard rendering.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Redirect, Response};

use crate::identity::Principal;
use crate::services::session;
use crate::state::AppState;
use crate::view;

/// Resolve the current principal from the request's session cookie.
///
/// One provider lookup per render. Provider failures are absorbed as "no
/// principal": the landing page falls back to its public branch and the
/// dashboard guard redirects to sign-in.
pub(crate) async fn resolve_principal(state: &AppState, headers: &HeaderMap) -> Option<Principal> {
    let token = session::session_token(headers)?;
    let identity = state.identity.as_ref()?;

    match identity.current_principal(&token).await {
        Ok(principal) => principal,
        Err(e) => {
            tracing::warn!(error = %e, "identity lookup failed; treating request as unauthenticated");
            None
        }
    }
}

/// `GET /` - landing page, public. Renders the visitor or member branch.
pub async fn landing(State(state): State<AppState>, headers: HeaderMap) -> Html<String> {
    let principal = resolve_principal(&state, &headers).await;
    let view = view::landing_view(principal);
    Html(view::render_landing(&view))
}

/// `GET /dashboard` - authenticated only. Requests without a live session
/// are redirected to sign-in and receive none of the protected markup.
pub async fn dashboard(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let principal = resolve_principal(&state, &headers).await;

    match view::dashboard_view(principal) {
        view::DashboardView::Redirect { to } => Redirect::to(to).into_response(),
        view::DashboardView::Welcome { first_name } => {
            Html(view::render_dashboard_welcome(&first_name)).into_response()
        }
    }
}

#[cfg(test)]
#[path = "pages_test.rs"]
mod tests;
