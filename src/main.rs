//! Main entry point for the Chronoverse web shell.
//!
//! Initializes tracing, builds the hosted identity client from the
//! environment, and serves the page and auth routes over Axum.

mod identity;
mod rate_limit;
mod routes;
mod services;
mod state;
mod view;

use std::net::SocketAddr;
use std::sync::Arc;

use identity::IdentityProvider;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    // Initialize identity client (non-fatal: pages render signed-out if config missing).
    let identity: Option<Arc<dyn IdentityProvider>> = match identity::HostedIdentity::from_env()
        .expect("identity client init failed")
    {
        Some(client) => {
            tracing::info!(provider = client.base_url(), "identity provider initialized");
            Some(Arc::new(client))
        }
        None => {
            tracing::warn!("identity provider not configured; sign-in and sign-up disabled");
            None
        }
    };

    let state = state::AppState::new(identity);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "chronoverse listening");
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .await
        .expect("server failed");
}
