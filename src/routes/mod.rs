pub mod auth;
pub mod github;
pub mod slack;

use axum::{response::IntoResponse, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::{responses::TextResponse, state::AppState};

async fn health() -> impl IntoResponse {
    TextResponse::success("OK")
}

/// Every route the service answers. Rate limiting is layered on in `main`
/// because it needs the peer address from the connection.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/slack", get(slack::link_slack).delete(slack::revoke_slack))
        .route("/github", get(github::github_home))
        .route("/github/return", get(github::github_return))
        .route("/auth/login", get(auth::oidc_login))
        .route("/auth/callback", get(auth::oidc_callback))
        .route("/auth/logout", get(auth::oidc_logout))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
