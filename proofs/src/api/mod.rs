use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::service::health::health;
use crate::service::proof::create_signed_url;
use crate::utils::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/proofs", proof_router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn proof_router() -> Router<Arc<AppState>> {
    Router::new().route("/signed-url", post(create_signed_url))
}
