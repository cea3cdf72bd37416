use axum::{
    Router,
    http::StatusCode,
    routing::{delete, get, patch, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers::{
    auth::{login, register, verify},
    profile::{delete_account, get_profile, update_profile},
};
use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Handler for `GET /healthz` — liveness check.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Handler for `GET /readyz` — readiness check.
pub async fn readyz() -> StatusCode {
    StatusCode::OK
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Registration and OTP-gated login
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/verify", post(verify))
        // Token-authenticated profile
        .route("/profile", get(get_profile))
        .route("/profile", patch(update_profile))
        .route("/profile", delete(delete_account))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
