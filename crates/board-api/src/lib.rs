pub mod error;
pub mod messages;
pub mod state;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Routes for the `/messages` resource plus a liveness probe.
/// Middleware layers are left to the caller.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/messages",
            get(messages::list_messages).post(messages::create_message),
        )
        .route(
            "/messages/{id}",
            get(messages::get_message)
                .patch(messages::update_message)
                .delete(messages::delete_message),
        )
        .route("/health", get(health))
        .with_state(state)
}

/// GET /health: liveness check.
pub async fn health() -> &'static str {
    "ok"
}
