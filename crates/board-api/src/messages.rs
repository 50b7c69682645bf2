use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{debug, error, info};

use board_db::{Database, StoreError};
use board_types::api::{CreateMessageRequest, MessageResponse, UpdateMessageRequest};
use board_types::models::MessagePatch;

use crate::error::ApiError;
use crate::state::AppState;

/// Run a blocking store call off the async runtime.
async fn with_db<F, T>(state: &AppState, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&Database) -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    let state = state.clone();
    tokio::task::spawn_blocking(move || f(&state.db))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::Internal
        })?
        .map_err(ApiError::from)
}

/// Ids are signed 64-bit integers. An integer too large to fit can never
/// name a stored message, so it is reported as not found rather than malformed.
fn parse_id(raw: &str) -> Result<i64, ApiError> {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::BadRequest(format!("invalid message id: {}", raw)));
    }

    raw.parse::<i64>()
        .map_err(|_| ApiError::NotFound(raw.to_string()))
}

/// GET /messages: every message, oldest first.
pub async fn list_messages(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let messages = with_db(&state, |db| db.list_messages()).await?;
    debug!("Listing {} messages", messages.len());

    let body: Vec<MessageResponse> = messages.into_iter().map(MessageResponse::from).collect();
    Ok(Json(body))
}

/// GET /messages/{id}
pub async fn get_message(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id?.0)?;
    let msg = with_db(&state, move |db| db.get_message(id)).await?;

    Ok(Json(MessageResponse::from(msg)))
}

/// POST /messages
pub async fn create_message(
    State(state): State<AppState>,
    payload: Result<Json<CreateMessageRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let msg = with_db(&state, move |db| db.create_message(&req.body, &req.username)).await?;
    info!("Message {} created by {}", msg.id, msg.username);

    Ok((StatusCode::CREATED, Json(MessageResponse::from(msg))))
}

/// PATCH /messages/{id}. Only `body` is patchable.
pub async fn update_message(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    payload: Result<Json<UpdateMessageRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id?.0)?;
    let Json(req) = payload?;
    let patch = MessagePatch::from(req);

    let msg = with_db(&state, move |db| db.update_message(id, &patch)).await?;
    info!("Message {} updated", msg.id);

    Ok(Json(MessageResponse::from(msg)))
}

/// DELETE /messages/{id}
pub async fn delete_message(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id?.0)?;
    with_db(&state, move |db| db.delete_message(id)).await?;
    info!("Message {} deleted", id);

    Ok(StatusCode::NO_CONTENT)
}
