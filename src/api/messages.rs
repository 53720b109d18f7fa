use crate::api::AppState;
use crate::api::schemas::messages::{MessageRequest, MessageResponse, UpdateMessageResponse};
use crate::domain::message::MessageId;
use crate::error::{AppError, Result};
use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::Uri,
};

fn decode_message(body: &Bytes, error: &str) -> Result<MessageRequest> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, "Rejected message body");
        AppError::BadRequest(error.to_string())
    })
}

/// Lists every stored message.
///
/// # Errors
/// Returns a store error if the messages cannot be read.
pub async fn list_messages(State(state): State<AppState>, uri: Uri) -> Result<Json<Vec<MessageResponse>>> {
    tracing::info!(path = %uri.path(), "Listing messages");

    let messages = state.message_service.list_messages().await?;

    tracing::info!(count = messages.len(), "Messages retrieved");
    Ok(Json(messages.into_iter().map(Into::into).collect()))
}

/// Fetches one message by id.
///
/// # Errors
/// Returns `AppError::BadRequest` for a malformed id.
/// Returns `AppError::NotFound` if the message does not exist.
pub async fn get_message(
    State(state): State<AppState>,
    uri: Uri,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    tracing::info!(path = %uri.path(), "Fetching message");

    let message = state.message_service.get_message(&id).await?;

    tracing::info!(message_id = %message.id, "Message fetched");
    Ok(Json(message.into()))
}

/// Stores a new message and responds with its generated id.
///
/// # Errors
/// Returns `AppError::BadRequest` if the body is not a valid message.
pub async fn send_message(State(state): State<AppState>, uri: Uri, body: Bytes) -> Result<Json<String>> {
    tracing::info!(path = %uri.path(), "Sending message");

    let request = decode_message(&body, "Failed to decode request body")?;
    let id = state.message_service.send_message(request.into()).await?;

    tracing::info!(message_id = %id, "Message sent");
    Ok(Json(id.to_string()))
}

/// Replaces a message with the request body.
///
/// # Errors
/// Returns `AppError::BadRequest` for a malformed id or body.
/// Returns `AppError::NotFound` if the message does not exist.
pub async fn update_message(
    State(state): State<AppState>,
    uri: Uri,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<UpdateMessageResponse>> {
    tracing::info!(path = %uri.path(), "Updating message");

    let id = MessageId::parse(&id)?;
    let request = decode_message(&body, "Invalid message data")?;
    let updated = state.message_service.update_message(id, request.into()).await?;

    tracing::info!(message_id = %updated.id, "Message updated");
    Ok(Json(updated.into()))
}

/// Deletes a message and responds with its last state.
///
/// # Errors
/// Returns `AppError::BadRequest` for a malformed id.
/// Returns `AppError::NotFound` if the message does not exist.
pub async fn delete_message(
    State(state): State<AppState>,
    uri: Uri,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    tracing::info!(path = %uri.path(), "Deleting message");

    let deleted = state.message_service.delete_message(&id).await?;

    tracing::info!(message_id = %deleted.id, "Message deleted");
    Ok(Json(deleted.into()))
}
