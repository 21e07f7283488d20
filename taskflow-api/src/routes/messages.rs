/// Legacy welcome-message demo endpoints
///
/// These predate the task/project domain and exercise basic database
/// round-trips against the `welcome_messages` table.
///
/// # Endpoints
///
/// - `GET /api/message`: the primary message (row id = 1)
/// - `GET /api/messages`: all messages with a count
/// - `POST /api/message`: insert a message
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use taskflow_shared::models::message::WelcomeMessage;

const MESSAGE_SOURCE: &str = "PostgreSQL Database";

/// Primary message response
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Always true
    pub success: bool,

    /// The message text
    pub message: String,

    /// Where the message came from
    pub source: String,
}

/// Message list response
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageListResponse {
    /// Always true
    pub success: bool,

    /// Number of messages
    pub count: usize,

    /// All messages ordered by ID
    pub messages: Vec<WelcomeMessage>,
}

/// Create message request
#[derive(Debug, Deserialize)]
pub struct CreateMessageRequest {
    /// Message text
    pub message: Option<String>,
}

/// Create message response
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateMessageResponse {
    /// Always true
    pub success: bool,

    /// The stored row
    pub data: WelcomeMessage,
}

/// Get the primary welcome message
///
/// When the table exists but holds no primary row, the endpoint still
/// succeeds and says so; a store failure returns a 500 with its own
/// message field, matching the historical contract.
pub async fn get_message(State(state): State<AppState>) -> Response {
    match WelcomeMessage::find_primary(&state.db).await {
        Ok(Some(message)) => Json(MessageResponse {
            success: true,
            message,
            source: MESSAGE_SOURCE.to_string(),
        })
        .into_response(),
        Ok(None) => Json(MessageResponse {
            success: true,
            message: "Database is connected but no message found".to_string(),
            source: MESSAGE_SOURCE.to_string(),
        })
        .into_response(),
        Err(err) => {
            tracing::error!("Database error: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "success": false,
                    "message": "Failed to fetch message from database",
                    "error": err.to_string(),
                })),
            )
                .into_response()
        }
    }
}

/// List all welcome messages
pub async fn list_messages(
    State(state): State<AppState>,
) -> ApiResult<Json<MessageListResponse>> {
    let messages = WelcomeMessage::list(&state.db).await?;

    Ok(Json(MessageListResponse {
        success: true,
        count: messages.len(),
        messages,
    }))
}

/// Insert a new welcome message
///
/// # Errors
///
/// - `400 Bad Request`: message field missing or empty
/// - `500 Internal Server Error`: store failure
pub async fn create_message(
    State(state): State<AppState>,
    Json(req): Json<CreateMessageRequest>,
) -> ApiResult<Json<CreateMessageResponse>> {
    let message = req
        .message
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Message is required".to_string()))?;

    let row = WelcomeMessage::create(&state.db, message).await?;

    Ok(Json(CreateMessageResponse {
        success: true,
        data: row,
    }))
}
