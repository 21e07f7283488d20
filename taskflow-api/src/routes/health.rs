/// Health check endpoint
///
/// A static liveness payload: it reports the environment tag and which
/// database host the server is configured against, but never touches the
/// store, so it stays green while the database is down.
///
/// # Endpoint
///
/// ```text
/// GET /api/health
/// ```
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "message": "TaskFlow API is running",
///   "timestamp": "2025-06-01T12:00:00Z",
///   "environment": "development",
///   "database": {
///     "host": "db.internal",
///     "configured": true
///   }
/// }
/// ```
use crate::app::AppState;
use axum::{extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Human-readable liveness message
    pub message: String,

    /// Current server time (ISO 8601)
    pub timestamp: String,

    /// Environment tag from configuration
    pub environment: String,

    /// Configured database target
    pub database: DatabaseInfo,
}

/// Database configuration echo
#[derive(Debug, Serialize, Deserialize)]
pub struct DatabaseInfo {
    /// Configured database host
    pub host: String,

    /// Whether a database host is configured
    pub configured: bool,
}

/// Health check handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = &state.config.database;

    Json(HealthResponse {
        status: "healthy".to_string(),
        message: "TaskFlow API is running".to_string(),
        timestamp: Utc::now().to_rfc3339(),
        environment: state.config.environment.clone(),
        database: DatabaseInfo {
            host: database.host.clone(),
            configured: !database.host.is_empty(),
        },
    })
}
