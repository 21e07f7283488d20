/// Database status endpoint
///
/// One round-trip asking the server for its clock and version, echoed
/// together with the configured connection target. Unlike `/api/health`
/// this endpoint does talk to the store, so it is the quick way to tell
/// "server up, database down" apart from "all up".
///
/// # Endpoint
///
/// ```text
/// GET /api/db-status
/// ```
use crate::app::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Successful status payload
#[derive(Debug, Serialize, Deserialize)]
pub struct DbStatusResponse {
    /// "connected"
    pub status: String,

    /// Configured database name
    pub database: String,

    /// Configured database host
    pub host: String,

    /// Configured database port
    pub port: u16,

    /// Database server time
    pub timestamp: DateTime<Utc>,

    /// Database server version string
    pub version: String,
}

/// Database status handler
pub async fn db_status(State(state): State<AppState>) -> Response {
    let database = &state.config.database;

    let result: Result<(DateTime<Utc>, String), sqlx::Error> =
        sqlx::query_as("SELECT NOW() as current_time, version() as version")
            .fetch_one(&state.db)
            .await;

    match result {
        Ok((timestamp, version)) => Json(DbStatusResponse {
            status: "connected".to_string(),
            database: database.name.clone(),
            host: database.host.clone(),
            port: database.port,
            timestamp,
            version,
        })
        .into_response(),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({
                "status": "error",
                "database": database.name,
                "host": database.host,
                "error": err.to_string(),
            })),
        )
            .into_response(),
    }
}
