/// Error handling for the API server
///
/// This module provides a unified error type that maps to HTTP responses.
/// All handlers return `Result<T, ApiError>` which automatically converts
/// to the appropriate status code and `{success: false, error, ...}`
/// envelope.
///
/// Unlike a hardened deployment, generic store failures echo the
/// underlying database message to the caller; that is the documented
/// contract for this service, which is not security-sensitive.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

use taskflow_shared::db::pool::is_undefined_table;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400): a required field is missing or malformed.
    /// Raised before any store access is attempted.
    BadRequest(String),

    /// Not found (404): update/delete/get on an absent ID
    NotFound(String),

    /// Internal server error (500) caused by an unprovisioned schema.
    /// Carries the missing table name so the response can include a
    /// migration hint.
    SchemaMissing(String),

    /// Internal server error (500): generic store or handler failure
    Internal(String),
}

/// Error response envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always false
    pub success: bool,

    /// Human-readable error message
    pub error: String,

    /// Remediation hint (only for schema-not-provisioned errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::SchemaMissing(table) => {
                write!(f, "Relation {:?} does not exist", table)
            }
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, hint) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            ApiError::SchemaMissing(table) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("relation \"{}\" does not exist", table),
                Some(format!(
                    "Run database migrations to create the {} table",
                    table
                )),
            ),
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg, None)
            }
        };

        let body = Json(ErrorResponse {
            success: false,
            error,
            hint,
        });

        (status, body).into_response()
    }
}

/// Convert sqlx errors to API errors
///
/// `RowNotFound` maps to 404; everything else is a 500 with the store's
/// message echoed. Undefined-table conditions are context-dependent
/// (reads degrade, writes hint), so handlers route those through
/// [`map_store_error`] instead of this blanket conversion.
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".to_string()),
            _ => ApiError::Internal(err.to_string()),
        }
    }
}

/// Convert request-body validation failures to 400s
///
/// The contract predates this implementation and uses 400 (not 422) for
/// every input problem, so validator errors collapse into a single
/// BadRequest message.
impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(m) => m.to_string(),
                    None => format!("{} is invalid", field),
                })
            })
            .collect::<Vec<_>>()
            .join("; ");

        ApiError::BadRequest(message)
    }
}

/// Maps a store error from a write path, attaching the table name when
/// the relation is missing
pub fn map_store_error(err: sqlx::Error, table: &str) -> ApiError {
    if is_undefined_table(&err) {
        ApiError::SchemaMissing(table.to_string())
    } else {
        ApiError::from(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApiError::BadRequest("Title is required".to_string());
        assert_eq!(err.to_string(), "Bad request: Title is required");

        let err = ApiError::NotFound("Task not found".to_string());
        assert_eq!(err.to_string(), "Not found: Task not found");
    }

    #[test]
    fn test_status_codes() {
        let res = ApiError::BadRequest("x".into()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let res = ApiError::NotFound("x".into()).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let res = ApiError::SchemaMissing("tasks".into()).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let res = ApiError::Internal("boom".into()).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_from_sqlx_row_not_found() {
        let err = ApiError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn test_map_store_error_passes_through_generic_errors() {
        let err = map_store_error(sqlx::Error::PoolTimedOut, "tasks");
        assert!(matches!(err, ApiError::Internal(_)));
    }

    #[test]
    fn test_error_envelope_shape() {
        let body = ErrorResponse {
            success: false,
            error: "Route not found".to_string(),
            hint: None,
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Route not found");
        assert!(json.get("hint").is_none());
    }
}
