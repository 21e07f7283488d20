/// Application state and router builder
///
/// This module defines the shared application state and provides a
/// function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use taskflow_api::{app::AppState, config::Config};
/// use taskflow_shared::db::pool::{create_pool, PoolConfig};
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = create_pool(PoolConfig {
///     url: config.database.url(),
///     ..Default::default()
/// })?;
/// let state = AppState::new(pool, config);
/// let app = taskflow_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```
use crate::config::Config;
use axum::{
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Catalog of routes, returned by the 404 fallback
pub const AVAILABLE_ROUTES: &[&str] = &[
    "GET /api/health",
    "GET /api/message",
    "GET /api/messages",
    "POST /api/message",
    "GET /api/db-status",
    "GET /api/tasks",
    "GET /api/tasks/:id",
    "POST /api/tasks",
    "PUT /api/tasks/:id",
    "PUT /api/tasks/:id/toggle",
    "DELETE /api/tasks/:id",
    "GET /api/projects",
    "GET /api/projects/:id",
    "POST /api/projects",
    "PUT /api/projects/:id",
    "DELETE /api/projects/:id",
    "GET /api/stats",
];

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning. No per-request mutable state
/// lives here; everything durable is in the database.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /api
/// ├── /health                 # Static liveness payload
/// ├── /message                # Legacy welcome-message demo
/// ├── /messages
/// ├── /db-status              # Database connectivity echo
/// ├── /tasks                  # Task CRUD (+ /:id/toggle convenience)
/// ├── /projects               # Project CRUD with cascade delete
/// └── /stats                  # Aggregate counts
/// ```
///
/// Unmatched paths fall through to a 404 envelope listing
/// [`AVAILABLE_ROUTES`].
///
/// # Middleware Stack
///
/// 1. Request/response tracing (tower-http TraceLayer)
/// 2. Permissive CORS (the presentation layer is served from a
///    different origin)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let api_routes = Router::new()
        .route("/health", get(routes::health::health_check))
        .route(
            "/message",
            get(routes::messages::get_message).post(routes::messages::create_message),
        )
        .route("/messages", get(routes::messages::list_messages))
        .route("/db-status", get(routes::db_status::db_status))
        .route(
            "/tasks",
            get(routes::tasks::list_tasks).post(routes::tasks::create_task),
        )
        .route(
            "/tasks/:id",
            get(routes::tasks::get_task)
                .put(routes::tasks::update_task)
                .delete(routes::tasks::delete_task),
        )
        .route("/tasks/:id/toggle", put(routes::tasks::toggle_task_status))
        .route(
            "/projects",
            get(routes::projects::list_projects).post(routes::projects::create_project),
        )
        .route(
            "/projects/:id",
            get(routes::projects::get_project)
                .put(routes::projects::update_project)
                .delete(routes::projects::delete_project),
        )
        .route("/stats", get(routes::stats::get_stats));

    Router::new()
        .nest("/api", api_routes)
        .fallback(route_not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// 404 fallback payload
#[derive(Debug, Serialize)]
struct RouteNotFoundResponse {
    success: bool,
    error: &'static str,
    path: String,
    available_routes: &'static [&'static str],
}

/// Fallback handler for unmatched routes
///
/// Returns a 404 envelope carrying the requested path and the route
/// catalog so a misdirected client can self-correct.
async fn route_not_found(uri: Uri) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(RouteNotFoundResponse {
            success: false,
            error: "Route not found",
            path: uri.path().to_string(),
            available_routes: AVAILABLE_ROUTES,
        }),
    )
        .into_response()
}
