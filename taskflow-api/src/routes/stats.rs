/// Aggregate statistics endpoint
///
/// # Endpoint
///
/// ```text
/// GET /api/stats
/// ```
///
/// # Response
///
/// ```json
/// {
///   "success": true,
///   "stats": {
///     "total_tasks": 3,
///     "pending_tasks": 2,
///     "in_progress_tasks": 0,
///     "completed_tasks": 1,
///     "total_projects": 1
///   }
/// }
/// ```
///
/// This endpoint never fails: any store error (including unmigrated
/// tables) falls back to an all-zero summary so the dashboard always has
/// something to render.
use crate::app::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use taskflow_shared::models::stats::StatsSummary;

/// Stats response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    /// Always true
    pub success: bool,

    /// Derived counts
    pub stats: StatsSummary,
}

/// Stats handler
pub async fn get_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = match StatsSummary::fetch(&state.db).await {
        Ok(summary) => summary,
        Err(err) => {
            tracing::warn!("Stats query failed, returning zeroed summary: {}", err);
            StatsSummary::zeroed()
        }
    };

    Json(StatsResponse {
        success: true,
        stats,
    })
}
