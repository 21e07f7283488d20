/// Aggregate statistics over tasks and projects
///
/// A single aggregate query produces one conditional count per task
/// status, a total, and a subquery count of projects. Callers that want
/// the API's explicit never-fail contract use [`StatsSummary::zeroed`]
/// as the fallback when the query errors.
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Derived counts reported by the stats endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct StatsSummary {
    /// Total number of tasks
    pub total_tasks: i64,

    /// Tasks with status 'pending'
    pub pending_tasks: i64,

    /// Tasks with status 'in_progress'
    pub in_progress_tasks: i64,

    /// Tasks with status 'completed'
    pub completed_tasks: i64,

    /// Total number of projects
    pub total_projects: i64,
}

impl StatsSummary {
    /// All-zero summary, used as the fallback when the store is
    /// unreachable or unmigrated
    pub fn zeroed() -> Self {
        Self::default()
    }

    /// Computes the summary in one round-trip
    pub async fn fetch(pool: &PgPool) -> Result<Self, sqlx::Error> {
        let summary = sqlx::query_as::<_, StatsSummary>(
            r#"
            SELECT
                COUNT(*) AS total_tasks,
                COUNT(*) FILTER (WHERE status = 'pending') AS pending_tasks,
                COUNT(*) FILTER (WHERE status = 'in_progress') AS in_progress_tasks,
                COUNT(*) FILTER (WHERE status = 'completed') AS completed_tasks,
                (SELECT COUNT(*) FROM projects) AS total_projects
            FROM tasks
            "#,
        )
        .fetch_one(pool)
        .await?;

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeroed_summary() {
        let summary = StatsSummary::zeroed();
        assert_eq!(summary.total_tasks, 0);
        assert_eq!(summary.pending_tasks, 0);
        assert_eq!(summary.in_progress_tasks, 0);
        assert_eq!(summary.completed_tasks, 0);
        assert_eq!(summary.total_projects, 0);
    }

    #[test]
    fn test_summary_serialization_shape() {
        let summary = StatsSummary {
            total_tasks: 3,
            pending_tasks: 2,
            in_progress_tasks: 0,
            completed_tasks: 1,
            total_projects: 1,
        };

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["total_tasks"], 3);
        assert_eq!(json["pending_tasks"], 2);
        assert_eq!(json["in_progress_tasks"], 0);
        assert_eq!(json["completed_tasks"], 1);
        assert_eq!(json["total_projects"], 1);
    }
}
