/// Project model and database operations
///
/// Projects group tasks. The `task_count` surfaced on list reads is
/// derived (LEFT JOIN + COUNT), never stored.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE projects (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(255) NOT NULL,
///     description TEXT NOT NULL DEFAULT '',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskflow_shared::models::project::{CreateProject, Project};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let project = Project::create(&pool, CreateProject {
///     name: "Infrastructure".to_string(),
///     description: String::new(),
/// }).await?;
///
/// // Cascade: removes the project's tasks first, then the project.
/// let deleted = Project::delete_with_tasks(&pool, project.id).await?;
/// assert!(deleted.is_some());
/// # Ok(())
/// # }
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::models::task::Task;

/// Project model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    /// Unique project ID (store-generated)
    pub id: Uuid,

    /// Project name
    pub name: String,

    /// Free-form description (defaults to empty)
    pub description: String,

    /// When the project was created
    pub created_at: DateTime<Utc>,

    /// When the project was last updated
    pub updated_at: DateTime<Utc>,
}

/// Project with its derived task count, for list reads
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProjectWithTaskCount {
    /// Unique project ID
    pub id: Uuid,

    /// Project name
    pub name: String,

    /// Free-form description
    pub description: String,

    /// Number of tasks referencing this project
    pub task_count: i64,

    /// When the project was created
    pub created_at: DateTime<Utc>,

    /// When the project was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProject {
    /// Project name (required, non-empty)
    pub name: String,

    /// Description (defaults to empty)
    #[serde(default)]
    pub description: String,
}

/// Input for partially updating a project
///
/// Omitted fields retain their previous stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProject {
    /// New name
    pub name: Option<String>,

    /// New description
    pub description: Option<String>,
}

impl Project {
    /// Creates a new project, returning the stored row
    pub async fn create(pool: &PgPool, data: CreateProject) -> Result<Self, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description, created_at, updated_at
            "#,
        )
        .bind(data.name)
        .bind(data.description)
        .fetch_one(pool)
        .await?;

        Ok(project)
    }

    /// Finds a project by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(project)
    }

    /// Lists all projects with their task counts, newest-created first
    pub async fn list_with_task_counts(
        pool: &PgPool,
    ) -> Result<Vec<ProjectWithTaskCount>, sqlx::Error> {
        let projects = sqlx::query_as::<_, ProjectWithTaskCount>(
            r#"
            SELECT p.id, p.name, p.description,
                   COUNT(t.id) AS task_count,
                   p.created_at, p.updated_at
            FROM projects p
            LEFT JOIN tasks t ON t.project_id = p.id
            GROUP BY p.id
            ORDER BY p.created_at DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(projects)
    }

    /// Partially updates a project
    ///
    /// Unsupplied fields keep their stored value; `updated_at` is always
    /// refreshed. Returns `None` if no row matched the ID.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateProject,
    ) -> Result<Option<Self>, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, description, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(data.name)
        .bind(data.description)
        .fetch_optional(pool)
        .await?;

        Ok(project)
    }

    /// Deletes a project and all tasks referencing it
    ///
    /// Two sequential statements, not a transaction: dependent tasks are
    /// removed first, then the project row. Ordering guarantees a deleted
    /// project can never leave orphaned tasks behind; the inverse (tasks
    /// deleted, project row still present after a crash in between) is the
    /// accepted baseline risk.
    ///
    /// Returns the deleted project row, or `None` if no row matched.
    pub async fn delete_with_tasks(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let removed_tasks = Task::delete_by_project(pool, id).await?;
        debug!(project_id = %id, removed_tasks, "Removed dependent tasks");

        let project = sqlx::query_as::<_, Project>(
            r#"
            DELETE FROM projects
            WHERE id = $1
            RETURNING id, name, description, created_at, updated_at
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(project)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_project_default_description() {
        let data: CreateProject = serde_json::from_str(r#"{"name": "Infra"}"#).unwrap();
        assert_eq!(data.name, "Infra");
        assert_eq!(data.description, "");
    }

    #[test]
    fn test_update_project_omitted_fields_are_none() {
        let data: UpdateProject = serde_json::from_str(r#"{"description": "new"}"#).unwrap();
        assert_eq!(data.name, None);
        assert_eq!(data.description, Some("new".to_string()));
    }

    // Cascade-delete behavior is covered by the integration tests in
    // tests/, which require a running database.
}
