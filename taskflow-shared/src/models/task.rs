/// Task model and database operations
///
/// Tasks are the core entity of TaskFlow. Each task optionally references
/// a project; the reference is not enforced by the store (no foreign key),
/// so cascade-on-delete is owned by the API layer (see
/// [`crate::models::project::Project::delete_with_tasks`]).
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title VARCHAR(255) NOT NULL,
///     description TEXT NOT NULL DEFAULT '',
///     status TEXT NOT NULL DEFAULT 'pending',
///     project_id UUID,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// The status column is free text in the store; the API boundary
/// constrains it to the closed [`TaskStatus`] enumeration and rejects
/// anything else at deserialization time.
///
/// # Example
///
/// ```no_run
/// use taskflow_shared::models::task::{CreateTask, Task, TaskStatus};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let task = Task::create(&pool, CreateTask {
///     title: "Provision staging database".to_string(),
///     description: String::new(),
///     status: TaskStatus::Pending,
///     project_id: None,
/// }).await?;
///
/// assert_eq!(task.status, TaskStatus::Pending);
/// # Ok(())
/// # }
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Error returned when a stored status string is not a recognized value
#[derive(Debug, thiserror::Error)]
#[error("unrecognized task status: {0:?}")]
pub struct ParseStatusError(pub String);

/// Task status
///
/// A closed three-valued enumeration. There is no state machine: any
/// status may be set to any other via update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task has not been started
    #[default]
    Pending,

    /// Task is being worked on
    InProgress,

    /// Task is done
    Completed,
}

impl TaskStatus {
    /// Converts status to its stored string form
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        }
    }

    /// Returns the status the convenience toggle flips to
    ///
    /// A completed task toggles back to pending; anything else (pending
    /// or in_progress) toggles to completed.
    pub fn toggled(&self) -> TaskStatus {
        match self {
            TaskStatus::Completed => TaskStatus::Pending,
            _ => TaskStatus::Completed,
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TaskStatus::Pending),
            "in_progress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

impl TryFrom<String> for TaskStatus {
    type Error = ParseStatusError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Task model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID (store-generated)
    pub id: Uuid,

    /// Task title
    pub title: String,

    /// Free-form description (defaults to empty)
    pub description: String,

    /// Current status
    #[sqlx(try_from = "String")]
    pub status: TaskStatus,

    /// Project this task belongs to (null = unassigned)
    pub project_id: Option<Uuid>,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Task joined with its project's name, for list and detail reads
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TaskWithProject {
    /// Unique task ID
    pub id: Uuid,

    /// Task title
    pub title: String,

    /// Free-form description
    pub description: String,

    /// Current status
    #[sqlx(try_from = "String")]
    pub status: TaskStatus,

    /// Project this task belongs to (null = unassigned)
    pub project_id: Option<Uuid>,

    /// Name of the referenced project (null if unassigned or the
    /// project no longer exists)
    pub project_name: Option<String>,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    /// Task title (required, non-empty)
    pub title: String,

    /// Description (defaults to empty)
    #[serde(default)]
    pub description: String,

    /// Initial status (defaults to pending)
    #[serde(default)]
    pub status: TaskStatus,

    /// Project to assign the task to
    #[serde(default)]
    pub project_id: Option<Uuid>,
}

/// Input for partially updating a task
///
/// Omitted fields retain their previous stored value (COALESCE
/// semantics), so the front-end can send minimal diffs such as a
/// status-only change without refetching the entity first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    /// New title
    pub title: Option<String>,

    /// New description
    pub description: Option<String>,

    /// New status
    pub status: Option<TaskStatus>,

    /// New project assignment
    ///
    /// COALESCE semantics mean this can reassign but not clear an
    /// existing assignment; that matches the baseline contract.
    pub project_id: Option<Uuid>,
}

impl Task {
    /// Creates a new task, returning the stored row
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, description, status, project_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, description, status, project_id, created_at, updated_at
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.status.as_str())
        .bind(data.project_id)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID, joined with its project name
    pub async fn find_by_id(
        pool: &PgPool,
        id: Uuid,
    ) -> Result<Option<TaskWithProject>, sqlx::Error> {
        let task = sqlx::query_as::<_, TaskWithProject>(
            r#"
            SELECT t.id, t.title, t.description, t.status, t.project_id,
                   p.name AS project_name, t.created_at, t.updated_at
            FROM tasks t
            LEFT JOIN projects p ON t.project_id = p.id
            WHERE t.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists all tasks joined with project names, newest-created first
    pub async fn list_with_projects(pool: &PgPool) -> Result<Vec<TaskWithProject>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, TaskWithProject>(
            r#"
            SELECT t.id, t.title, t.description, t.status, t.project_id,
                   p.name AS project_name, t.created_at, t.updated_at
            FROM tasks t
            LEFT JOIN projects p ON t.project_id = p.id
            ORDER BY t.created_at DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Lists all tasks belonging to one project, newest-created first
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, status, project_id, created_at, updated_at
            FROM tasks
            WHERE project_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(project_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Partially updates a task
    ///
    /// Unsupplied fields keep their stored value; `updated_at` is always
    /// refreshed. Returns `None` if no row matched the ID.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                status = COALESCE($4, status),
                project_id = COALESCE($5, project_id),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, description, status, project_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(data.title)
        .bind(data.description)
        .bind(data.status.map(|s| s.as_str()))
        .bind(data.project_id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Sets a task's status, refreshing `updated_at`
    ///
    /// Used by the toggle convenience endpoint. Returns `None` if no row
    /// matched the ID.
    pub async fn set_status(
        pool: &PgPool,
        id: Uuid,
        status: TaskStatus,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET status = $2,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, description, status, project_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Deletes a task, returning the deleted row
    ///
    /// Returns `None` if no row matched the ID.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            DELETE FROM tasks
            WHERE id = $1
            RETURNING id, title, description, status, project_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Deletes all tasks belonging to a project
    ///
    /// First step of the two-step project cascade delete. Returns the
    /// number of rows removed.
    pub async fn delete_by_project(pool: &PgPool, project_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE project_id = $1")
            .bind(project_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_status_as_str() {
        assert_eq!(TaskStatus::Pending.as_str(), "pending");
        assert_eq!(TaskStatus::InProgress.as_str(), "in_progress");
        assert_eq!(TaskStatus::Completed.as_str(), "completed");
    }

    #[test]
    fn test_task_status_parse() {
        assert_eq!("pending".parse::<TaskStatus>().unwrap(), TaskStatus::Pending);
        assert_eq!(
            "in_progress".parse::<TaskStatus>().unwrap(),
            TaskStatus::InProgress
        );
        assert_eq!(
            "completed".parse::<TaskStatus>().unwrap(),
            TaskStatus::Completed
        );
        assert!("done".parse::<TaskStatus>().is_err());
        assert!("".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn test_task_status_default_is_pending() {
        assert_eq!(TaskStatus::default(), TaskStatus::Pending);
    }

    #[test]
    fn test_task_status_toggled() {
        assert_eq!(TaskStatus::Completed.toggled(), TaskStatus::Pending);
        assert_eq!(TaskStatus::Pending.toggled(), TaskStatus::Completed);
        // A task parked in_progress toggles to completed.
        assert_eq!(TaskStatus::InProgress.toggled(), TaskStatus::Completed);
    }

    #[test]
    fn test_task_status_toggle_twice_round_trips() {
        assert_eq!(TaskStatus::Pending.toggled().toggled(), TaskStatus::Pending);
        assert_eq!(
            TaskStatus::Completed.toggled().toggled(),
            TaskStatus::Completed
        );
    }

    #[test]
    fn test_task_status_serde() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        let parsed: TaskStatus = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(parsed, TaskStatus::Completed);

        // Out-of-enum values are rejected at the API boundary.
        assert!(serde_json::from_str::<TaskStatus>("\"archived\"").is_err());
    }

    #[test]
    fn test_create_task_defaults() {
        let data: CreateTask = serde_json::from_str(r#"{"title": "Write docs"}"#).unwrap();
        assert_eq!(data.title, "Write docs");
        assert_eq!(data.description, "");
        assert_eq!(data.status, TaskStatus::Pending);
        assert_eq!(data.project_id, None);
    }

    #[test]
    fn test_update_task_omitted_fields_are_none() {
        let data: UpdateTask = serde_json::from_str(r#"{"status": "completed"}"#).unwrap();
        assert_eq!(data.title, None);
        assert_eq!(data.description, None);
        assert_eq!(data.status, Some(TaskStatus::Completed));
        assert_eq!(data.project_id, None);
    }
}
