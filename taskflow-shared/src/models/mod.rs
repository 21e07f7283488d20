/// Database models for TaskFlow
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `project`: Projects grouping tasks, with derived task counts
/// - `task`: Tasks with the three-valued status enumeration
/// - `message`: Legacy welcome-message rows for the demo endpoints
/// - `stats`: Aggregate counts over tasks and projects
///
/// # Example
///
/// ```no_run
/// use taskflow_shared::models::task::{CreateTask, Task, TaskStatus};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let task = Task::create(&pool, CreateTask {
///     title: "Wire up CI".to_string(),
///     description: String::new(),
///     status: TaskStatus::Pending,
///     project_id: None,
/// }).await?;
/// # Ok(())
/// # }
/// ```
pub mod message;
pub mod project;
pub mod stats;
pub mod task;
