/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: static liveness payload
/// - `messages`: legacy welcome-message demo endpoints
/// - `db_status`: database connectivity echo
/// - `tasks`: task CRUD plus the toggle convenience
/// - `projects`: project CRUD with cascade delete
/// - `stats`: aggregate counts
pub mod db_status;
pub mod health;
pub mod messages;
pub mod projects;
pub mod stats;
pub mod tasks;
