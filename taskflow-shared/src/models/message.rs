/// Legacy welcome-message model
///
/// The `welcome_messages` table predates the task/project domain and is
/// kept only for the health/message demo endpoints. Row 1 is treated as
/// the primary message.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE welcome_messages (
///     id SERIAL PRIMARY KEY,
///     message TEXT NOT NULL
/// );
/// ```
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// A row of the legacy welcome_messages table
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct WelcomeMessage {
    /// Sequential row ID
    pub id: i32,

    /// Message text
    pub message: String,
}

impl WelcomeMessage {
    /// Fetches the primary message (row id = 1), if present
    pub async fn find_primary(pool: &PgPool) -> Result<Option<String>, sqlx::Error> {
        let message: Option<(String,)> =
            sqlx::query_as("SELECT message FROM welcome_messages WHERE id = 1")
                .fetch_optional(pool)
                .await?;

        Ok(message.map(|(m,)| m))
    }

    /// Lists all messages ordered by ID
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let messages = sqlx::query_as::<_, WelcomeMessage>(
            "SELECT id, message FROM welcome_messages ORDER BY id",
        )
        .fetch_all(pool)
        .await?;

        Ok(messages)
    }

    /// Inserts a new message, returning the stored row
    pub async fn create(pool: &PgPool, message: &str) -> Result<Self, sqlx::Error> {
        let row = sqlx::query_as::<_, WelcomeMessage>(
            "INSERT INTO welcome_messages (message) VALUES ($1) RETURNING id, message",
        )
        .bind(message)
        .fetch_one(pool)
        .await?;

        Ok(row)
    }
}
