/// Database layer for TaskFlow
///
/// This module provides database connection pooling and the migration
/// runner. Models live in the `models` module at crate root level.
///
/// # Modules
///
/// - `pool`: lazily-connected PostgreSQL pool with health checks
/// - `migrations`: sqlx migration runner
///
/// # Example
///
/// ```no_run
/// use taskflow_shared::db::pool::{create_pool, PoolConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = PoolConfig {
///         url: std::env::var("DATABASE_URL")?,
///         ..Default::default()
///     };
///
///     let pool = create_pool(config)?;
///     Ok(())
/// }
/// ```
pub mod migrations;
pub mod pool;
