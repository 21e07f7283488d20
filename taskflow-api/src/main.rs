//! # TaskFlow API Server
//!
//! REST backend for the TaskFlow tracker: task and project CRUD over
//! PostgreSQL, aggregate statistics, and the legacy welcome-message demo
//! endpoints.
//!
//! The server boots even when the database is unreachable or unmigrated;
//! individual endpoints degrade per their documented contracts instead of
//! the process refusing to start.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p taskflow-api
//! ```

use taskflow_api::{
    app::{build_router, AppState},
    config::Config,
};
use taskflow_shared::db::{
    migrations::get_migration_status,
    pool::{close_pool, create_pool, health_check, PoolConfig},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskflow_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "TaskFlow API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;
    tracing::info!(
        environment = %config.environment,
        db_host = %config.database.host,
        db_port = config.database.port,
        db_name = %config.database.name,
        "Configuration loaded"
    );

    let pool = create_pool(PoolConfig {
        url: config.database.url(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })?;

    // Startup probe, non-fatal: endpoints degrade per-route while the
    // database is down, so a failed probe is logged and ignored.
    match health_check(&pool).await {
        Ok(()) => {
            tracing::info!("Database connection verified");
            match get_migration_status(&pool).await {
                Ok(status) => tracing::info!(
                    applied_migrations = status.applied_migrations,
                    latest_version = ?status.latest_version,
                    "Migration status"
                ),
                Err(err) => tracing::warn!("Could not read migration status: {}", err),
            }
        }
        Err(err) => {
            tracing::warn!(
                db_host = %config.database.host,
                "Database unreachable at startup, continuing anyway: {}",
                err
            );
        }
    }

    let bind_address = config.bind_address();
    let state = AppState::new(pool.clone(), config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    close_pool(pool).await;
    tracing::info!("Shutdown complete");

    Ok(())
}

/// Resolves when the process receives ctrl-c or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Ctrl-c received, shutting down"),
        _ = terminate => tracing::info!("SIGTERM received, shutting down"),
    }
}
