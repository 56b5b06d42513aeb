//! Issue tracker HTTP gateway.
//!
//! Wires the auth and issue services to an Axum router, owns the database
//! connection and the schema migrations.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod infra;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use std::net::SocketAddr;

use tracing::info;

use auth_service::build_auth_service;
use common::{AppError, AppResult, ServerConfig};
use issue_service::build_issue_service;

use crate::config::GatewayConfig;
use crate::infra::Database;
use crate::routes::create_router;
use crate::state::AppState;

/// Migration actions exposed by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Connect, apply pending migrations and serve HTTP until shutdown.
pub async fn run_server(config: GatewayConfig, server: ServerConfig) -> AppResult<()> {
    let db = Database::connect(&config.database).await?;
    db.run_migrations().await?;
    info!("Migrations applied");

    let connection = db.get_connection();
    let state = AppState::new(
        build_auth_service(connection.clone(), &config.auth),
        build_issue_service(connection.clone()),
        connection,
    );

    let app = create_router(state);

    let addr: SocketAddr = server
        .addr()
        .parse()
        .map_err(|e| AppError::internal(format!("Invalid listen address {}: {}", server.addr(), e)))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("Issue tracker listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))
}

/// Run a migration action against the configured database.
pub async fn run_migrations(config: GatewayConfig, action: MigrationAction) -> AppResult<()> {
    let db = Database::connect(&config.database).await?;

    match action {
        MigrationAction::Up => {
            info!("Running pending migrations...");
            db.run_migrations().await?;
            info!("Migrations completed successfully");
        }
        MigrationAction::Down => {
            info!("Rolling back last migration...");
            db.rollback_migration().await?;
            info!("Rollback completed successfully");
        }
        MigrationAction::Status => {
            for (name, applied) in db.migration_status().await? {
                let status = if applied { "applied" } else { "pending" };
                println!("{}: {}", name, status);
            }
        }
        MigrationAction::Fresh => {
            tracing::warn!("Resetting database and running all migrations...");
            db.fresh_migrations().await?;
            info!("Fresh migrations completed successfully");
        }
    }

    Ok(())
}
