//! Issue tracker - HTTP API server and database tooling.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use common::ServerConfig;
use gateway_lib::config::GatewayConfig;
use gateway_lib::MigrationAction;

#[derive(Parser)]
#[command(name = "issue-tracker")]
#[command(author, version, about = "Issue tracker backend", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Host to bind to (overrides SERVER_HOST)
        #[arg(short = 'H', long)]
        host: Option<String>,
        /// Port to listen on (overrides SERVER_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
}

#[derive(Subcommand, Clone, Copy)]
enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset and re-run all migrations
    Fresh,
}

impl From<MigrateAction> for MigrationAction {
    fn from(action: MigrateAction) -> Self {
        match action {
            MigrateAction::Up => MigrationAction::Up,
            MigrateAction::Down => MigrationAction::Down,
            MigrateAction::Status => MigrationAction::Status,
            MigrateAction::Fresh => MigrationAction::Fresh,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = GatewayConfig::from_env()?;

    match cli.command {
        Commands::Serve { host, port } => {
            let server = ServerConfig {
                host: host.unwrap_or_else(|| config.server.host.clone()),
                port: port.unwrap_or(config.server.port),
            };
            gateway_lib::run_server(config, server).await?;
        }
        Commands::Migrate { action } => {
            gateway_lib::run_migrations(config, action.into()).await?;
        }
    }

    Ok(())
}
