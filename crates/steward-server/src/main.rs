//! Steward server — application entry point.

mod config;

use std::process::ExitCode;
use std::sync::Arc;

use chrono::Local;
use steward_core::error::{StewardError, StewardResult};
use steward_core::registry::RoleRegistry;
use steward_core::services::EventService;
use steward_db::DbManager;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;

use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> ExitCode {
    let default_directive: Directive = match "steward=info".parse() {
        Ok(directive) => directive,
        Err(e) => {
            eprintln!("invalid log directive: {e}");
            return ExitCode::FAILURE;
        }
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(default_directive))
        .json()
        .init();

    info!("Starting Steward server...");

    match run().await {
        Ok(()) => {
            info!("Steward server stopped.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Steward server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> StewardResult<()> {
    let config = ServerConfig::from_env()?;
    steward_auth::check_verification_key(&config.auth)
        .map_err(|e| StewardError::validation("STEWARD_JWT_PUBLIC_KEY", e.to_string()))?;
    info!(issuer = %config.auth.jwt_issuer, "Identity-token verification configured");

    let registry = Arc::new(load_registry(&config)?);
    info!(
        version = registry.version(),
        roles = registry.roles().count(),
        "Role registry loaded"
    );

    let db = DbManager::connect(&config.db).await?;

    let events = EventService::new(db.events(), Arc::clone(&registry), config.limits);

    let this_week = events.week_events(Local::now().date_naive()).await?;
    info!(events = this_week.len(), "Events scheduled this week");

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| StewardError::Internal(format!("signal handler: {e}")))?;
    info!("Shutdown signal received");
    Ok(())
}

fn load_registry(config: &ServerConfig) -> StewardResult<RoleRegistry> {
    let Some(path) = &config.roles_file else {
        return Ok(RoleRegistry::builtin());
    };
    let json = std::fs::read_to_string(path).map_err(|e| {
        StewardError::validation("STEWARD_ROLES_FILE", format!("{}: {e}", path.display()))
    })?;
    RoleRegistry::from_json(&json)
}
