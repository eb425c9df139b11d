//! Database migration commands.

use clap::{Args, Subcommand};

use crate::output;
use flowhub_core::error::AppError;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
    /// Check that the database is reachable
    Check,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, config_path: &str) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let db = super::connect(&config).await?;

    match &args.command {
        MigrateCommand::Run => {
            flowhub_database::migration::run_migrations(db.pool()).await?;
            output::print_success("All migrations applied successfully.");
        }
        MigrateCommand::Check => {
            if db.health_check().await? {
                output::print_success("Database is reachable.");
            } else {
                output::print_warning("Database answered unexpectedly.");
            }
        }
    }

    db.close().await;
    Ok(())
}
