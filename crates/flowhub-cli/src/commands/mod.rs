//! CLI command definitions and dispatch.

pub mod audit;
pub mod migrate;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use flowhub_core::config::AppConfig;
use flowhub_core::error::AppError;
use flowhub_database::DatabasePool;

/// FlowHub audit log administration
#[derive(Debug, Parser)]
#[command(name = "flowhub", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Audit log
    Audit(audit::AuditArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &self.config).await,
            Commands::Audit(args) => audit::execute(args, &self.config, self.format).await,
        }
    }
}

/// Load configuration from file
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(config_path)
}

/// Connect to the database configured in `config`
pub async fn connect(config: &AppConfig) -> Result<DatabasePool, AppError> {
    DatabasePool::connect(&config.database).await
}
