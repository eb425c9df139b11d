//! Audit log CLI commands.

use std::fs::File;
use std::io::BufWriter;
use std::sync::Arc;

use chrono::{Duration, Utc};
use clap::{Args, Subcommand, ValueEnum};
use serde::Serialize;
use tabled::Tabled;
use tracing::info;
use uuid::Uuid;

use crate::output::{self, OutputFormat};
use flowhub_audit::LogEntryFormatter;
use flowhub_core::error::AppError;
use flowhub_database::repositories::{AuditEventFilter, AuditEventRepository};
use flowhub_entity::audit::{ExternalAuditEntry, ScopeType};
use flowhub_service::AuditLogService;

/// Arguments for audit commands
#[derive(Debug, Args)]
pub struct AuditArgs {
    /// Audit subcommand
    #[command(subcommand)]
    pub command: AuditCommand,
}

/// Filters shared by `list` and `export`
#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Scope type (user, project, device, team, application, platform)
    #[arg(short, long)]
    pub scope: Option<ScopeType>,
    /// Id of the scoped entity
    #[arg(long)]
    pub scope_id: Option<String>,
    /// Exact event name (e.g. team.member.added)
    #[arg(short, long)]
    pub event: Option<String>,
    /// Only events from the last N days
    #[arg(short, long)]
    pub days: Option<i64>,
    /// Maximum number of events
    #[arg(short, long, default_value = "50")]
    pub limit: i64,
}

impl FilterArgs {
    fn to_filter(&self) -> AuditEventFilter {
        AuditEventFilter {
            scope_type: self.scope,
            scope_id: self.scope_id.clone(),
            event: self.event.clone(),
            since: self.days.map(|days| Utc::now() - Duration::days(days)),
            limit: self.limit,
        }
    }
}

/// Export file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

/// Audit subcommands
#[derive(Debug, Subcommand)]
pub enum AuditCommand {
    /// List audit events, newest first
    List(FilterArgs),
    /// Show one audit event
    Show {
        /// Event id
        id: Uuid,
    },
    /// Export audit events to a file
    Export {
        #[command(flatten)]
        filter: FilterArgs,
        /// Output file format
        #[arg(long, value_enum, default_value = "csv")]
        export_format: ExportFormat,
        /// Output file path
        #[arg(short, long, default_value = "audit_export.csv")]
        output: String,
    },
}

/// Audit display row
#[derive(Debug, Serialize, Tabled)]
struct AuditRow {
    /// Event id
    id: String,
    /// Time
    time: String,
    /// Event name
    event: String,
    /// Scope
    scope: String,
    /// Actor
    trigger: String,
}

impl From<&ExternalAuditEntry> for AuditRow {
    fn from(entry: &ExternalAuditEntry) -> Self {
        let scope = match &entry.scope.id {
            Some(id) => format!("{}:{id}", entry.scope.scope_type),
            None => entry.scope.scope_type.to_string(),
        };
        Self {
            id: entry.id.to_string(),
            time: entry.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            event: entry.event.clone(),
            scope,
            trigger: format!(
                "{} ({})",
                entry.trigger.name.as_deref().unwrap_or("unknown"),
                entry.trigger.trigger_type
            ),
        }
    }
}

/// Execute audit commands
pub async fn execute(
    args: &AuditArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let db = super::connect(&config).await?;
    let service = AuditLogService::new(
        Arc::new(AuditEventRepository::new(db.pool().clone())),
        LogEntryFormatter::from_config(&config.audit),
    );

    match &args.command {
        AuditCommand::List(filter) => {
            let entries = service.list(&filter.to_filter()).await?;
            match format {
                OutputFormat::Table => {
                    let rows: Vec<AuditRow> = entries.iter().map(AuditRow::from).collect();
                    output::print_list(&rows, format);
                }
                OutputFormat::Json => output::print_json(&entries),
            }
        }
        AuditCommand::Show { id } => {
            let entry = service.get(*id).await?;
            output::print_json(&entry);
        }
        AuditCommand::Export {
            filter,
            export_format,
            output: out_path,
        } => {
            let writer = BufWriter::new(File::create(out_path)?);
            let count = match export_format {
                ExportFormat::Csv => service.export_csv(&filter.to_filter(), writer).await?,
                ExportFormat::Json => {
                    let entries = service.list(&filter.to_filter()).await?;
                    serde_json::to_writer_pretty(writer, &entries)?;
                    entries.len()
                }
            };
            info!(path = %out_path, count, ?export_format, "Audit export written");
            output::print_success(&format!("Exported {count} audit events to '{out_path}'"));
        }
    }

    db.close().await;
    Ok(())
}
