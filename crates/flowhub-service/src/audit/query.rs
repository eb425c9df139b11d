//! Audit read path: stored rows to external entries.

use std::io::Write;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use flowhub_audit::LogEntryFormatter;
use flowhub_audit::export::write_csv;
use flowhub_core::error::AppError;
use flowhub_database::repositories::{AuditEventFilter, AuditEventRepository};
use flowhub_entity::audit::ExternalAuditEntry;

/// Lists and exports audit events in their external shape.
#[derive(Debug, Clone)]
pub struct AuditLogService {
    audit_repo: Arc<AuditEventRepository>,
    formatter: LogEntryFormatter,
}

impl AuditLogService {
    pub fn new(audit_repo: Arc<AuditEventRepository>, formatter: LogEntryFormatter) -> Self {
        Self {
            audit_repo,
            formatter,
        }
    }

    /// Fetches one event.
    pub async fn get(&self, id: Uuid) -> Result<ExternalAuditEntry, AppError> {
        let row = self
            .audit_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Audit event {id} not found")))?;
        Ok(self.formatter.reconstruct(&row, None))
    }

    /// Lists events matching `filter`, newest first.
    pub async fn list(&self, filter: &AuditEventFilter) -> Result<Vec<ExternalAuditEntry>, AppError> {
        let rows = self.audit_repo.list(filter).await?;
        Ok(self.formatter.reconstruct_all(&rows, |_| None))
    }

    /// Lists every event recorded at or after `since`, oldest first.
    pub async fn since(&self, since: DateTime<Utc>) -> Result<Vec<ExternalAuditEntry>, AppError> {
        let rows = self.audit_repo.find_since(since).await?;
        Ok(self.formatter.reconstruct_all(&rows, |_| None))
    }

    /// Writes the events matching `filter` as CSV.
    pub async fn export_csv<W: Write>(
        &self,
        filter: &AuditEventFilter,
        writer: W,
    ) -> Result<usize, AppError> {
        let entries = self.list(filter).await?;
        write_csv(&entries, writer)?;
        Ok(entries.len())
    }
}
