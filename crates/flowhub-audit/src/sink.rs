//! Storage boundary for audit events.

use async_trait::async_trait;

use flowhub_core::AppResult;
use flowhub_entity::audit::NewAuditEvent;

/// Persists normalized audit events.
///
/// Implementations must not retry; callers treat a failed write as lost
/// and only log it.
#[async_trait]
pub trait AuditEventSink: Send + Sync {
    /// Persist one event.
    async fn record(&self, event: NewAuditEvent) -> AppResult<()>;
}
