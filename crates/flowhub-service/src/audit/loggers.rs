//! One entry point for every audit scope.

use std::sync::Arc;

use flowhub_audit::AuditEventSink;
use flowhub_core::config::audit::AuditConfig;

use super::{
    ApplicationAuditLogger, AuditRecorder, DeviceAuditLogger, PlatformAuditLogger,
    ProjectAuditLogger, TeamAuditLogger, UserAuditLogger,
};

/// The per-scope audit loggers, sharing one recorder.
///
/// ```ignore
/// loggers.team.member_added(&admin, None, &team, &user, 30).await;
/// ```
#[derive(Debug, Clone)]
pub struct AuditLoggers {
    pub platform: PlatformAuditLogger,
    pub user: UserAuditLogger,
    pub team: TeamAuditLogger,
    pub application: ApplicationAuditLogger,
    pub project: ProjectAuditLogger,
    pub device: DeviceAuditLogger,
}

impl AuditLoggers {
    /// Creates every logger around one recorder writing to `sink`.
    pub fn new(sink: Arc<dyn AuditEventSink>, config: &AuditConfig) -> Self {
        Self::from_recorder(Arc::new(AuditRecorder::new(sink, config)))
    }

    pub fn from_recorder(recorder: Arc<AuditRecorder>) -> Self {
        Self {
            platform: PlatformAuditLogger::new(recorder.clone()),
            user: UserAuditLogger::new(recorder.clone()),
            team: TeamAuditLogger::new(recorder.clone()),
            application: ApplicationAuditLogger::new(recorder.clone()),
            project: ProjectAuditLogger::new(recorder.clone()),
            device: DeviceAuditLogger::new(recorder),
        }
    }
}
