//! # flowhub-service
//!
//! Audit logging services for FlowHub. The per-scope loggers turn domain
//! calls into normalized events and hand them to an [`AuditEventSink`];
//! [`AuditLogService`] serves the read path.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.
//!
//! [`AuditEventSink`]: flowhub_audit::AuditEventSink

pub mod audit;

pub use audit::{
    ApplicationAuditLogger, AuditLogService, AuditLoggers, AuditRecorder, DeviceAuditLogger,
    PlatformAuditLogger, ProjectAuditLogger, TeamAuditLogger, UserAuditLogger,
};
