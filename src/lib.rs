//! FlowHub audit logging.
//!
//! Facade over the FlowHub crates: normalization engine, data model,
//! storage and the per-scope loggers.

pub use flowhub_audit as audit;
pub use flowhub_core as core;
pub use flowhub_database as database;
pub use flowhub_entity as entity;
pub use flowhub_service as service;

pub use flowhub_audit::{
    Actor, AuditEventSink, AuditValue, BodyBuilder, BodyInput, ErrorInput, LogEntryFormatter,
    Redactor, TriggerResolver, Updates,
};
pub use flowhub_core::{AppError, AppResult};
pub use flowhub_service::{AuditLogService, AuditLoggers, AuditRecorder};
