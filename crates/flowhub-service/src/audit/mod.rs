//! Audit event recording and querying.

pub mod application;
pub mod device;
pub mod loggers;
pub mod platform;
pub mod project;
pub mod query;
pub mod recorder;
pub mod team;
pub mod user;

pub use application::ApplicationAuditLogger;
pub use device::DeviceAuditLogger;
pub use loggers::AuditLoggers;
pub use platform::PlatformAuditLogger;
pub use project::ProjectAuditLogger;
pub use query::AuditLogService;
pub use recorder::AuditRecorder;
pub use team::TeamAuditLogger;
pub use user::UserAuditLogger;
