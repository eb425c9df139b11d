//! # flowhub-database
//!
//! PostgreSQL connection management, migrations and the audit event
//! repository backing the audit storage sink.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::AuditEventRepository;
