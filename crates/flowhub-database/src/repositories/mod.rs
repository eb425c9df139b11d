//! Repository implementations.

pub mod audit;

pub use audit::{AuditEventFilter, AuditEventRepository};
