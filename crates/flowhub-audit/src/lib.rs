//! # flowhub-audit
//!
//! The audit-event normalization engine. Turns partially-populated domain
//! objects and actor references into canonical, redacted, diffable event
//! bodies, and rebuilds the external view of stored events.
//!
//! Everything here is synchronous and free of shared mutable state; the
//! only asynchronous boundary is the [`AuditEventSink`] trait, which the
//! database crate implements.

pub mod body;
pub mod diff;
pub mod export;
pub mod format;
pub mod reconstruct;
pub mod redact;
pub mod sink;
pub mod trigger;
pub mod updates;
pub mod value;

pub use body::{BodyBuilder, BodyInput};
pub use diff::diff;
pub use format::{EntityKind, ErrorInput};
pub use reconstruct::LogEntryFormatter;
pub use redact::Redactor;
pub use sink::AuditEventSink;
pub use trigger::{Actor, TriggerResolver};
pub use updates::{Updates, UpdatesInput};
pub use value::AuditValue;
