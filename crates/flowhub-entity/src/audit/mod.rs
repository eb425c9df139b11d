//! Audit event data model.

pub mod body;
pub mod entry;
pub mod model;
pub mod scope;
pub mod trigger;
pub mod update;

pub use body::{Body, BodySlot};
pub use entry::{EntryScope, ExternalAuditEntry};
pub use model::{AuditEventRow, NewAuditEvent};
pub use scope::{AuditScope, ScopeType};
pub use trigger::{Trigger, TriggerType};
pub use update::{DiffKind, UpdateRecord};
