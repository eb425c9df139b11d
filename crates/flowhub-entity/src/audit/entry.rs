//! Audit entry shape exposed to API and export consumers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::body::Body;
use super::scope::ScopeType;
use super::trigger::Trigger;

/// Scope reference of an external entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryScope {
    /// Scoped entity id.
    pub id: Option<String>,
    /// Scope category.
    #[serde(rename = "type")]
    pub scope_type: ScopeType,
}

/// A reconstructed audit entry in its canonical external shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalAuditEntry {
    /// Event identifier.
    pub id: Uuid,
    /// Dotted event name.
    pub event: String,
    /// When the event was recorded.
    pub created_at: DateTime<Utc>,
    /// Where the event is filed.
    pub scope: EntryScope,
    /// Who performed the action.
    pub trigger: Trigger,
    /// Canonical body.
    pub body: Body,
    /// Legacy display-name field, mirrors the trigger name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}
