//! Audit event entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::body::Body;
use super::scope::{AuditScope, ScopeType};

/// A stored audit event row.
///
/// `body` holds the serialized JSON text exactly as written; parsing is
/// left to the read path so that a single malformed row cannot fail a
/// whole query.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AuditEventRow {
    /// Unique event identifier.
    pub id: Uuid,
    /// The acting user, `0` for the platform, `NULL` when unattributable.
    pub actor_id: Option<i64>,
    /// Dotted event name (e.g., `"team.member.added"`).
    pub event: String,
    /// The scope category.
    pub scope_type: ScopeType,
    /// The scoped entity id.
    pub scope_id: Option<String>,
    /// Serialized body.
    pub body: Option<String>,
    /// When the event was recorded.
    pub created_at: DateTime<Utc>,
}

/// Data required to record a new audit event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAuditEvent {
    /// Where the event is filed.
    pub scope: AuditScope,
    /// The acting user id, if storable.
    pub actor_id: Option<i64>,
    /// Dotted event name.
    pub event: String,
    /// Canonical body.
    pub body: Body,
}
