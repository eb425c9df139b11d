//! Hosted instance, stack, instance type and snapshot models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A hosted instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Instance id.
    pub id: Uuid,
    /// Display name.
    pub name: Option<String>,
    /// Public URL of the running instance.
    pub url: Option<String>,
    /// Lifecycle state (`running`, `suspended`, ...).
    pub state: Option<String>,
    /// Owning team id.
    pub team_id: Option<i64>,
    /// Owning application id.
    pub application_id: Option<i64>,
    /// Creation time.
    pub created_at: Option<DateTime<Utc>>,
}

/// A runtime stack an instance can run on.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stack {
    /// Stack id.
    pub id: String,
    /// Display name.
    pub name: Option<String>,
    /// Whether the stack can be selected for new instances.
    #[serde(default)]
    pub active: bool,
}

/// A billing/instance type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectType {
    /// Type id.
    pub id: String,
    /// Display name.
    pub name: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
}

/// A point-in-time capture of flows and settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Internal snapshot id.
    pub id: i64,
    /// Public snapshot identifier.
    pub external_id: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// Creation time.
    pub created_at: Option<DateTime<Utc>>,
}
