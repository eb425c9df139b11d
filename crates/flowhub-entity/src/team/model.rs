//! Team entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A team: the tenant that owns applications, instances and devices.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    /// Internal team id.
    pub id: i64,
    /// Public team identifier.
    pub external_id: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// URL slug.
    pub slug: Option<String>,
    /// Team type name.
    #[serde(rename = "type")]
    pub team_type: Option<String>,
    /// Creation time.
    pub created_at: Option<DateTime<Utc>>,
}
