//! Remote device and device group models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A remote device running flows outside the platform.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    /// Internal device id.
    pub id: i64,
    /// Public device identifier.
    pub external_id: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Hardware or deployment type label.
    #[serde(rename = "type")]
    pub device_type: Option<String>,
    /// Last reported state.
    pub state: Option<String>,
    /// Provisioning credential; never serialized.
    #[serde(skip_serializing, default)]
    pub credential_secret: Option<String>,
    /// Last check-in time.
    pub last_seen_at: Option<DateTime<Utc>>,
}

/// A named group of devices within an application.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceGroup {
    /// Internal group id.
    pub id: i64,
    /// Public group identifier.
    pub external_id: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
}
