//! Normalized actor of an audit event.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of actor performed an action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerType {
    /// The platform itself (trigger id `0`).
    System,
    /// A real user.
    User,
    /// No attributable actor.
    #[default]
    Unknown,
}

impl TriggerType {
    /// Return the trigger type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TriggerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// "Who performed this action", in the one shape every event uses.
///
/// `id` is a positive user id, `0` for the system actor, or `None` when
/// there is nothing stable to reference. Triggers are never stored on
/// their own: a trigger without an id is embedded into the event body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Trigger {
    /// Internal user id, `0` for the system actor.
    pub id: Option<i64>,
    /// Opaque external identifier.
    pub external_id: Option<String>,
    /// Actor category.
    #[serde(rename = "type")]
    pub trigger_type: TriggerType,
    /// Display name.
    pub name: Option<String>,
}

impl Trigger {
    /// The trigger used when no actor can be attributed.
    pub fn unknown() -> Self {
        Self {
            id: None,
            external_id: None,
            trigger_type: TriggerType::Unknown,
            name: Some("unknown".to_string()),
        }
    }

    /// Whether `id` can be stored as a foreign reference.
    pub fn has_storable_id(&self) -> bool {
        matches!(self.id, Some(id) if id >= 0)
    }
}
