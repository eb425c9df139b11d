//! Field-level change records.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use flowhub_core::AppError;

/// Classification of a single field-level change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffKind {
    /// The path exists only after the change.
    Created,
    /// The path exists on both sides with different values.
    #[default]
    Updated,
    /// The path exists only before the change.
    Deleted,
    /// The path holds the same value on both sides. Never persisted.
    Unchanged,
}

impl DiffKind {
    /// Return the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
            Self::Unchanged => "unchanged",
        }
    }
}

impl fmt::Display for DiffKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiffKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" => Ok(Self::Created),
            "updated" => Ok(Self::Updated),
            "deleted" => Ok(Self::Deleted),
            "unchanged" => Ok(Self::Unchanged),
            _ => Err(AppError::invalid_argument(format!(
                "Invalid diff kind: '{s}'. Expected one of: created, updated, deleted, unchanged"
            ))),
        }
    }
}

/// One changed field, keyed by its flattened path (`settings.env[0].name`).
///
/// `old`/`new` are `None` when the path is absent on that side, which is
/// distinct from `Some(Value::Null)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecord {
    /// Flattened path of the field.
    pub key: String,
    /// Value before the change.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "present")]
    pub old: Option<serde_json::Value>,
    /// Value after the change.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "present")]
    pub new: Option<serde_json::Value>,
    /// Change classification.
    #[serde(default)]
    pub diff_kind: DiffKind,
}

impl UpdateRecord {
    /// Create a new update record.
    pub fn new(
        key: impl Into<String>,
        old: Option<serde_json::Value>,
        new: Option<serde_json::Value>,
        diff_kind: DiffKind,
    ) -> Self {
        Self {
            key: key.into(),
            old,
            new,
            diff_kind,
        }
    }
}

/// Keeps an explicit `null` as `Some(Value::Null)`.
fn present<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}
