//! Application, pipeline and pipeline stage models.

use serde::{Deserialize, Serialize};

/// An application grouping instances and devices.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    /// Internal application id.
    pub id: i64,
    /// Public application identifier.
    pub external_id: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// Owning team id.
    pub team_id: Option<i64>,
}

/// A deployment pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pipeline {
    /// Pipeline id.
    pub id: String,
    /// Display name.
    pub name: Option<String>,
    /// Owning application id.
    pub application_id: Option<i64>,
}

/// One stage of a pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineStage {
    /// Stage id.
    pub id: String,
    /// Display name.
    pub name: Option<String>,
    /// The next stage, if any.
    pub next_stage_id: Option<String>,
    /// Deploy action (`create_snapshot`, `use_latest_snapshot`, ...).
    pub action: Option<String>,
}
