//! Canonical audit event body.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use flowhub_core::AppError;

/// The fixed vocabulary of body slot names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodySlot {
    Team,
    Application,
    Project,
    SourceProject,
    TargetProject,
    Device,
    SourceDevice,
    TargetDevice,
    User,
    Stack,
    BillingSession,
    Subscription,
    License,
    Updates,
    Snapshot,
    Pipeline,
    PipelineStage,
    PipelineStageTarget,
    Role,
    ProjectType,
    Info,
    DeviceGroup,
    Interval,
    Threshold,
    Error,
    Trigger,
    Context,
    FlowsSet,
}

impl BodySlot {
    /// Every slot, in canonical body order.
    pub const ALL: [BodySlot; 28] = [
        Self::Team,
        Self::Application,
        Self::Project,
        Self::SourceProject,
        Self::TargetProject,
        Self::Device,
        Self::SourceDevice,
        Self::TargetDevice,
        Self::User,
        Self::Stack,
        Self::BillingSession,
        Self::Subscription,
        Self::License,
        Self::Updates,
        Self::Snapshot,
        Self::Pipeline,
        Self::PipelineStage,
        Self::PipelineStageTarget,
        Self::Role,
        Self::ProjectType,
        Self::Info,
        Self::DeviceGroup,
        Self::Interval,
        Self::Threshold,
        Self::Error,
        Self::Trigger,
        Self::Context,
        Self::FlowsSet,
    ];

    /// Return the slot's key as written into the body.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Team => "team",
            Self::Application => "application",
            Self::Project => "project",
            Self::SourceProject => "sourceProject",
            Self::TargetProject => "targetProject",
            Self::Device => "device",
            Self::SourceDevice => "sourceDevice",
            Self::TargetDevice => "targetDevice",
            Self::User => "user",
            Self::Stack => "stack",
            Self::BillingSession => "billingSession",
            Self::Subscription => "subscription",
            Self::License => "license",
            Self::Updates => "updates",
            Self::Snapshot => "snapshot",
            Self::Pipeline => "pipeline",
            Self::PipelineStage => "pipelineStage",
            Self::PipelineStageTarget => "pipelineStageTarget",
            Self::Role => "role",
            Self::ProjectType => "projectType",
            Self::Info => "info",
            Self::DeviceGroup => "deviceGroup",
            Self::Interval => "interval",
            Self::Threshold => "threshold",
            Self::Error => "error",
            Self::Trigger => "trigger",
            Self::Context => "context",
            Self::FlowsSet => "flowsSet",
        }
    }
}

impl fmt::Display for BodySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BodySlot {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|slot| slot.as_str() == s)
            .ok_or_else(|| AppError::validation(format!("Unknown body slot: '{s}'")))
    }
}

/// Structured payload of an audit event.
///
/// A slot is present only when it has a value: [`Body::insert`] refuses
/// `null`, so a serialized body never contains a `null`-valued key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Body(Map<String, Value>);

impl Body {
    /// Create an empty body.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a slot. `null` values are ignored.
    pub fn insert(&mut self, slot: BodySlot, value: Value) {
        if !value.is_null() {
            self.0.insert(slot.as_str().to_string(), value);
        }
    }

    /// Remove a slot, returning its value.
    pub fn remove(&mut self, slot: BodySlot) -> Option<Value> {
        self.0.shift_remove(slot.as_str())
    }

    /// Read a slot.
    pub fn get(&self, slot: BodySlot) -> Option<&Value> {
        self.0.get(slot.as_str())
    }

    /// Mutable access to a slot.
    pub fn get_mut(&mut self, slot: BodySlot) -> Option<&mut Value> {
        self.0.get_mut(slot.as_str())
    }

    /// Whether a slot is present.
    pub fn contains(&self, slot: BodySlot) -> bool {
        self.0.contains_key(slot.as_str())
    }

    /// Number of populated slots.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no slot is populated.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the populated entries in insertion order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&String, &mut Value)> {
        self.0.iter_mut()
    }

    /// Borrow the underlying JSON object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Convert into a JSON value.
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}
