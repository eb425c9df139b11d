//! Canonical body construction.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

use flowhub_core::config::audit::AuditConfig;
use flowhub_entity::audit::{Body, BodySlot, UpdateRecord};

use crate::format::{EntityKind, ErrorInput, error_object, info_object, license_object, role_object};
use crate::redact::Redactor;
use crate::updates::UpdatesInput;

/// The optional named inputs of a body.
///
/// Entity setters accept any serializable domain object; the builder
/// projects it down to the slot's public shape. Unset slots, and slots
/// whose value does not qualify, are left out of the body.
#[derive(Debug, Clone, Default)]
pub struct BodyInput {
    values: HashMap<BodySlot, Value>,
    updates: Option<UpdatesInput>,
    error: Option<ErrorInput>,
}

macro_rules! entity_setters {
    ($($(#[$doc:meta])* $name:ident => $slot:ident,)*) => {
        $(
            $(#[$doc])*
            pub fn $name(self, entity: &impl Serialize) -> Self {
                self.with_entity(BodySlot::$slot, entity)
            }
        )*
    };
}

impl BodyInput {
    /// Create an empty input.
    pub fn new() -> Self {
        Self::default()
    }

    entity_setters! {
        /// Set the team slot.
        team => Team,
        /// Set the application slot.
        application => Application,
        /// Set the instance slot.
        project => Project,
        /// Set the copy/import source instance.
        source_project => SourceProject,
        /// Set the copy/import target instance.
        target_project => TargetProject,
        /// Set the device slot.
        device => Device,
        /// Set the source device of a deployment.
        source_device => SourceDevice,
        /// Set the target device of a deployment.
        target_device => TargetDevice,
        /// Set the user slot (the user acted upon, not the actor).
        user => User,
        /// Set the stack slot.
        stack => Stack,
        /// Set the snapshot slot.
        snapshot => Snapshot,
        /// Set the pipeline slot.
        pipeline => Pipeline,
        /// Set the pipeline stage slot.
        pipeline_stage => PipelineStage,
        /// Set the deployment target of a pipeline stage.
        pipeline_stage_target => PipelineStageTarget,
        /// Set the instance type slot.
        project_type => ProjectType,
        /// Set the device group slot.
        device_group => DeviceGroup,
        /// Set the billing session slot.
        billing_session => BillingSession,
        /// Set the subscription slot.
        subscription => Subscription,
    }

    /// Set a slot from any serializable value.
    pub fn with_entity(self, slot: BodySlot, entity: &impl Serialize) -> Self {
        match serde_json::to_value(entity) {
            Ok(value) => self.with_value(slot, value),
            Err(e) => {
                warn!(slot = %slot, error = %e, "Failed to serialize audit body input");
                self
            }
        }
    }

    /// Set a slot from a raw JSON value.
    pub fn with_value(mut self, slot: BodySlot, value: Value) -> Self {
        match slot {
            BodySlot::Updates => match serde_json::from_value::<Vec<UpdateRecord>>(value) {
                Ok(records) => self.updates = Some(records.into()),
                Err(e) => warn!(error = %e, "Discarding unreadable updates slot"),
            },
            BodySlot::Error => self.error = ErrorInput::from_value(&value),
            _ => {
                self.values.insert(slot, value);
            }
        }
        self
    }

    /// Set the license, as a raw key or a license object.
    pub fn license(self, license: impl Into<Value>) -> Self {
        self.with_value(BodySlot::License, license.into())
    }

    /// Set the role, as a numeric level or a name.
    pub fn role(self, role: impl Into<Value>) -> Self {
        self.with_value(BodySlot::Role, role.into())
    }

    /// Set free-form info, as an object or a message.
    pub fn info(self, info: impl Into<Value>) -> Self {
        self.with_value(BodySlot::Info, info.into())
    }

    /// Set the sampling interval of a resource event.
    pub fn interval(self, interval: impl Into<Value>) -> Self {
        self.with_value(BodySlot::Interval, interval.into())
    }

    /// Set the threshold of a resource event.
    pub fn threshold(self, threshold: impl Into<Value>) -> Self {
        self.with_value(BodySlot::Threshold, threshold.into())
    }

    /// Set the context-store reference.
    pub fn context(self, context: Value) -> Self {
        self.with_value(BodySlot::Context, context)
    }

    /// Set the flows-set descriptor.
    pub fn flows_set(self, flows_set: Value) -> Self {
        self.with_value(BodySlot::FlowsSet, flows_set)
    }

    /// Set the field-level changes.
    pub fn updates(mut self, updates: impl Into<UpdatesInput>) -> Self {
        self.updates = Some(updates.into());
        self
    }

    /// Set the error.
    pub fn error(mut self, error: impl Into<ErrorInput>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Set the error if there is one.
    pub fn maybe_error(mut self, error: Option<ErrorInput>) -> Self {
        if error.is_some() {
            self.error = error;
        }
        self
    }

    /// Read every recognised slot of a stored body. Unknown keys are
    /// ignored.
    pub fn from_body(body: &Map<String, Value>) -> Self {
        body.iter()
            .filter_map(|(key, value)| key.parse::<BodySlot>().ok().map(|slot| (slot, value)))
            .fold(Self::new(), |input, (slot, value)| {
                input.with_value(slot, value.clone())
            })
    }
}

/// Builds canonical bodies from [`BodyInput`].
#[derive(Debug, Clone)]
pub struct BodyBuilder {
    redactor: Redactor,
    unknown: Value,
}

impl BodyBuilder {
    /// Create a builder masking updates with `redactor`.
    pub fn new(redactor: Redactor) -> Self {
        Self {
            redactor,
            unknown: Value::Null,
        }
    }

    /// Create a builder from the audit configuration.
    pub fn from_config(config: &AuditConfig) -> Self {
        Self::new(Redactor::from_config(config))
    }

    /// Use `unknown` for name-like fields missing from entities.
    pub fn with_unknown_value(mut self, unknown: Value) -> Self {
        self.unknown = unknown;
        self
    }

    /// Build the body. Slots appear in canonical order and only when they
    /// have a value.
    pub fn build(&self, mut input: BodyInput) -> Body {
        let mut body = Body::new();
        for slot in BodySlot::ALL {
            let formatted = match slot {
                BodySlot::Error => input.error.take().map(|error| error_object(&error)),
                BodySlot::Updates => input
                    .updates
                    .take()
                    .and_then(UpdatesInput::normalize)
                    .and_then(|mut records| {
                        self.redactor.apply_all(&mut records);
                        serde_json::to_value(records).ok()
                    }),
                _ => input
                    .values
                    .remove(&slot)
                    .and_then(|value| self.format_slot(slot, &value)),
            };
            if let Some(value) = formatted {
                body.insert(slot, value);
            }
        }
        body
    }

    fn format_slot(&self, slot: BodySlot, value: &Value) -> Option<Value> {
        match slot {
            BodySlot::License => license_object(value),
            BodySlot::Role => role_object(value),
            BodySlot::Info => info_object(value),
            BodySlot::Interval | BodySlot::Threshold => truthy(value).then(|| value.clone()),
            BodySlot::Trigger | BodySlot::Context | BodySlot::FlowsSet => {
                value.is_object().then(|| value.clone())
            }
            _ => entity_kind(slot).and_then(|kind| kind.format(value, &self.unknown)),
        }
    }
}

impl Default for BodyBuilder {
    fn default() -> Self {
        Self::new(Redactor::default())
    }
}

fn entity_kind(slot: BodySlot) -> Option<EntityKind> {
    let kind = match slot {
        BodySlot::Team => EntityKind::Team,
        BodySlot::Application => EntityKind::Application,
        BodySlot::Project | BodySlot::SourceProject | BodySlot::TargetProject => {
            EntityKind::Project
        }
        BodySlot::Device | BodySlot::SourceDevice | BodySlot::TargetDevice => EntityKind::Device,
        BodySlot::User => EntityKind::User,
        BodySlot::Stack => EntityKind::Stack,
        BodySlot::Snapshot => EntityKind::Snapshot,
        BodySlot::Pipeline => EntityKind::Pipeline,
        BodySlot::PipelineStage => EntityKind::PipelineStage,
        BodySlot::PipelineStageTarget => EntityKind::PipelineStageTarget,
        BodySlot::ProjectType => EntityKind::ProjectType,
        BodySlot::DeviceGroup => EntityKind::DeviceGroup,
        BodySlot::BillingSession => EntityKind::BillingSession,
        BodySlot::Subscription => EntityKind::Subscription,
        _ => return None,
    };
    Some(kind)
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowhub_entity::audit::DiffKind;
    use flowhub_entity::device::Device;
    use flowhub_entity::team::Team;
    use flowhub_entity::user::User;
    use serde_json::json;

    use crate::updates::Updates;

    fn team() -> Team {
        Team {
            id: 7,
            external_id: Some("t-7".to_string()),
            name: Some("Plant Ops".to_string()),
            slug: Some("plant-ops".to_string()),
            ..Team::default()
        }
    }

    #[test]
    fn test_empty_input_builds_empty_body() {
        assert!(BodyBuilder::default().build(BodyInput::new()).is_empty());
    }

    #[test]
    fn test_non_qualifying_slots_are_omitted() {
        let body = BodyBuilder::default().build(
            BodyInput::new()
                .info("")
                .interval(0)
                .threshold(false)
                .license("")
                .role(json!(null))
                .updates(Updates::new())
                .with_value(BodySlot::Team, json!("not-a-team"))
                .with_value(BodySlot::Context, json!("not-a-context")),
        );
        assert!(body.is_empty());
        assert!(!serde_json::to_string(&body).unwrap().contains("null"));
    }

    #[test]
    fn test_entities_are_projected() {
        let user = User {
            id: 11,
            username: "alice".to_string(),
            email: Some("alice@example.com".to_string()),
            password: Some("hash".to_string()),
            ..User::default()
        };
        let body = BodyBuilder::default().build(
            BodyInput::new()
                .team(&team())
                .user(&user)
                .role(30)
                .device(&Device {
                    id: 3,
                    credential_secret: Some("s3cr3t".to_string()),
                    ..Device::default()
                }),
        );

        assert_eq!(
            body.into_value(),
            json!({
                "team": { "id": 7, "externalId": "t-7", "name": "Plant Ops", "slug": "plant-ops" },
                "device": { "id": 3, "name": null },
                "user": { "id": 11, "name": null, "username": "alice" },
                "role": { "role": "member" },
            })
        );
    }

    #[test]
    fn test_updates_forms_are_equivalent() {
        let record = UpdateRecord::new("name", Some(json!("a")), Some(json!("b")), DiffKind::Updated);
        let mut updates = Updates::new();
        updates.push_record(record.clone());

        let builder = BodyBuilder::default();
        let from_collection = builder.build(BodyInput::new().updates(updates));
        let from_records = builder.build(BodyInput::new().updates(vec![record]));

        assert_eq!(from_collection, from_records);
        assert_eq!(
            from_collection.get(BodySlot::Updates),
            Some(&json!([{ "key": "name", "old": "a", "new": "b", "diffKind": "updated" }]))
        );
    }

    #[test]
    fn test_manual_updates_are_redacted() {
        let mut updates = Updates::new();
        updates.push("smtp.password", "old", "new");
        let body = BodyBuilder::new(Redactor::new(["password"], "[masked]"))
            .build(BodyInput::new().updates(updates));

        assert_eq!(body.get(BodySlot::Updates).unwrap()[0]["new"], "[masked]");
    }

    #[test]
    fn test_info_interval_threshold_and_error() {
        let body = BodyBuilder::default().build(
            BodyInput::new()
                .info("memory pressure")
                .interval(30)
                .threshold(json!({ "cpu": 75 }))
                .error("container exited"),
        );

        assert_eq!(body.get(BodySlot::Info), Some(&json!({ "info": "memory pressure" })));
        assert_eq!(body.get(BodySlot::Interval), Some(&json!(30)));
        assert_eq!(body.get(BodySlot::Threshold), Some(&json!({ "cpu": 75 })));
        assert_eq!(
            body.get(BodySlot::Error),
            Some(&json!({ "code": "unexpected_error", "message": "container exited" }))
        );
    }

    #[test]
    fn test_rebuilding_a_built_body_is_idempotent() {
        let mut updates = Updates::new();
        updates.push("settings.token", "a", "b");
        let builder = BodyBuilder::default();
        let first = builder.build(
            BodyInput::new()
                .team(&team())
                .role(50)
                .license("key-123")
                .updates(updates)
                .info(json!({ "reason": "upgrade" }))
                .error(&flowhub_core::AppError::database("insert failed")),
        );

        let second = builder.build(BodyInput::from_body(first.as_map()));
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_value_fills_missing_names() {
        let body = BodyBuilder::default()
            .with_unknown_value(json!("unknown"))
            .build(BodyInput::new().team(&Team { id: 1, ..Team::default() }));
        assert_eq!(body.get(BodySlot::Team).unwrap()["name"], "unknown");
    }
}
