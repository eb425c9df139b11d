//! Read-path reconstruction of stored audit events.
//!
//! Stored rows may predate the current body shape or come from external
//! producers. [`LogEntryFormatter`] never fails: anything it cannot read
//! is logged and skipped, and a partially populated entry is returned.

use serde_json::{Map, Value, json};
use tracing::warn;

use flowhub_core::config::audit::AuditConfig;
use flowhub_entity::audit::{
    AuditEventRow, Body, BodySlot, EntryScope, ExternalAuditEntry, Trigger,
};
use flowhub_entity::user::UserRef;

use crate::body::{BodyBuilder, BodyInput};
use crate::format::{ErrorInput, error_object};
use crate::trigger::{Actor, TriggerResolver};

const CONTEXT_STORES: [&str; 2] = ["memory", "persistent"];
const FLOWS_SET_EVENT: &str = "flows.set";

/// Converts stored rows into [`ExternalAuditEntry`]s.
#[derive(Debug, Clone, Default)]
pub struct LogEntryFormatter {
    builder: BodyBuilder,
    resolver: TriggerResolver,
}

impl LogEntryFormatter {
    pub fn new(builder: BodyBuilder, resolver: TriggerResolver) -> Self {
        Self { builder, resolver }
    }

    pub fn from_config(config: &AuditConfig) -> Self {
        Self::new(
            BodyBuilder::from_config(config),
            TriggerResolver::from_config(config),
        )
    }

    /// Reconstruct `row`. `actor` is the user record referenced by
    /// `row.actor_id`, when the caller has loaded it.
    pub fn reconstruct(&self, row: &AuditEventRow, actor: Option<&UserRef>) -> ExternalAuditEntry {
        let raw = parse_body(row);
        let trigger = self.resolve_trigger(row, actor, &raw);

        let mut body = self.builder.build(BodyInput::from_body(&raw));
        apply_compat(&row.event, &raw, &mut body);
        sanitize_identifiers(&mut body);

        ExternalAuditEntry {
            id: row.id,
            event: row.event.clone(),
            created_at: row.created_at,
            scope: EntryScope {
                id: row.scope_id.clone(),
                scope_type: row.scope_type,
            },
            username: trigger.name.clone(),
            trigger,
            body,
        }
    }

    /// Reconstruct a page of rows, looking each actor up with `lookup`.
    pub fn reconstruct_all<'a, F>(&self, rows: &[AuditEventRow], lookup: F) -> Vec<ExternalAuditEntry>
    where
        F: Fn(i64) -> Option<&'a UserRef>,
    {
        rows.iter()
            .map(|row| self.reconstruct(row, row.actor_id.and_then(&lookup)))
            .collect()
    }

    fn resolve_trigger(
        &self,
        row: &AuditEventRow,
        actor: Option<&UserRef>,
        raw: &Map<String, Value>,
    ) -> Trigger {
        if let Some(id) = row.actor_id {
            return self.resolver.resolve(&Actor::Id(id), actor);
        }
        if actor.is_some_and(UserRef::is_user_like) {
            return self.resolver.resolve(&Actor::Absent, actor);
        }
        match raw.get(BodySlot::Trigger.as_str()) {
            Some(embedded @ Value::Object(_)) => {
                serde_json::from_value(embedded.clone()).unwrap_or_else(|e| {
                    warn!(event_id = %row.id, error = %e, "Ignoring unreadable embedded trigger");
                    Trigger::unknown()
                })
            }
            _ => Trigger::unknown(),
        }
    }
}

fn parse_body(row: &AuditEventRow) -> Map<String, Value> {
    let Some(text) = row.body.as_deref().filter(|text| !text.trim().is_empty()) else {
        return Map::new();
    };
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            warn!(event_id = %row.id, event = %row.event, kind = json_kind(&other), "Audit event body is not an object");
            Map::new()
        }
        Err(e) => {
            warn!(event_id = %row.id, event = %row.event, error = %e, "Failed to parse audit event body");
            Map::new()
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Upgrade legacy body shapes, reading fields the builder does not know
/// from the raw stored body.
fn apply_compat(event: &str, raw: &Map<String, Value>, body: &mut Body) {
    if let (Some(key), Some(scope), Some(store)) = (raw.get("key"), raw.get("scope"), raw.get("store")) {
        if store.as_str().is_some_and(|store| CONTEXT_STORES.contains(&store)) {
            body.insert(
                BodySlot::Context,
                json!({ "key": key, "scope": scope, "store": store }),
            );
        }
    }

    if event == FLOWS_SET_EVENT && !body.contains(BodySlot::FlowsSet) {
        if let Some(flows_type) = raw.get("type").filter(|t| !t.is_null()) {
            body.insert(BodySlot::FlowsSet, json!({ "type": flows_type }));
        }
    }

    if let Some(role) = body.get(BodySlot::Role).cloned() {
        let hoisted = match body.get_mut(BodySlot::User).and_then(Value::as_object_mut) {
            Some(user) => {
                let name = role.get("role").cloned().unwrap_or(role);
                user.insert("role".to_string(), name);
                true
            }
            None => false,
        };
        if hoisted {
            body.remove(BodySlot::Role);
        }
    }

    if let (Some(code), Some(error)) = (raw.get("code"), raw.get("error")) {
        if !code.is_null() && error.is_string() {
            let legacy = ErrorInput::Structured(json!({ "code": code, "error": error }));
            body.insert(BodySlot::Error, error_object(&legacy));
        }
    }
}

/// Replace internal numeric ids with the external id wherever a top-level
/// object carries both.
fn sanitize_identifiers(body: &mut Body) {
    for (_, value) in body.iter_mut() {
        let Some(obj) = value.as_object_mut() else {
            continue;
        };
        let has_numeric_id = obj.get("id").is_some_and(Value::is_number);
        let external_id = obj.get("externalId").filter(|id| id.is_string()).cloned();
        if let (true, Some(external_id)) = (has_numeric_id, external_id) {
            obj.insert("id".to_string(), external_id);
            obj.shift_remove("externalId");
        }
    }
}
