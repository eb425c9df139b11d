//! Entity formatters: reduce domain objects to the minimal public shape
//! embedded in an event body.
//!
//! Formatters work on the JSON form of an entity so the same code serves
//! both the write path (serialized domain structs) and the read path
//! (previously stored bodies). Only scalar fields are copied; nested
//! objects and arrays never leak into a projection.

use serde_json::{Map, Value, json};

use flowhub_core::AppError;
use flowhub_entity::team::TeamRole;

/// Code used when an error carries none of its own.
pub const UNEXPECTED_ERROR_CODE: &str = "unexpected_error";

/// The entity kinds a body slot can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Team,
    Application,
    Project,
    Device,
    User,
    Stack,
    Snapshot,
    Pipeline,
    PipelineStage,
    PipelineStageTarget,
    ProjectType,
    DeviceGroup,
    BillingSession,
    Subscription,
}

/// One projected field.
struct Field {
    /// Key written into the projection.
    key: &'static str,
    /// Source keys tried in order.
    sources: &'static [&'static str],
    /// Falls back to the unknown value when absent; otherwise omitted.
    name_like: bool,
}

const ID: Field = Field { key: "id", sources: &["id"], name_like: false };
const EXTERNAL_ID: Field = Field { key: "externalId", sources: &["externalId", "hashid"], name_like: false };
const NAME: Field = Field { key: "name", sources: &["name"], name_like: true };
const SLUG: Field = Field { key: "slug", sources: &["slug"], name_like: false };
const TYPE: Field = Field { key: "type", sources: &["type"], name_like: false };
const USERNAME: Field = Field { key: "username", sources: &["username"], name_like: true };
const SUBSCRIPTION: Field = Field { key: "subscription", sources: &["subscription", "id"], name_like: false };

const IDENTIFIERS: &[&str] = &["id", "externalId", "hashid"];

impl EntityKind {
    fn fields(&self) -> &'static [Field] {
        match self {
            Self::Team => &[ID, EXTERNAL_ID, NAME, SLUG],
            Self::Application | Self::Snapshot | Self::DeviceGroup => &[ID, EXTERNAL_ID, NAME],
            Self::Device | Self::PipelineStageTarget => &[ID, EXTERNAL_ID, NAME, TYPE],
            Self::User => &[ID, EXTERNAL_ID, NAME, USERNAME],
            Self::Project
            | Self::Stack
            | Self::ProjectType
            | Self::Pipeline
            | Self::PipelineStage => &[ID, NAME],
            Self::BillingSession => &[ID],
            Self::Subscription => &[SUBSCRIPTION],
        }
    }

    fn identifiers(&self) -> &'static [&'static str] {
        match self {
            Self::Subscription => &["subscription", "id"],
            _ => IDENTIFIERS,
        }
    }

    /// Whether `value` is an object carrying at least one identifier field.
    pub fn qualifies(&self, value: &Value) -> bool {
        value.as_object().is_some_and(|obj| {
            self.identifiers()
                .iter()
                .any(|key| obj.get(*key).is_some_and(is_scalar))
        })
    }

    /// Project `value` to this kind's public shape.
    ///
    /// Returns `None` for values that do not [qualify](Self::qualifies).
    /// Name-like fields missing from the source are set to `unknown`.
    pub fn format(&self, value: &Value, unknown: &Value) -> Option<Value> {
        if !self.qualifies(value) {
            return None;
        }
        let source = value.as_object()?;

        let mut projection = Map::new();
        for field in self.fields() {
            match pick(source, field.sources) {
                Some(found) => {
                    projection.insert(field.key.to_string(), found.clone());
                }
                None if field.name_like => {
                    projection.insert(field.key.to_string(), unknown.clone());
                }
                None => {}
            }
        }

        if *self == Self::User && projection.get("id").and_then(Value::as_i64) == Some(0) {
            projection.insert("username".to_string(), Value::from("system"));
        }

        Some(Value::Object(projection))
    }
}

fn is_scalar(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Number(_) | Value::Bool(_))
}

fn pick<'a>(source: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| source.get(*key))
        .find(|value| is_scalar(value))
}

/// Format a role given as a numeric level, a name, or `{ role: ... }`.
///
/// Unmapped levels become `"Unknown Role: <level>"`.
pub fn role_object(role: &Value) -> Option<Value> {
    let name = match role {
        Value::Number(level) => match level.as_i64() {
            Some(level) => TeamRole::from_level(level)
                .map(|role| role.as_str().to_string())
                .unwrap_or_else(|| format!("Unknown Role: {level}")),
            None => format!("Unknown Role: {level}"),
        },
        Value::String(name) if !name.is_empty() => name.clone(),
        Value::Object(obj) => return obj.get("role").and_then(role_object),
        _ => return None,
    };
    Some(json!({ "role": name }))
}

/// Format a license given as a raw key or as an object.
pub fn license_object(license: &Value) -> Option<Value> {
    match license {
        Value::String(key) if !key.is_empty() => Some(json!({ "key": key })),
        Value::Object(_) => Some(license.clone()),
        _ => None,
    }
}

/// Format the `info` slot: objects pass through, strings are wrapped.
pub fn info_object(info: &Value) -> Option<Value> {
    match info {
        Value::Object(_) => Some(info.clone()),
        Value::String(text) if !text.is_empty() => Some(json!({ "info": text })),
        _ => None,
    }
}

/// An error attached to an audit event.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorInput {
    /// A plain message.
    Message(String),
    /// A `{ code, message | error }` shaped value.
    Structured(Value),
    /// A native error with its cause chain.
    Native {
        code: Option<String>,
        message: String,
        stack: Vec<String>,
    },
}

impl ErrorInput {
    /// Capture a native error and its `source()` chain.
    pub fn from_error(err: &(dyn std::error::Error + 'static)) -> Self {
        Self::Native {
            code: None,
            message: err.to_string(),
            stack: cause_chain(err),
        }
    }

    /// Interpret a stored value: strings are messages, objects are
    /// structured errors, anything else does not qualify.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(message) if !message.is_empty() => Some(Self::Message(message.clone())),
            Value::Object(_) => Some(Self::Structured(value.clone())),
            _ => None,
        }
    }
}

fn cause_chain(err: &(dyn std::error::Error + 'static)) -> Vec<String> {
    let mut stack = vec![err.to_string()];
    let mut current = err.source();
    while let Some(cause) = current {
        stack.push(format!("caused by: {cause}"));
        current = cause.source();
    }
    stack
}

impl From<&str> for ErrorInput {
    fn from(message: &str) -> Self {
        Self::Message(message.to_string())
    }
}

impl From<String> for ErrorInput {
    fn from(message: String) -> Self {
        Self::Message(message)
    }
}

impl From<&AppError> for ErrorInput {
    fn from(err: &AppError) -> Self {
        Self::Native {
            code: Some(err.kind.as_str().to_lowercase()),
            message: err.message.clone(),
            stack: cause_chain(err),
        }
    }
}

/// Format an error as `{ code, message }`, plus `stack` for native errors
/// or when a stored error already carries one.
pub fn error_object(error: &ErrorInput) -> Value {
    match error {
        ErrorInput::Message(message) => json!({
            "code": UNEXPECTED_ERROR_CODE,
            "message": message,
        }),
        ErrorInput::Structured(value) => {
            let code = value
                .get("code")
                .and_then(|code| match code {
                    Value::String(code) if !code.is_empty() => Some(code.clone()),
                    Value::Number(code) => Some(code.to_string()),
                    _ => None,
                })
                .unwrap_or_else(|| UNEXPECTED_ERROR_CODE.to_string());
            let message = ["message", "error"]
                .iter()
                .filter_map(|key| value.get(*key).and_then(Value::as_str))
                .next()
                .unwrap_or("unknown error");

            let mut formatted = json!({ "code": code, "message": message });
            if let Some(stack) = value.get("stack").filter(|stack| stack.is_string()) {
                formatted["stack"] = stack.clone();
            }
            formatted
        }
        ErrorInput::Native {
            code,
            message,
            stack,
        } => json!({
            "code": code.as_deref().unwrap_or(UNEXPECTED_ERROR_CODE),
            "message": message,
            "stack": stack.join("\n"),
        }),
    }
}
