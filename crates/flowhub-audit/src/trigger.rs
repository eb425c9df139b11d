//! Actor attribution.
//!
//! Call sites identify "who did this" in several ways: a numeric user id,
//! an opaque external id, the `"system"` sentinel, a user object, or not
//! at all. [`TriggerResolver`] folds all of them into one [`Trigger`].

use flowhub_core::config::audit::{AuditConfig, DEFAULT_PLATFORM_NAME};
use flowhub_entity::audit::{Trigger, TriggerType};
use flowhub_entity::user::{User, UserRef};

/// Sentinel accepted in place of the system actor id.
pub const SYSTEM_SENTINEL: &str = "system";

/// An actor reference as supplied by a call site.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Actor {
    /// Internal user id; `0` is the platform.
    Id(i64),
    /// Opaque external user id.
    ExternalId(String),
    /// The platform itself.
    System,
    /// A user object.
    User(UserRef),
    /// No actor supplied.
    #[default]
    Absent,
}

impl From<i64> for Actor {
    fn from(id: i64) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for Actor {
    fn from(value: &str) -> Self {
        match value {
            "" => Self::Absent,
            SYSTEM_SENTINEL => Self::System,
            external_id => Self::ExternalId(external_id.to_string()),
        }
    }
}

impl From<String> for Actor {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<UserRef> for Actor {
    fn from(user: UserRef) -> Self {
        Self::User(user)
    }
}

impl From<&User> for Actor {
    fn from(user: &User) -> Self {
        Self::User(UserRef::from(user))
    }
}

impl<T: Into<Actor>> From<Option<T>> for Actor {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

/// Resolves actor references into [`Trigger`]s.
#[derive(Debug, Clone)]
pub struct TriggerResolver {
    platform_name: String,
}

impl TriggerResolver {
    /// Create a resolver whose system trigger carries `platform_name`.
    pub fn new(platform_name: impl Into<String>) -> Self {
        Self {
            platform_name: platform_name.into(),
        }
    }

    /// Create a resolver from the audit configuration.
    pub fn from_config(config: &AuditConfig) -> Self {
        Self::new(config.platform_name.clone())
    }

    /// The system trigger (`id` 0).
    pub fn system(&self) -> Trigger {
        Trigger {
            id: Some(0),
            external_id: Some(SYSTEM_SENTINEL.to_string()),
            trigger_type: TriggerType::System,
            name: Some(self.platform_name.clone()),
        }
    }

    /// Resolve `actor`, using `companion` for the fields the actor itself
    /// does not carry. Always returns a trigger.
    ///
    /// The companion stands in for the actor only when no actor was
    /// supplied; any other unusable reference resolves to unknown.
    pub fn resolve(&self, actor: &Actor, companion: Option<&UserRef>) -> Trigger {
        match actor {
            Actor::System | Actor::Id(0) => self.system(),
            Actor::Id(id) if *id > 0 => Trigger {
                id: Some(*id),
                external_id: companion.and_then(|c| c.external_id().map(str::to_string)),
                trigger_type: TriggerType::User,
                name: Some(display_name(companion)),
            },
            Actor::ExternalId(external_id) if external_id == SYSTEM_SENTINEL => self.system(),
            Actor::ExternalId(external_id) if !external_id.is_empty() => Trigger {
                id: companion.and_then(|c| c.id),
                external_id: Some(external_id.clone()),
                trigger_type: TriggerType::User,
                name: Some(display_name(companion)),
            },
            Actor::User(user) => match (user.id, user.external_id()) {
                (Some(id), _) if id >= 0 => self.resolve(&Actor::Id(id), Some(user)),
                (_, Some(external_id)) => {
                    self.resolve(&Actor::ExternalId(external_id.to_string()), Some(user))
                }
                _ => Trigger::unknown(),
            },
            Actor::Absent => self.resolve_companion(companion),
            _ => Trigger::unknown(),
        }
    }

    fn resolve_companion(&self, companion: Option<&UserRef>) -> Trigger {
        match companion {
            Some(user) if user.is_user_like() => self.resolve(&Actor::User(user.clone()), None),
            _ => Trigger::unknown(),
        }
    }
}

impl Default for TriggerResolver {
    fn default() -> Self {
        Self::new(DEFAULT_PLATFORM_NAME)
    }
}

/// Name precedence: name, username, email local-part, `"unknown"`.
fn display_name(companion: Option<&UserRef>) -> String {
    companion
        .and_then(|user| {
            non_empty(&user.name)
                .or_else(|| non_empty(&user.username))
                .or_else(|| {
                    user.email
                        .as_deref()
                        .and_then(|email| email.split('@').next())
                        .filter(|local| !local.is_empty())
                })
        })
        .unwrap_or("unknown")
        .to_string()
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
