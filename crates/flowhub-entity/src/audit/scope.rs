//! Audit scope types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The domain category an audit event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "audit_scope_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ScopeType {
    /// Account and user-management events.
    User,
    /// Hosted instance events.
    Project,
    /// Remote device events.
    Device,
    /// Team membership, settings and billing events.
    Team,
    /// Application, pipeline and device-group events.
    Application,
    /// Platform-wide administration events.
    Platform,
}

impl ScopeType {
    /// All scope types in declaration order.
    pub const ALL: [ScopeType; 6] = [
        Self::User,
        Self::Project,
        Self::Device,
        Self::Team,
        Self::Application,
        Self::Platform,
    ];

    /// Return the scope as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Project => "project",
            Self::Device => "device",
            Self::Team => "team",
            Self::Application => "application",
            Self::Platform => "platform",
        }
    }
}

impl fmt::Display for ScopeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScopeType {
    type Err = flowhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|scope| scope.as_str() == s.to_lowercase())
            .ok_or_else(|| {
                flowhub_core::AppError::validation(format!(
                    "Invalid scope type: '{s}'. Expected one of: user, project, device, team, application, platform"
                ))
            })
    }
}

/// The entity an audit event is filed under.
///
/// Every scope except [`ScopeType::Platform`] carries the id of the
/// affected entity. Ids are stored as text because project ids are UUIDs
/// while the other entities use integer ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditScope {
    /// The scope category.
    #[serde(rename = "type")]
    pub scope_type: ScopeType,
    /// The scoped entity id, absent for platform events.
    pub id: Option<String>,
}

impl AuditScope {
    /// Scope an event to the affected user.
    pub fn user(user_id: i64) -> Self {
        Self::entity(ScopeType::User, user_id)
    }

    /// Scope an event to a hosted instance.
    pub fn project(project_id: impl ToString) -> Self {
        Self::entity(ScopeType::Project, project_id)
    }

    /// Scope an event to a device.
    pub fn device(device_id: impl ToString) -> Self {
        Self::entity(ScopeType::Device, device_id)
    }

    /// Scope an event to a team.
    pub fn team(team_id: impl ToString) -> Self {
        Self::entity(ScopeType::Team, team_id)
    }

    /// Scope an event to an application.
    pub fn application(application_id: impl ToString) -> Self {
        Self::entity(ScopeType::Application, application_id)
    }

    /// Scope an event to the platform as a whole.
    pub fn platform() -> Self {
        Self {
            scope_type: ScopeType::Platform,
            id: None,
        }
    }

    fn entity(scope_type: ScopeType, id: impl ToString) -> Self {
        Self {
            scope_type,
            id: Some(id.to_string()),
        }
    }
}

impl fmt::Display for AuditScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "{}:{id}", self.scope_type),
            None => write!(f, "{}", self.scope_type),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("team".parse::<ScopeType>().unwrap(), ScopeType::Team);
        assert_eq!("DEVICE".parse::<ScopeType>().unwrap(), ScopeType::Device);
        assert!("org".parse::<ScopeType>().is_err());
    }

    #[test]
    fn test_scope_display() {
        assert_eq!(AuditScope::team(12).to_string(), "team:12");
        assert_eq!(AuditScope::platform().to_string(), "platform");
        assert_eq!(AuditScope::platform().id, None);
    }
}
