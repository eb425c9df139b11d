//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A platform user account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Internal user id.
    pub id: i64,
    /// Public user identifier.
    pub external_id: Option<String>,
    /// Login name.
    pub username: String,
    /// Display name.
    pub name: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Whether the email address has been verified.
    #[serde(default)]
    pub email_verified: bool,
    /// Whether the user is a platform administrator.
    #[serde(default)]
    pub admin: bool,
    /// Password hash; never serialized.
    #[serde(skip_serializing, default)]
    pub password: Option<String>,
    /// Creation time.
    pub created_at: Option<DateTime<Utc>>,
}

/// Partial user reference used to attribute audit events.
///
/// Call sites hold users in many shapes (a session user, a lookup by
/// external id, a bare numeric id); this carries whichever fields are
/// known.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserRef {
    /// Internal user id.
    pub id: Option<i64>,
    /// Public user identifier.
    pub external_id: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Login name.
    pub username: Option<String>,
    /// Email address.
    pub email: Option<String>,
}

impl UserRef {
    /// A reference by internal id only.
    pub fn with_id(id: i64) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    /// A reference by external id only.
    pub fn with_external_id(external_id: impl Into<String>) -> Self {
        Self {
            external_id: Some(external_id.into()),
            ..Self::default()
        }
    }

    /// The external id, if set and non-empty.
    pub fn external_id(&self) -> Option<&str> {
        self.external_id.as_deref().filter(|id| !id.is_empty())
    }

    /// Whether this reference identifies a user: a non-negative id or a
    /// non-empty external id.
    pub fn is_user_like(&self) -> bool {
        matches!(self.id, Some(id) if id >= 0) || self.external_id().is_some()
    }
}

impl From<&User> for UserRef {
    fn from(user: &User) -> Self {
        Self {
            id: Some(user.id),
            external_id: user.external_id.clone(),
            name: user.name.clone(),
            username: Some(user.username.clone()),
            email: user.email.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_like() {
        assert!(UserRef::with_id(0).is_user_like());
        assert!(UserRef::with_external_id("u-abc").is_user_like());
        assert!(!UserRef::with_external_id("").is_user_like());
        assert!(!UserRef::with_id(-4).is_user_like());
        assert!(!UserRef::default().is_user_like());
    }

    #[test]
    fn test_password_is_never_serialized() {
        let user = User {
            id: 3,
            username: "alice".to_string(),
            password: Some("$argon2id$hash".to_string()),
            ..User::default()
        };
        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("password").is_none());
        assert_eq!(value["username"], "alice");
    }
}
