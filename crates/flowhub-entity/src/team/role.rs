//! Team membership roles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles a user can hold within a team.
///
/// Each role has a numeric level; higher levels are more privileged and
/// are what gets stored on membership rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamRole {
    /// Can only view dashboards.
    Dashboard,
    /// Read-only member.
    Viewer,
    /// Regular member.
    Member,
    /// Team owner.
    Owner,
    /// Platform administrator acting inside the team.
    Admin,
}

impl TeamRole {
    /// All roles, lowest level first.
    pub const ALL: [TeamRole; 5] = [
        Self::Dashboard,
        Self::Viewer,
        Self::Member,
        Self::Owner,
        Self::Admin,
    ];

    /// Return the stored role level.
    pub fn level(&self) -> i64 {
        match self {
            Self::Dashboard => 5,
            Self::Viewer => 10,
            Self::Member => 30,
            Self::Owner => 50,
            Self::Admin => 99,
        }
    }

    /// Look up the role stored at `level`.
    pub fn from_level(level: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.level() == level)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Viewer => "viewer",
            Self::Member => "member",
            Self::Owner => "owner",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for TeamRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TeamRole {
    type Err = flowhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == lower)
            .ok_or_else(|| {
                flowhub_core::AppError::validation(format!(
                    "Invalid team role: '{s}'. Expected one of: dashboard, viewer, member, owner, admin"
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_lookup() {
        assert_eq!(TeamRole::from_level(30), Some(TeamRole::Member));
        assert_eq!(TeamRole::from_level(99), Some(TeamRole::Admin));
        assert_eq!(TeamRole::from_level(31), None);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("owner".parse::<TeamRole>().unwrap(), TeamRole::Owner);
        assert_eq!("VIEWER".parse::<TeamRole>().unwrap(), TeamRole::Viewer);
        assert!("guest".parse::<TeamRole>().is_err());
    }
}
