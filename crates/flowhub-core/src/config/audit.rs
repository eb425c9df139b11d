//! Audit normalization configuration.

use serde::{Deserialize, Serialize};

/// Field names whose values are masked in recorded updates.
pub const DEFAULT_SENSITIVE_KEYS: &[&str] = &[
    "pass",
    "password",
    "token",
    "secret",
    "credentials",
    "credentialSecret",
    "cookieSecret",
];

/// Replacement written over redacted values.
pub const DEFAULT_REDACTION_MASK: &str = "***";

/// Display name given to the system trigger.
pub const DEFAULT_PLATFORM_NAME: &str = "FlowHub Platform";

/// Settings consumed by the audit normalization engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Display name of the system actor (trigger id `0`).
    #[serde(default = "default_platform_name")]
    pub platform_name: String,
    /// Suffixes of flattened update keys whose values are masked.
    #[serde(default = "default_sensitive_keys")]
    pub sensitive_keys: Vec<String>,
    /// Value written over masked update values.
    #[serde(default = "default_redaction_mask")]
    pub redaction_mask: String,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            platform_name: default_platform_name(),
            sensitive_keys: default_sensitive_keys(),
            redaction_mask: default_redaction_mask(),
        }
    }
}

fn default_platform_name() -> String {
    DEFAULT_PLATFORM_NAME.to_string()
}

fn default_sensitive_keys() -> Vec<String> {
    DEFAULT_SENSITIVE_KEYS.iter().map(|k| k.to_string()).collect()
}

fn default_redaction_mask() -> String {
    DEFAULT_REDACTION_MASK.to_string()
}
