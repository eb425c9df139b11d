//! Masking of sensitive update values.

use serde_json::Value;

use flowhub_core::config::audit::{AuditConfig, DEFAULT_REDACTION_MASK, DEFAULT_SENSITIVE_KEYS};
use flowhub_entity::audit::UpdateRecord;

/// Masks the values of update records whose key names a secret.
///
/// A key is sensitive when the flattened path ends with one of the
/// configured names (case-sensitive), so `settings.smtp.password` and
/// `user.pass` are both masked wherever they are nested.
#[derive(Debug, Clone)]
pub struct Redactor {
    keys: Vec<String>,
    mask: String,
}

impl Redactor {
    /// Create a redactor with explicit sensitive keys and mask.
    pub fn new(keys: impl IntoIterator<Item = impl Into<String>>, mask: impl Into<String>) -> Self {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            mask: mask.into(),
        }
    }

    /// Create a redactor from the audit configuration.
    pub fn from_config(config: &AuditConfig) -> Self {
        Self::new(config.sensitive_keys.iter().cloned(), config.redaction_mask.clone())
    }

    /// The value written over masked fields.
    pub fn mask(&self) -> &str {
        &self.mask
    }

    /// Whether a flattened key names a sensitive field.
    pub fn is_sensitive(&self, key: &str) -> bool {
        self.keys.iter().any(|suffix| key.ends_with(suffix.as_str()))
    }

    /// Mask both sides of `record` if its key is sensitive.
    pub fn apply(&self, record: &mut UpdateRecord) {
        if self.is_sensitive(&record.key) {
            record.old = Some(Value::String(self.mask.clone()));
            record.new = Some(Value::String(self.mask.clone()));
        }
    }

    /// Mask every sensitive record in place.
    pub fn apply_all(&self, records: &mut [UpdateRecord]) {
        records.iter_mut().for_each(|record| self.apply(record));
    }
}

impl Default for Redactor {
    fn default() -> Self {
        Self::new(DEFAULT_SENSITIVE_KEYS.iter().copied(), DEFAULT_REDACTION_MASK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowhub_entity::audit::DiffKind;
    use serde_json::json;

    #[test]
    fn test_suffix_match() {
        let redactor = Redactor::default();
        assert!(redactor.is_sensitive("password"));
        assert!(redactor.is_sensitive("settings.smtp.auth.pass"));
        assert!(redactor.is_sensitive("broker.credentialSecret"));
        assert!(redactor.is_sensitive("user.newpassword"));
        assert!(!redactor.is_sensitive("userPassword"));
        assert!(!redactor.is_sensitive("Password"));
        assert!(!redactor.is_sensitive("password.length"));
    }

    #[test]
    fn test_apply_masks_both_sides() {
        let redactor = Redactor::new(["apiKey"], "[hidden]");
        let mut record = UpdateRecord::new(
            "integrations.apiKey",
            Some(json!("old-key")),
            Some(json!("new-key")),
            DiffKind::Updated,
        );
        redactor.apply(&mut record);
        assert_eq!(record.old, Some(json!("[hidden]")));
        assert_eq!(record.new, Some(json!("[hidden]")));
    }
}
