//! Ordered ledger of field-level changes attached to an event body.

use serde_json::Value;

use flowhub_core::AppResult;
use flowhub_entity::audit::{DiffKind, UpdateRecord};

use crate::diff::diff_with;
use crate::redact::Redactor;
use crate::value::AuditValue;

/// An appendable, ordered collection of [`UpdateRecord`]s.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Updates {
    records: Vec<UpdateRecord>,
}

impl Updates {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the collection holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append an `updated` record.
    pub fn push(&mut self, key: impl Into<String>, old: impl Into<Value>, new: impl Into<Value>) {
        self.push_kind(key, Some(old.into()), Some(new.into()), DiffKind::Updated);
    }

    /// Append a record of any kind.
    pub fn push_kind(
        &mut self,
        key: impl Into<String>,
        old: Option<Value>,
        new: Option<Value>,
        diff_kind: DiffKind,
    ) {
        self.records.push(UpdateRecord::new(key, old, new, diff_kind));
    }

    /// Append a pre-built record.
    pub fn push_record(&mut self, record: UpdateRecord) {
        self.records.push(record);
    }

    /// Diff `before` against `after` and append every change, masking
    /// the default sensitive keys.
    pub fn push_differences(&mut self, before: &AuditValue, after: &AuditValue) -> AppResult<()> {
        self.push_differences_with(before, after, &Redactor::default())
    }

    /// Diff `before` against `after` and append every change, masking
    /// with `redactor`.
    pub fn push_differences_with(
        &mut self,
        before: &AuditValue,
        after: &AuditValue,
        redactor: &Redactor,
    ) -> AppResult<()> {
        self.records.extend(diff_with(before, after, redactor)?);
        Ok(())
    }

    /// Iterate over the records in order.
    pub fn iter(&self) -> impl Iterator<Item = &UpdateRecord> {
        self.records.iter()
    }

    /// Copy the records out.
    pub fn to_vec(&self) -> Vec<UpdateRecord> {
        self.records.clone()
    }

    /// Take the records.
    pub fn into_vec(self) -> Vec<UpdateRecord> {
        self.records
    }
}

impl From<Vec<UpdateRecord>> for Updates {
    fn from(records: Vec<UpdateRecord>) -> Self {
        Self { records }
    }
}

/// The two ways a caller can hand updates to the body builder.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdatesInput {
    /// An explicit collection.
    Collection(Updates),
    /// A plain list of pre-built records.
    Records(Vec<UpdateRecord>),
}

impl UpdatesInput {
    /// Normalize either form to the stored record list.
    ///
    /// `unchanged` records are discarded; `None` when nothing remains, so
    /// an empty ledger never reaches the body.
    pub fn normalize(self) -> Option<Vec<UpdateRecord>> {
        let records = match self {
            Self::Collection(updates) => updates.into_vec(),
            Self::Records(records) => records,
        };
        let records: Vec<UpdateRecord> = records
            .into_iter()
            .filter(|record| record.diff_kind != DiffKind::Unchanged)
            .collect();
        (!records.is_empty()).then_some(records)
    }
}

impl From<Updates> for UpdatesInput {
    fn from(updates: Updates) -> Self {
        Self::Collection(updates)
    }
}

impl From<Vec<UpdateRecord>> for UpdatesInput {
    fn from(records: Vec<UpdateRecord>) -> Self {
        Self::Records(records)
    }
}
