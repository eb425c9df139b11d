//! Recursive structural diff.
//!
//! Both sides are flattened into ordered `path -> leaf` lists, compared
//! path by path, and every changed path becomes an [`UpdateRecord`].
//! Paths join object keys with `.` and use brackets for list indices and
//! integer-like keys: `env[0].name`, `ports[8080]`.

use std::collections::{HashMap, HashSet};

use flowhub_core::{AppError, AppResult};
use flowhub_entity::audit::{DiffKind, UpdateRecord};

use crate::redact::Redactor;
use crate::value::AuditValue;

/// Diff two values, masking sensitive paths with the default key list.
pub fn diff(before: &AuditValue, after: &AuditValue) -> AppResult<Vec<UpdateRecord>> {
    diff_with(before, after, &Redactor::default())
}

/// Diff two values, masking sensitive paths with `redactor`.
///
/// Unchanged paths are dropped. Records follow key-encounter order:
/// paths of `before` first, then paths only present in `after`.
pub fn diff_with(
    before: &AuditValue,
    after: &AuditValue,
    redactor: &Redactor,
) -> AppResult<Vec<UpdateRecord>> {
    if matches!(before, AuditValue::Opaque) || matches!(after, AuditValue::Opaque) {
        return Err(AppError::invalid_argument(
            "Cannot diff an opaque value at the comparison root",
        ));
    }

    let before_flat = flatten(before);
    let after_flat = flatten(after);
    let after_index: HashMap<&str, &AuditValue> = after_flat
        .iter()
        .map(|(path, value)| (path.as_str(), *value))
        .collect();
    let before_keys: HashSet<&str> = before_flat.iter().map(|(path, _)| path.as_str()).collect();

    let mut records = Vec::new();
    for (path, old) in before_flat.iter().map(|(p, v)| (p, *v)) {
        let new = after_index.get(path.as_str()).copied();
        let kind = classify(Some(old), new);
        if kind != DiffKind::Unchanged {
            records.push(record(path, Some(old), new, kind));
        }
    }
    for (path, new) in after_flat.iter().map(|(p, v)| (p, *v)) {
        if !before_keys.contains(path.as_str()) {
            records.push(record(path, None, Some(new), DiffKind::Created));
        }
    }

    redactor.apply_all(&mut records);
    Ok(records)
}

/// Classify one path given its value on each side.
pub fn classify(old: Option<&AuditValue>, new: Option<&AuditValue>) -> DiffKind {
    match (old, new) {
        (Some(old), Some(new)) if old.equivalent(new) => DiffKind::Unchanged,
        (Some(_), Some(_)) => DiffKind::Updated,
        (None, Some(_)) => DiffKind::Created,
        (Some(_), None) => DiffKind::Deleted,
        (None, None) => DiffKind::Unchanged,
    }
}

/// Flatten a value into ordered `(path, leaf)` pairs.
///
/// Dates, scalars and empty containers are leaves. Nested opaque values
/// produce no entry at all. A scalar root yields one entry with an empty
/// path.
pub fn flatten(value: &AuditValue) -> Vec<(String, &AuditValue)> {
    let mut out = Vec::new();
    flatten_into(String::new(), value, &mut out);
    out
}

fn flatten_into<'a>(path: String, value: &'a AuditValue, out: &mut Vec<(String, &'a AuditValue)>) {
    match value {
        AuditValue::Opaque => {}
        AuditValue::Map(entries) if value.is_container() => {
            for (key, child) in entries {
                flatten_into(join(&path, key), child, out);
            }
        }
        AuditValue::List(items) if value.is_container() => {
            for (index, child) in items.iter().enumerate() {
                flatten_into(format!("{path}[{index}]"), child, out);
            }
        }
        leaf => out.push((path, leaf)),
    }
}

fn join(path: &str, key: &str) -> String {
    if !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit()) {
        format!("{path}[{key}]")
    } else if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

fn record(
    path: &str,
    old: Option<&AuditValue>,
    new: Option<&AuditValue>,
    kind: DiffKind,
) -> UpdateRecord {
    UpdateRecord::new(
        path,
        old.and_then(AuditValue::to_json),
        new.and_then(AuditValue::to_json),
        kind,
    )
}
