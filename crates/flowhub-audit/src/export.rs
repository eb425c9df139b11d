//! Delimited-text export of reconstructed entries.

use std::io::Write;

use chrono::SecondsFormat;

use flowhub_core::AppResult;
use flowhub_entity::audit::ExternalAuditEntry;

/// Column order of the exported file.
pub const CSV_HEADERS: [&str; 6] = ["id", "event", "body", "scope", "trigger", "createdAt"];

/// Write `entries` as CSV with a header row. Nested values are written as
/// serialized JSON.
pub fn write_csv<W: Write>(entries: &[ExternalAuditEntry], writer: W) -> AppResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(CSV_HEADERS)?;
    for entry in entries {
        csv.write_record([
            entry.id.to_string(),
            entry.event.clone(),
            serde_json::to_string(&entry.body)?,
            serde_json::to_string(&entry.scope)?,
            serde_json::to_string(&entry.trigger)?,
            entry.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        ])?;
    }
    csv.flush()?;
    Ok(())
}
