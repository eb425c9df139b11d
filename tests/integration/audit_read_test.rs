//! Integration tests for reading stored audit events back out.

mod helpers;

use chrono::{TimeZone, Utc};
use serde_json::json;
use uuid::Uuid;

use flowhub::audit::export::{CSV_HEADERS, write_csv};
use flowhub::entity::audit::{AuditEventRow, BodySlot, ScopeType, TriggerType};
use flowhub::entity::team::Team;
use flowhub::entity::user::{User, UserRef};
use flowhub::{ErrorInput, LogEntryFormatter};

use helpers::{TestAudit, capture_logs};

fn team() -> Team {
    Team {
        id: 12,
        external_id: Some("t-12".to_string()),
        name: Some("Line Ops".to_string()),
        ..Team::default()
    }
}

fn legacy_row(event: &str, body: &str) -> AuditEventRow {
    AuditEventRow {
        id: Uuid::nil(),
        actor_id: Some(3),
        event: event.to_string(),
        scope_type: ScopeType::Project,
        scope_id: Some("p-1".to_string()),
        body: Some(body.to_string()),
        created_at: Utc.with_ymd_and_hms(2023, 3, 1, 9, 0, 0).unwrap(),
    }
}

#[tokio::test]
async fn test_written_event_reads_back_with_external_ids() {
    let audit = TestAudit::new();
    let member = User {
        id: 5,
        external_id: Some("u-5".to_string()),
        username: "bob".to_string(),
        ..User::default()
    };

    audit
        .loggers
        .team
        .member_added(1_i64, None, &team(), &member, 50)
        .await;

    let rows = audit.sink.rows();
    let actor = UserRef {
        id: Some(1),
        external_id: Some("u-1".to_string()),
        name: Some("Ada Admin".to_string()),
        ..UserRef::default()
    };
    let entry = audit.formatter.reconstruct(&rows[0], Some(&actor));

    assert_eq!(entry.event, "team.member.added");
    assert_eq!(entry.scope.scope_type, ScopeType::Team);
    assert_eq!(entry.scope.id.as_deref(), Some("12"));
    assert_eq!(entry.trigger.trigger_type, TriggerType::User);
    assert_eq!(entry.trigger.name.as_deref(), Some("Ada Admin"));
    assert_eq!(entry.username.as_deref(), Some("Ada Admin"));
    assert_eq!(
        entry.body.get(BodySlot::Team),
        Some(&json!({ "id": "t-12", "name": "Line Ops" }))
    );
    assert_eq!(
        entry.body.get(BodySlot::User),
        Some(&json!({ "id": "u-5", "name": null, "username": "bob", "role": "owner" }))
    );
    assert!(!entry.body.contains(BodySlot::Role));
}

#[tokio::test]
async fn test_system_events_read_back_as_platform() {
    let audit = TestAudit::new();

    audit
        .loggers
        .platform
        .license_overage("system", None, "devices: 12/10")
        .await;

    let entry = audit.formatter.reconstruct(&audit.sink.rows()[0], None);
    assert_eq!(entry.trigger.id, Some(0));
    assert_eq!(entry.trigger.trigger_type, TriggerType::System);
    assert_eq!(entry.trigger.name.as_deref(), Some("FlowHub Platform"));
    assert_eq!(entry.scope.id, None);
    assert_eq!(
        entry.body.get(BodySlot::Info),
        Some(&json!({ "info": "devices: 12/10" }))
    );
}

#[tokio::test]
async fn test_embedded_trigger_reads_back() {
    let audit = TestAudit::new();

    audit
        .loggers
        .user
        .forgot_password("ext-77", Some(ErrorInput::from("no such account")), None)
        .await;

    let rows = audit.sink.rows();
    assert_eq!(rows[0].actor_id, None);

    let entry = audit.formatter.reconstruct(&rows[0], None);
    assert_eq!(entry.trigger.id, None);
    assert_eq!(entry.trigger.external_id.as_deref(), Some("ext-77"));
    assert_eq!(entry.trigger.trigger_type, TriggerType::User);
    assert_eq!(
        entry.body.get(BodySlot::Error),
        Some(&json!({ "code": "unexpected_error", "message": "no such account" }))
    );
}

#[test]
fn test_legacy_bodies_are_upgraded() {
    let formatter = LogEntryFormatter::default();

    let context = legacy_row(
        "project.context.deleted",
        r#"{"project":{"id":"p-1","name":"line"},"key":"count","scope":"global","store":"persistent"}"#,
    );
    let entry = formatter.reconstruct(&context, None);
    assert_eq!(
        entry.body.get(BodySlot::Context),
        Some(&json!({ "key": "count", "scope": "global", "store": "persistent" }))
    );

    let flows = legacy_row("flows.set", r#"{"type":"full"}"#);
    let entry = formatter.reconstruct(&flows, None);
    assert_eq!(entry.body.get(BodySlot::FlowsSet), Some(&json!({ "type": "full" })));

    let failed = legacy_row(
        "project.started",
        r#"{"code":"start_failed","error":"launcher not reachable"}"#,
    );
    let entry = formatter.reconstruct(&failed, None);
    assert_eq!(
        entry.body.get(BodySlot::Error),
        Some(&json!({ "code": "start_failed", "message": "launcher not reachable" }))
    );
}

#[test]
fn test_unreadable_body_is_logged_and_skipped() {
    let (logs, _guard) = capture_logs();
    let formatter = LogEntryFormatter::default();

    let entry = formatter.reconstruct(&legacy_row("project.started", "{not json"), None);

    assert!(entry.body.is_empty());
    assert_eq!(entry.event, "project.started");
    let warnings = logs.warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].field("event"), Some("project.started"));
    assert!(warnings[0].field("error").is_some());
}

#[test]
fn test_reconstruct_all_looks_up_actors() {
    let audit = TestAudit::new();
    let rows = vec![
        legacy_row("project.started", r#"{"project":{"id":"p-1","name":"line"}}"#),
        AuditEventRow {
            actor_id: Some(0),
            ..legacy_row("project.stopped", r#"{"project":{"id":"p-1","name":"line"}}"#)
        },
    ];
    let known = UserRef {
        id: Some(3),
        name: Some("Cara".to_string()),
        ..UserRef::default()
    };

    let entries = audit
        .formatter
        .reconstruct_all(&rows, |id| (id == 3).then_some(&known));

    assert_eq!(entries[0].username.as_deref(), Some("Cara"));
    assert_eq!(entries[1].trigger.trigger_type, TriggerType::System);
}

#[tokio::test]
async fn test_export_of_reconstructed_entries() {
    let audit = TestAudit::new();
    audit.loggers.team.created(1_i64, None, &team()).await;
    audit.loggers.team.deleted(1_i64, None, &team()).await;

    let entries = audit.formatter.reconstruct_all(&audit.sink.rows(), |_| None);
    let mut out = Vec::new();
    write_csv(&entries, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], CSV_HEADERS.join(","));
    assert!(lines[1].contains("team.created"));
    assert!(lines[1].ends_with("2024-06-01T12:00:00.000Z"));
    assert!(lines[2].contains("team.deleted"));
    assert!(lines[2].ends_with("2024-06-01T12:00:01.000Z"));
}
