//! Integration tests for recording audit events through the scoped loggers.

mod helpers;

use std::sync::Arc;

use serde_json::json;

use flowhub::core::config::audit::AuditConfig;
use flowhub::entity::audit::{AuditScope, BodySlot, ScopeType};
use flowhub::entity::device::Device;
use flowhub::entity::project::Project;
use flowhub::entity::team::Team;
use flowhub::entity::user::User;
use flowhub::{Actor, AuditLoggers, AuditValue, ErrorInput, Updates};

use helpers::{FailingSink, TestAudit, capture_logs};

fn team() -> Team {
    Team {
        id: 12,
        external_id: Some("t-12".to_string()),
        name: Some("Line Ops".to_string()),
        slug: Some("line-ops".to_string()),
        ..Team::default()
    }
}

fn admin() -> User {
    User {
        id: 1,
        external_id: Some("u-1".to_string()),
        username: "admin".to_string(),
        name: Some("Ada Admin".to_string()),
        admin: true,
        ..User::default()
    }
}

#[tokio::test]
async fn test_member_added_end_to_end() {
    let audit = TestAudit::new();
    let member = User {
        id: 5,
        username: "bob".to_string(),
        email: Some("bob@example.com".to_string()),
        ..User::default()
    };

    audit
        .loggers
        .team
        .member_added(&admin(), None, &team(), &member, 30)
        .await;

    let events = audit.sink.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event, "team.member.added");
    assert_eq!(events[0].actor_id, Some(1));
    assert_eq!(events[0].scope, AuditScope::team(12));
    assert_eq!(
        events[0].body.clone().into_value(),
        json!({
            "team": { "id": 12, "externalId": "t-12", "name": "Line Ops", "slug": "line-ops" },
            "user": { "id": 5, "name": null, "username": "bob" },
            "role": { "role": "member" },
        })
    );
}

#[tokio::test]
async fn test_sink_failure_logs_one_warning_and_returns() {
    let (logs, _guard) = capture_logs();
    let loggers = AuditLoggers::new(Arc::new(FailingSink), &AuditConfig::default());

    loggers.team.deleted(&admin(), None, &team()).await;

    let warnings = logs.warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].field("scope"), Some("team"));
    assert_eq!(warnings[0].field("event"), Some("team.deleted"));
    assert!(warnings[0].field("error").unwrap().contains("connection refused"));
}

#[tokio::test]
async fn test_successful_write_logs_no_warning() {
    let (logs, _guard) = capture_logs();
    let audit = TestAudit::new();

    audit.loggers.team.created(&admin(), None, &team()).await;

    assert!(logs.warnings().is_empty());
    assert_eq!(audit.sink.events().len(), 1);
}

#[tokio::test]
async fn test_sequential_calls_are_submitted_in_order() {
    let audit = TestAudit::new();
    let device = Device {
        id: 8,
        name: Some("gw".to_string()),
        ..Device::default()
    };

    audit.loggers.device.started("system", None, &device).await;
    audit.loggers.device.stopped("system", None, &device).await;
    audit.loggers.device.restarted("system", None, &device).await;

    let names: Vec<String> = audit.sink.events().into_iter().map(|e| e.event).collect();
    assert_eq!(names, ["device.started", "device.stopped", "device.restarted"]);
}

#[tokio::test]
async fn test_concurrent_callers_each_record_once() {
    let audit = TestAudit::new();
    let device = Device {
        id: 8,
        ..Device::default()
    };
    let team = team();

    tokio::join!(
        audit.loggers.device.started(1_i64, None, &device),
        audit.loggers.team.created(2_i64, None, &team),
        audit.loggers.platform.license_overage(0_i64, None, "devices: 12/10"),
    );

    let mut scopes: Vec<ScopeType> = audit
        .sink
        .events()
        .into_iter()
        .map(|e| e.scope.scope_type)
        .collect();
    scopes.sort_by_key(|scope| scope.as_str());
    assert_eq!(scopes, [ScopeType::Device, ScopeType::Platform, ScopeType::Team]);
}

#[tokio::test]
async fn test_diffed_settings_are_redacted_at_any_depth() {
    let audit = TestAudit::new();
    let project = Project {
        name: Some("line-4".to_string()),
        ..Project::default()
    };
    let before = AuditValue::from(json!({
        "env": [{ "name": "MQTT_HOST", "value": "broker" }],
        "smtp": { "host": "mail", "password": "hunter2" },
        "httpAdminRoot": "/admin",
    }));
    let after = AuditValue::from(json!({
        "env": [{ "name": "MQTT_HOST", "value": "broker-2" }],
        "smtp": { "host": "mail", "password": "correct-horse" },
        "httpAdminRoot": "/admin",
    }));
    let mut updates = Updates::new();
    updates.push_differences(&before, &after).unwrap();

    audit
        .loggers
        .project
        .settings_updated(&admin(), None, &project, updates)
        .await;

    let body = &audit.sink.events()[0].body;
    assert_eq!(
        body.get(BodySlot::Updates),
        Some(&json!([
            { "key": "env[0].value", "old": "broker", "new": "broker-2", "diffKind": "updated" },
            { "key": "smtp.password", "old": "***", "new": "***", "diffKind": "updated" },
        ]))
    );
    let stored = serde_json::to_string(body).unwrap();
    assert!(!stored.contains("hunter2"));
    assert!(!stored.contains("correct-horse"));
}

#[tokio::test]
async fn test_configured_keys_mask_and_platform_name() {
    let config = AuditConfig {
        platform_name: "Acme Cloud".to_string(),
        sensitive_keys: vec!["apiKey".to_string()],
        redaction_mask: "[redacted]".to_string(),
    };
    let audit = TestAudit::with_config(config);
    let mut updates = Updates::new();
    updates.push("broker.apiKey", "k1", "k2");
    updates.push("broker.password", "p1", "p2");

    audit
        .loggers
        .platform
        .settings_updated(Actor::System, None, updates)
        .await;

    let rows = audit.sink.rows();
    let updates = &audit.sink.events()[0].body;
    let updates = updates.get(BodySlot::Updates).unwrap();
    assert_eq!(updates[0]["new"], "[redacted]");
    assert_eq!(updates[1]["new"], "p2");

    let entry = audit.formatter.reconstruct(&rows[0], None);
    assert_eq!(entry.trigger.name.as_deref(), Some("Acme Cloud"));
}

#[tokio::test]
async fn test_unattributable_failure_embeds_trigger() {
    let audit = TestAudit::new();

    audit
        .loggers
        .user
        .login("ext-unknown", Some(ErrorInput::from("invalid password")), None)
        .await;

    let events = audit.sink.events();
    assert_eq!(events[0].actor_id, None);
    assert_eq!(events[0].scope.scope_type, ScopeType::User);
    let body = events[0].body.clone().into_value();
    assert_eq!(body["trigger"]["externalId"], "ext-unknown");
    assert_eq!(body["trigger"]["type"], "user");
    assert_eq!(
        body["error"],
        json!({ "code": "unexpected_error", "message": "invalid password" })
    );
}
