//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Registry;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use uuid::Uuid;

use flowhub::core::config::audit::AuditConfig;
use flowhub::entity::audit::{AuditEventRow, NewAuditEvent};
use flowhub::{AppError, AppResult, AuditEventSink, AuditLoggers, LogEntryFormatter};

/// Sink keeping every recorded event in memory, in submission order.
#[derive(Default)]
pub struct MemorySink {
    events: Mutex<Vec<NewAuditEvent>>,
}

impl MemorySink {
    pub fn events(&self) -> Vec<NewAuditEvent> {
        self.events.lock().unwrap().clone()
    }

    /// The recorded events as the database would return them.
    pub fn rows(&self) -> Vec<AuditEventRow> {
        self.events()
            .into_iter()
            .enumerate()
            .map(|(i, event)| stored_row(&event, i as u32))
            .collect()
    }
}

#[async_trait]
impl AuditEventSink for MemorySink {
    async fn record(&self, event: NewAuditEvent) -> AppResult<()> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}

/// Sink rejecting every write.
pub struct FailingSink;

#[async_trait]
impl AuditEventSink for FailingSink {
    async fn record(&self, _event: NewAuditEvent) -> AppResult<()> {
        Err(AppError::database("audit_events: connection refused"))
    }
}

/// Convert an event into the row the repository would store for it.
pub fn stored_row(event: &NewAuditEvent, seq: u32) -> AuditEventRow {
    AuditEventRow {
        id: Uuid::from_u128(seq as u128 + 1),
        actor_id: event.actor_id,
        event: event.event.clone(),
        scope_type: event.scope.scope_type,
        scope_id: event.scope.id.clone(),
        body: (!event.body.is_empty()).then(|| serde_json::to_string(&event.body).unwrap()),
        created_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, seq / 60, seq % 60).unwrap(),
    }
}

/// Loggers wired to an in-memory sink.
pub struct TestAudit {
    pub sink: Arc<MemorySink>,
    pub loggers: AuditLoggers,
    pub formatter: LogEntryFormatter,
}

impl TestAudit {
    pub fn new() -> Self {
        Self::with_config(AuditConfig::default())
    }

    pub fn with_config(config: AuditConfig) -> Self {
        let sink = Arc::new(MemorySink::default());
        Self {
            loggers: AuditLoggers::new(sink.clone(), &config),
            formatter: LogEntryFormatter::from_config(&config),
            sink,
        }
    }
}

/// A captured tracing event.
#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub level: Level,
    pub fields: HashMap<String, String>,
}

impl CapturedEvent {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

#[derive(Default)]
struct FieldVisitor {
    fields: HashMap<String, String>,
}

impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.fields.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        self.fields
            .insert(field.name().to_string(), format!("{value:?}"));
    }
}

/// Layer storing every event it sees.
#[derive(Clone, Default)]
pub struct CaptureLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl CaptureLayer {
    /// Events at `level`.
    pub fn at(&self, level: Level) -> Vec<CapturedEvent> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|event| event.level == level)
            .cloned()
            .collect()
    }

    pub fn warnings(&self) -> Vec<CapturedEvent> {
        self.at(Level::WARN)
    }
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            fields: visitor.fields,
        });
    }
}

/// Capture tracing events on the current thread until the guard drops.
pub fn capture_logs() -> (CaptureLayer, tracing::subscriber::DefaultGuard) {
    let layer = CaptureLayer::default();
    let subscriber = Registry::default().with(layer.clone());
    let guard = tracing::subscriber::set_default(subscriber);
    (layer, guard)
}
