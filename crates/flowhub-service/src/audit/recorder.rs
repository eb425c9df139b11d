//! Shared dispatch core of the per-scope audit loggers.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use flowhub_audit::{Actor, AuditEventSink, BodyBuilder, BodyInput, TriggerResolver};
use flowhub_core::config::audit::AuditConfig;
use flowhub_entity::audit::{AuditScope, BodySlot, NewAuditEvent, Trigger};
use flowhub_entity::user::UserRef;

/// Normalizes one event and submits it to the sink.
///
/// Recording never fails from the caller's point of view: sink errors are
/// logged and dropped so that audit logging cannot abort the operation
/// being audited.
#[derive(Clone)]
pub struct AuditRecorder {
    sink: Arc<dyn AuditEventSink>,
    builder: BodyBuilder,
    resolver: TriggerResolver,
}

impl AuditRecorder {
    /// Creates a recorder writing to `sink`.
    pub fn new(sink: Arc<dyn AuditEventSink>, config: &AuditConfig) -> Self {
        Self {
            sink,
            builder: BodyBuilder::from_config(config),
            resolver: TriggerResolver::from_config(config),
        }
    }

    /// Resolves `actor` into a trigger.
    pub fn resolve(&self, actor: &Actor, companion: Option<&UserRef>) -> Trigger {
        self.resolver.resolve(actor, companion)
    }

    /// Records `event` under `scope`.
    pub async fn record(&self, scope: AuditScope, event: &str, actor: Actor, input: BodyInput) {
        self.record_as(scope, event, actor, None, input).await;
    }

    /// Records `event` under `scope`, using `companion` to fill in actor
    /// details the reference itself lacks.
    pub async fn record_as(
        &self,
        scope: AuditScope,
        event: &str,
        actor: Actor,
        companion: Option<&UserRef>,
        input: BodyInput,
    ) {
        let trigger = self.resolver.resolve(&actor, companion);
        let (actor_id, input) = if trigger.has_storable_id() {
            (trigger.id, input)
        } else {
            (None, input.with_entity(BodySlot::Trigger, &trigger))
        };
        let body = self.builder.build(input);

        let scope_type = scope.scope_type;
        let scope_id = scope.id.clone();
        debug!(
            scope = %scope_type,
            scope_id = ?scope_id,
            event,
            actor_id = ?actor_id,
            slots = body.len(),
            "Submitting audit event"
        );

        let record = NewAuditEvent {
            scope,
            actor_id,
            event: event.to_string(),
            body,
        };
        if let Err(e) = self.sink.record(record).await {
            warn!(
                scope = %scope_type,
                scope_id = ?scope_id,
                event,
                error = %e,
                "Failed to record audit event"
            );
        }
    }
}

impl fmt::Debug for AuditRecorder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuditRecorder")
            .field("builder", &self.builder)
            .field("resolver", &self.resolver)
            .finish_non_exhaustive()
    }
}
