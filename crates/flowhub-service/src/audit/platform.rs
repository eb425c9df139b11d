//! Platform-wide administration events.

use std::sync::Arc;

use serde_json::Value;

use flowhub_audit::{Actor, BodyInput, ErrorInput, UpdatesInput};
use flowhub_entity::audit::AuditScope;
use flowhub_entity::project::{ProjectType, Stack};

use super::recorder::AuditRecorder;

/// Records `platform.*` events. These carry no scope id.
#[derive(Debug, Clone)]
pub struct PlatformAuditLogger {
    recorder: Arc<AuditRecorder>,
}

impl PlatformAuditLogger {
    /// Creates a new platform audit logger.
    pub fn new(recorder: Arc<AuditRecorder>) -> Self {
        Self { recorder }
    }

    async fn log(&self, event: &str, actor: impl Into<Actor>, error: Option<ErrorInput>, input: BodyInput) {
        self.recorder
            .record(AuditScope::platform(), event, actor.into(), input.maybe_error(error))
            .await;
    }

    /// Platform settings changed.
    pub async fn settings_updated(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        updates: impl Into<UpdatesInput>,
    ) {
        self.log("platform.settings.updated", actor, error, BodyInput::new().updates(updates))
            .await;
    }

    /// A license was applied. `license` is the raw key or a license object.
    pub async fn license_applied(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        license: impl Into<Value>,
    ) {
        self.log("platform.license.applied", actor, error, BodyInput::new().license(license))
            .await;
    }

    /// Usage exceeded the licensed limits.
    pub async fn license_overage(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        info: impl Into<Value>,
    ) {
        self.log("platform.license.overage", actor, error, BodyInput::new().info(info))
            .await;
    }

    /// Records `platform.stack.created`.
    pub async fn stack_created(&self, actor: impl Into<Actor>, error: Option<ErrorInput>, stack: &Stack) {
        self.log("platform.stack.created", actor, error, BodyInput::new().stack(stack))
            .await;
    }

    /// Records `platform.stack.updated`.
    pub async fn stack_updated(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        stack: &Stack,
        updates: impl Into<UpdatesInput>,
    ) {
        self.log(
            "platform.stack.updated",
            actor,
            error,
            BodyInput::new().stack(stack).updates(updates),
        )
        .await;
    }

    /// Records `platform.stack.deleted`.
    pub async fn stack_deleted(&self, actor: impl Into<Actor>, error: Option<ErrorInput>, stack: &Stack) {
        self.log("platform.stack.deleted", actor, error, BodyInput::new().stack(stack))
            .await;
    }

    /// Records `platform.project-type.created`.
    pub async fn project_type_created(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        project_type: &ProjectType,
    ) {
        self.log(
            "platform.project-type.created",
            actor,
            error,
            BodyInput::new().project_type(project_type),
        )
        .await;
    }

    /// Records `platform.project-type.updated`.
    pub async fn project_type_updated(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        project_type: &ProjectType,
        updates: impl Into<UpdatesInput>,
    ) {
        self.log(
            "platform.project-type.updated",
            actor,
            error,
            BodyInput::new().project_type(project_type).updates(updates),
        )
        .await;
    }

    /// Records `platform.project-type.deleted`.
    pub async fn project_type_deleted(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        project_type: &ProjectType,
    ) {
        self.log(
            "platform.project-type.deleted",
            actor,
            error,
            BodyInput::new().project_type(project_type),
        )
        .await;
    }
}
