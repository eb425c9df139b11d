//! Application, pipeline and device-group events.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use flowhub_audit::{Actor, BodyInput, ErrorInput, UpdatesInput};
use flowhub_entity::application::{Application, Pipeline, PipelineStage};
use flowhub_entity::audit::AuditScope;
use flowhub_entity::device::DeviceGroup;

use super::recorder::AuditRecorder;

/// Records `application.*` events, filed under the application.
#[derive(Debug, Clone)]
pub struct ApplicationAuditLogger {
    recorder: Arc<AuditRecorder>,
}

impl ApplicationAuditLogger {
    /// Creates a new application audit logger.
    pub fn new(recorder: Arc<AuditRecorder>) -> Self {
        Self { recorder }
    }

    async fn log(
        &self,
        event: &str,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        application: &Application,
        input: BodyInput,
    ) {
        self.recorder
            .record(
                AuditScope::application(application.id),
                event,
                actor.into(),
                input.application(application).maybe_error(error),
            )
            .await;
    }

    /// Records `application.created`.
    pub async fn created(&self, actor: impl Into<Actor>, error: Option<ErrorInput>, application: &Application) {
        self.log("application.created", actor, error, application, BodyInput::new())
            .await;
    }

    /// Records `application.updated`.
    pub async fn updated(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        application: &Application,
        updates: impl Into<UpdatesInput>,
    ) {
        self.log(
            "application.updated",
            actor,
            error,
            application,
            BodyInput::new().updates(updates),
        )
        .await;
    }

    /// Records `application.deleted`.
    pub async fn deleted(&self, actor: impl Into<Actor>, error: Option<ErrorInput>, application: &Application) {
        self.log("application.deleted", actor, error, application, BodyInput::new())
            .await;
    }

    /// Records `application.pipeline.created`.
    pub async fn pipeline_created(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        application: &Application,
        pipeline: &Pipeline,
    ) {
        self.log(
            "application.pipeline.created",
            actor,
            error,
            application,
            BodyInput::new().pipeline(pipeline),
        )
        .await;
    }

    /// Records `application.pipeline.renamed`.
    pub async fn pipeline_renamed(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        application: &Application,
        pipeline: &Pipeline,
        updates: impl Into<UpdatesInput>,
    ) {
        self.log(
            "application.pipeline.renamed",
            actor,
            error,
            application,
            BodyInput::new().pipeline(pipeline).updates(updates),
        )
        .await;
    }

    /// Records `application.pipeline.deleted`.
    pub async fn pipeline_deleted(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        application: &Application,
        pipeline: &Pipeline,
    ) {
        self.log(
            "application.pipeline.deleted",
            actor,
            error,
            application,
            BodyInput::new().pipeline(pipeline),
        )
        .await;
    }

    /// Records `application.pipeline.stage-added`.
    pub async fn pipeline_stage_added(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        application: &Application,
        pipeline: &Pipeline,
        stage: &PipelineStage,
    ) {
        self.log(
            "application.pipeline.stage-added",
            actor,
            error,
            application,
            BodyInput::new().pipeline(pipeline).pipeline_stage(stage),
        )
        .await;
    }

    /// A stage was deployed. `target` is the instance or device deployed
    /// to.
    pub async fn pipeline_stage_deployed(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        application: &Application,
        pipeline: &Pipeline,
        stage: &PipelineStage,
        target: &impl Serialize,
    ) {
        self.log(
            "application.pipeline.stage-deployed",
            actor,
            error,
            application,
            BodyInput::new()
                .pipeline(pipeline)
                .pipeline_stage(stage)
                .pipeline_stage_target(target),
        )
        .await;
    }

    /// Records `application.device-group.created`.
    pub async fn device_group_created(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        application: &Application,
        group: &DeviceGroup,
    ) {
        self.log(
            "application.device-group.created",
            actor,
            error,
            application,
            BodyInput::new().device_group(group),
        )
        .await;
    }

    /// Records `application.device-group.updated`.
    pub async fn device_group_updated(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        application: &Application,
        group: &DeviceGroup,
        updates: impl Into<UpdatesInput>,
    ) {
        self.log(
            "application.device-group.updated",
            actor,
            error,
            application,
            BodyInput::new().device_group(group).updates(updates),
        )
        .await;
    }

    /// Records `application.device-group.deleted`.
    pub async fn device_group_deleted(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        application: &Application,
        group: &DeviceGroup,
    ) {
        self.log(
            "application.device-group.deleted",
            actor,
            error,
            application,
            BodyInput::new().device_group(group),
        )
        .await;
    }

    /// Devices were added to or removed from a group. `info` describes the
    /// change (e.g. `{ "added": 2, "removed": 1 }`).
    pub async fn device_group_members_changed(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        application: &Application,
        group: &DeviceGroup,
        info: impl Into<Value>,
    ) {
        self.log(
            "application.device-group.members-changed",
            actor,
            error,
            application,
            BodyInput::new().device_group(group).info(info),
        )
        .await;
    }
}
