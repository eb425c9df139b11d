//! Hosted instance events.

use std::sync::Arc;

use serde_json::Value;

use flowhub_audit::{Actor, BodyInput, ErrorInput, UpdatesInput};
use flowhub_entity::application::Application;
use flowhub_entity::audit::AuditScope;
use flowhub_entity::project::{Project, ProjectType, Snapshot, Stack};
use flowhub_entity::team::Team;

use super::recorder::AuditRecorder;

/// Records `project.*` events, filed under the instance.
#[derive(Debug, Clone)]
pub struct ProjectAuditLogger {
    recorder: Arc<AuditRecorder>,
}

impl ProjectAuditLogger {
    /// Creates a new instance audit logger.
    pub fn new(recorder: Arc<AuditRecorder>) -> Self {
        Self { recorder }
    }

    async fn log(
        &self,
        event: &str,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        project: &Project,
        input: BodyInput,
    ) {
        self.recorder
            .record(
                AuditScope::project(project.id),
                event,
                actor.into(),
                input.project(project).maybe_error(error),
            )
            .await;
    }

    /// Records `project.created`.
    pub async fn created(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        project: &Project,
        application: &Application,
        team: &Team,
    ) {
        self.log(
            "project.created",
            actor,
            error,
            project,
            BodyInput::new().team(team).application(application),
        )
        .await;
    }

    /// Records `project.deleted`.
    pub async fn deleted(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        project: &Project,
        application: &Application,
        team: &Team,
    ) {
        self.log(
            "project.deleted",
            actor,
            error,
            project,
            BodyInput::new().team(team).application(application),
        )
        .await;
    }

    /// Records `project.started`.
    pub async fn started(&self, actor: impl Into<Actor>, error: Option<ErrorInput>, project: &Project) {
        self.log("project.started", actor, error, project, BodyInput::new()).await;
    }

    /// Records `project.stopped`.
    pub async fn stopped(&self, actor: impl Into<Actor>, error: Option<ErrorInput>, project: &Project) {
        self.log("project.stopped", actor, error, project, BodyInput::new()).await;
    }

    /// Records `project.restarted`.
    pub async fn restarted(&self, actor: impl Into<Actor>, error: Option<ErrorInput>, project: &Project) {
        self.log("project.restarted", actor, error, project, BodyInput::new()).await;
    }

    /// Records `project.suspended`.
    pub async fn suspended(&self, actor: impl Into<Actor>, error: Option<ErrorInput>, project: &Project) {
        self.log("project.suspended", actor, error, project, BodyInput::new()).await;
    }

    /// An instance was copied. Filed under `target`.
    pub async fn copied(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        source: &Project,
        target: &Project,
    ) {
        self.log(
            "project.copied",
            actor,
            error,
            target,
            BodyInput::new().source_project(source).target_project(target),
        )
        .await;
    }

    /// Flows were imported into `target`, from `source` when the import came
    /// from another instance.
    pub async fn imported(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        source: Option<&Project>,
        target: &Project,
    ) {
        let input = BodyInput::new().target_project(target);
        let input = match source {
            Some(source) => input.source_project(source),
            None => input,
        };
        self.log("project.imported", actor, error, target, input).await;
    }

    /// Records `project.settings.updated`.
    pub async fn settings_updated(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        project: &Project,
        updates: impl Into<UpdatesInput>,
    ) {
        self.log(
            "project.settings.updated",
            actor,
            error,
            project,
            BodyInput::new().updates(updates),
        )
        .await;
    }

    /// Records `project.stack.changed`.
    pub async fn stack_changed(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        project: &Project,
        stack: &Stack,
    ) {
        self.log("project.stack.changed", actor, error, project, BodyInput::new().stack(stack))
            .await;
    }

    /// Records `project.type.changed`.
    pub async fn type_changed(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        project: &Project,
        project_type: &ProjectType,
    ) {
        self.log(
            "project.type.changed",
            actor,
            error,
            project,
            BodyInput::new().project_type(project_type),
        )
        .await;
    }

    /// Records `project.snapshot.created`.
    pub async fn snapshot_created(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        project: &Project,
        snapshot: &Snapshot,
    ) {
        self.log(
            "project.snapshot.created",
            actor,
            error,
            project,
            BodyInput::new().snapshot(snapshot),
        )
        .await;
    }

    /// Records `project.snapshot.rolled-back`.
    pub async fn snapshot_rolled_back(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        project: &Project,
        snapshot: &Snapshot,
    ) {
        self.log(
            "project.snapshot.rolled-back",
            actor,
            error,
            project,
            BodyInput::new().snapshot(snapshot),
        )
        .await;
    }

    /// Records `project.snapshot.deleted`.
    pub async fn snapshot_deleted(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        project: &Project,
        snapshot: &Snapshot,
    ) {
        self.log(
            "project.snapshot.deleted",
            actor,
            error,
            project,
            BodyInput::new().snapshot(snapshot),
        )
        .await;
    }

    /// The runtime exited unexpectedly.
    pub async fn crashed(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        project: &Project,
        info: impl Into<Value>,
    ) {
        self.log("project.crashed", actor, error, project, BodyInput::new().info(info))
            .await;
    }

    /// The runtime restarted with flows disabled.
    pub async fn safe_mode(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        project: &Project,
        info: impl Into<Value>,
    ) {
        self.log("project.safe-mode", actor, error, project, BodyInput::new().info(info))
            .await;
    }

    /// CPU usage stayed above `threshold` percent for `interval` minutes.
    pub async fn resource_cpu(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        project: &Project,
        interval: impl Into<Value>,
        threshold: impl Into<Value>,
    ) {
        self.log(
            "project.resource.cpu",
            actor,
            error,
            project,
            BodyInput::new().interval(interval).threshold(threshold),
        )
        .await;
    }

    /// Memory usage stayed above `threshold` percent for `interval` minutes.
    pub async fn resource_memory(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        project: &Project,
        interval: impl Into<Value>,
        threshold: impl Into<Value>,
    ) {
        self.log(
            "project.resource.memory",
            actor,
            error,
            project,
            BodyInput::new().interval(interval).threshold(threshold),
        )
        .await;
    }

    /// Context-store entries were deleted. `context` is
    /// `{ key, scope, store }`.
    pub async fn context_deleted(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        project: &Project,
        context: Value,
    ) {
        self.log(
            "project.context.deleted",
            actor,
            error,
            project,
            BodyInput::new().context(context),
        )
        .await;
    }

    /// New flows were deployed to the instance.
    pub async fn flows_set(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        project: &Project,
        flows_set: Value,
    ) {
        self.log("flows.set", actor, error, project, BodyInput::new().flows_set(flows_set))
            .await;
    }
}
