//! Remote device events.

use std::sync::Arc;

use serde_json::Value;

use flowhub_audit::{Actor, BodyInput, ErrorInput, UpdatesInput};
use flowhub_entity::application::{Application, Pipeline};
use flowhub_entity::audit::AuditScope;
use flowhub_entity::device::Device;
use flowhub_entity::project::{Project, Snapshot};

use super::recorder::AuditRecorder;

/// Records `device.*` events, filed under the device.
#[derive(Debug, Clone)]
pub struct DeviceAuditLogger {
    recorder: Arc<AuditRecorder>,
}

impl DeviceAuditLogger {
    /// Creates a new device audit logger.
    pub fn new(recorder: Arc<AuditRecorder>) -> Self {
        Self { recorder }
    }

    async fn log(
        &self,
        event: &str,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        device: &Device,
        input: BodyInput,
    ) {
        self.recorder
            .record(
                AuditScope::device(device.id),
                event,
                actor.into(),
                input.device(device).maybe_error(error),
            )
            .await;
    }

    /// Records `device.started`.
    pub async fn started(&self, actor: impl Into<Actor>, error: Option<ErrorInput>, device: &Device) {
        self.log("device.started", actor, error, device, BodyInput::new()).await;
    }

    /// Records `device.stopped`.
    pub async fn stopped(&self, actor: impl Into<Actor>, error: Option<ErrorInput>, device: &Device) {
        self.log("device.stopped", actor, error, device, BodyInput::new()).await;
    }

    /// Records `device.restarted`.
    pub async fn restarted(&self, actor: impl Into<Actor>, error: Option<ErrorInput>, device: &Device) {
        self.log("device.restarted", actor, error, device, BodyInput::new()).await;
    }

    /// Records `device.suspended`.
    pub async fn suspended(&self, actor: impl Into<Actor>, error: Option<ErrorInput>, device: &Device) {
        self.log("device.suspended", actor, error, device, BodyInput::new()).await;
    }

    /// Records `device.credentials.generated`.
    pub async fn credentials_generated(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        device: &Device,
    ) {
        self.log("device.credentials.generated", actor, error, device, BodyInput::new())
            .await;
    }

    /// Developer mode was switched on or off.
    pub async fn developer_mode(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        device: &Device,
        enabled: bool,
    ) {
        let event = if enabled {
            "device.developer-mode.enabled"
        } else {
            "device.developer-mode.disabled"
        };
        self.log(event, actor, error, device, BodyInput::new()).await;
    }

    /// Remote editor access was switched on or off.
    pub async fn remote_access(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        device: &Device,
        enabled: bool,
    ) {
        let event = if enabled {
            "device.remote-access.enabled"
        } else {
            "device.remote-access.disabled"
        };
        self.log(event, actor, error, device, BodyInput::new()).await;
    }

    /// Records `device.settings.updated`.
    pub async fn settings_updated(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        device: &Device,
        updates: impl Into<UpdatesInput>,
    ) {
        self.log(
            "device.settings.updated",
            actor,
            error,
            device,
            BodyInput::new().updates(updates),
        )
        .await;
    }

    /// Records `device.snapshot.deployed`.
    pub async fn snapshot_deployed(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        device: &Device,
        snapshot: &Snapshot,
    ) {
        self.log(
            "device.snapshot.deployed",
            actor,
            error,
            device,
            BodyInput::new().snapshot(snapshot),
        )
        .await;
    }

    /// Records `device.pipeline.deployed`.
    pub async fn pipeline_deployed(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        device: &Device,
        pipeline: &Pipeline,
        snapshot: &Snapshot,
    ) {
        self.log(
            "device.pipeline.deployed",
            actor,
            error,
            device,
            BodyInput::new().pipeline(pipeline).snapshot(snapshot),
        )
        .await;
    }

    /// The device was assigned to an instance, or unassigned when `project`
    /// is `None`.
    pub async fn project_changed(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        device: &Device,
        project: Option<&Project>,
    ) {
        let input = match project {
            Some(project) => BodyInput::new().project(project),
            None => BodyInput::new(),
        };
        self.log("device.project.changed", actor, error, device, input).await;
    }

    /// The device was assigned to an application, or unassigned when
    /// `application` is `None`.
    pub async fn application_changed(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        device: &Device,
        application: Option<&Application>,
    ) {
        let input = match application {
            Some(application) => BodyInput::new().application(application),
            None => BodyInput::new(),
        };
        self.log("device.application.changed", actor, error, device, input)
            .await;
    }

    /// New flows were deployed to the device.
    pub async fn flows_set(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        device: &Device,
        flows_set: Value,
    ) {
        self.log("flows.set", actor, error, device, BodyInput::new().flows_set(flows_set))
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowhub_entity::audit::{BodySlot, ScopeType};
    use serde_json::json;

    use crate::audit::recorder::tests::recorder;

    fn device() -> Device {
        Device {
            id: 15,
            external_id: Some("d-15".to_string()),
            name: Some("press-ctl".to_string()),
            credential_secret: Some("ffd_secret".to_string()),
            ..Device::default()
        }
    }

    #[tokio::test]
    async fn test_toggle_events() {
        let (sink, recorder) = recorder();
        let logger = DeviceAuditLogger::new(Arc::new(recorder));

        logger.developer_mode(3_i64, None, &device(), true).await;
        logger.developer_mode(3_i64, None, &device(), false).await;
        logger.remote_access(3_i64, None, &device(), true).await;

        let names: Vec<String> = sink.take().into_iter().map(|e| e.event).collect();
        assert_eq!(
            names,
            [
                "device.developer-mode.enabled",
                "device.developer-mode.disabled",
                "device.remote-access.enabled",
            ]
        );
    }

    #[tokio::test]
    async fn test_credentials_never_reach_the_body() {
        let (sink, recorder) = recorder();
        let logger = DeviceAuditLogger::new(Arc::new(recorder));

        logger.credentials_generated(3_i64, None, &device()).await;

        let events = sink.take();
        assert_eq!(events[0].scope.scope_type, ScopeType::Device);
        assert_eq!(events[0].scope.id.as_deref(), Some("15"));
        assert_eq!(
            events[0].body.get(BodySlot::Device),
            Some(&json!({ "id": 15, "externalId": "d-15", "name": "press-ctl" }))
        );
        assert!(!serde_json::to_string(&events[0].body).unwrap().contains("ffd_secret"));
    }

    #[tokio::test]
    async fn test_unassigned_from_project() {
        let (sink, recorder) = recorder();
        let logger = DeviceAuditLogger::new(Arc::new(recorder));

        logger.project_changed(3_i64, None, &device(), None).await;

        let events = sink.take();
        assert_eq!(events[0].event, "device.project.changed");
        assert!(!events[0].body.contains(BodySlot::Project));
    }
}
