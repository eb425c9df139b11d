//! Team membership, settings, device and billing events.

use std::sync::Arc;

use flowhub_audit::{Actor, BodyInput, ErrorInput, UpdatesInput};
use flowhub_entity::audit::AuditScope;
use flowhub_entity::billing::{BillingSession, Subscription};
use flowhub_entity::device::Device;
use flowhub_entity::team::Team;
use flowhub_entity::user::User;

use super::recorder::AuditRecorder;

/// Records `team.*` events, filed under the team.
#[derive(Debug, Clone)]
pub struct TeamAuditLogger {
    recorder: Arc<AuditRecorder>,
}

impl TeamAuditLogger {
    /// Creates a new team audit logger.
    pub fn new(recorder: Arc<AuditRecorder>) -> Self {
        Self { recorder }
    }

    async fn log(
        &self,
        event: &str,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        team: &Team,
        input: BodyInput,
    ) {
        self.recorder
            .record(
                AuditScope::team(team.id),
                event,
                actor.into(),
                input.team(team).maybe_error(error),
            )
            .await;
    }

    /// Records `team.created`.
    pub async fn created(&self, actor: impl Into<Actor>, error: Option<ErrorInput>, team: &Team) {
        self.log("team.created", actor, error, team, BodyInput::new()).await;
    }

    /// Records `team.deleted`.
    pub async fn deleted(&self, actor: impl Into<Actor>, error: Option<ErrorInput>, team: &Team) {
        self.log("team.deleted", actor, error, team, BodyInput::new()).await;
    }

    /// Records `team.settings.updated`.
    pub async fn settings_updated(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        team: &Team,
        updates: impl Into<UpdatesInput>,
    ) {
        self.log(
            "team.settings.updated",
            actor,
            error,
            team,
            BodyInput::new().updates(updates),
        )
        .await;
    }

    /// The team moved to a different team type (plan).
    pub async fn type_changed(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        team: &Team,
        updates: impl Into<UpdatesInput>,
    ) {
        self.log("team.type.changed", actor, error, team, BodyInput::new().updates(updates))
            .await;
    }

    /// `role` is the member's numeric role level.
    pub async fn member_added(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        team: &Team,
        user: &User,
        role: i64,
    ) {
        self.log(
            "team.member.added",
            actor,
            error,
            team,
            BodyInput::new().user(user).role(role),
        )
        .await;
    }

    /// Records `team.member.removed`.
    pub async fn member_removed(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        team: &Team,
        user: &User,
        role: i64,
    ) {
        self.log(
            "team.member.removed",
            actor,
            error,
            team,
            BodyInput::new().user(user).role(role),
        )
        .await;
    }

    /// Records `team.member.role-changed`.
    pub async fn member_role_changed(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        team: &Team,
        user: &User,
        updates: impl Into<UpdatesInput>,
    ) {
        self.log(
            "team.member.role-changed",
            actor,
            error,
            team,
            BodyInput::new().user(user).updates(updates),
        )
        .await;
    }

    /// Records `team.member.invited`.
    pub async fn member_invited(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        team: &Team,
        invitee: &User,
        role: i64,
    ) {
        self.log(
            "team.member.invited",
            actor,
            error,
            team,
            BodyInput::new().user(invitee).role(role),
        )
        .await;
    }

    /// Records `team.invite.removed`.
    pub async fn invite_removed(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        team: &Team,
        invitee: &User,
        role: i64,
    ) {
        self.log(
            "team.invite.removed",
            actor,
            error,
            team,
            BodyInput::new().user(invitee).role(role),
        )
        .await;
    }

    /// Records `team.device.created`.
    pub async fn device_created(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        team: &Team,
        device: &Device,
    ) {
        self.log("team.device.created", actor, error, team, BodyInput::new().device(device))
            .await;
    }

    /// Records `team.device.deleted`.
    pub async fn device_deleted(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        team: &Team,
        device: &Device,
    ) {
        self.log("team.device.deleted", actor, error, team, BodyInput::new().device(device))
            .await;
    }

    /// Records `team.billing.session-created`.
    pub async fn billing_session_created(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        team: &Team,
        session: &BillingSession,
    ) {
        self.log(
            "team.billing.session-created",
            actor,
            error,
            team,
            BodyInput::new().billing_session(session),
        )
        .await;
    }

    /// Records `team.billing.subscription-updated`.
    pub async fn billing_subscription_updated(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        team: &Team,
        subscription: &Subscription,
        updates: impl Into<UpdatesInput>,
    ) {
        self.log(
            "team.billing.subscription-updated",
            actor,
            error,
            team,
            BodyInput::new().subscription(subscription).updates(updates),
        )
        .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowhub_audit::Updates;
    use flowhub_entity::audit::{BodySlot, DiffKind, UpdateRecord};
    use serde_json::json;

    use crate::audit::recorder::tests::recorder;

    fn team() -> Team {
        Team {
            id: 12,
            external_id: Some("t-12".to_string()),
            name: Some("Line Ops".to_string()),
            slug: Some("line-ops".to_string()),
            team_type: Some("enterprise".to_string()),
            ..Team::default()
        }
    }

    fn bob() -> User {
        User {
            id: 5,
            username: "bob".to_string(),
            ..User::default()
        }
    }

    #[tokio::test]
    async fn test_member_added_body_in_canonical_order() {
        let (sink, recorder) = recorder();
        let logger = TeamAuditLogger::new(Arc::new(recorder));

        logger.member_added(1_i64, None, &team(), &bob(), 30).await;

        let events = sink.take();
        assert_eq!(events[0].event, "team.member.added");
        assert_eq!(events[0].scope, AuditScope::team(12));
        let keys: Vec<&String> = events[0].body.as_map().keys().collect();
        assert_eq!(keys, ["team", "user", "role"]);
        assert_eq!(events[0].body.get(BodySlot::Role), Some(&json!({ "role": "member" })));
        assert_eq!(
            events[0].body.get(BodySlot::Team),
            Some(&json!({ "id": 12, "externalId": "t-12", "name": "Line Ops", "slug": "line-ops" }))
        );
    }

    #[tokio::test]
    async fn test_role_change_records_updates() {
        let (sink, recorder) = recorder();
        let logger = TeamAuditLogger::new(Arc::new(recorder));
        let change = UpdateRecord::new("role", Some(json!(30)), Some(json!(50)), DiffKind::Updated);

        logger
            .member_role_changed(1_i64, None, &team(), &bob(), vec![change])
            .await;

        let events = sink.take();
        assert_eq!(events[0].body.get(BodySlot::Updates).unwrap()[0]["new"], 50);
    }

    #[tokio::test]
    async fn test_billing_subscription_updated() {
        let (sink, recorder) = recorder();
        let logger = TeamAuditLogger::new(Arc::new(recorder));
        let subscription = Subscription {
            subscription: "sub_9".to_string(),
            customer: Some("cus_1".to_string()),
            ..Subscription::default()
        };

        logger
            .billing_subscription_updated("system", None, &team(), &subscription, Updates::new())
            .await;

        let events = sink.take();
        assert_eq!(events[0].actor_id, Some(0));
        assert_eq!(events[0].body.get(BodySlot::Subscription), Some(&json!({ "subscription": "sub_9" })));
        assert!(!events[0].body.contains(BodySlot::Updates));
    }
}
