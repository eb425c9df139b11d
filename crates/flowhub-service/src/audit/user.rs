//! Account and user-management events.

use std::sync::Arc;

use flowhub_audit::{Actor, BodyInput, ErrorInput, UpdatesInput};
use flowhub_entity::audit::{AuditScope, ScopeType};
use flowhub_entity::team::Team;
use flowhub_entity::user::User;

use super::recorder::AuditRecorder;

/// Records `account.*`, `user.*` and `users.*` events, filed under the
/// affected user.
#[derive(Debug, Clone)]
pub struct UserAuditLogger {
    recorder: Arc<AuditRecorder>,
}

/// Scope of a user event. Failed logins and password resets may not know
/// which account they concern.
fn user_scope(user: Option<&User>) -> AuditScope {
    match user {
        Some(user) => AuditScope::user(user.id),
        None => AuditScope {
            scope_type: ScopeType::User,
            id: None,
        },
    }
}

impl UserAuditLogger {
    /// Creates a new user audit logger.
    pub fn new(recorder: Arc<AuditRecorder>) -> Self {
        Self { recorder }
    }

    async fn log(
        &self,
        event: &str,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        user: Option<&User>,
        input: BodyInput,
    ) {
        let input = match user {
            Some(user) => input.user(user),
            None => input,
        };
        self.recorder
            .record(user_scope(user), event, actor.into(), input.maybe_error(error))
            .await;
    }

    /// A new account signed up.
    pub async fn register(&self, actor: impl Into<Actor>, error: Option<ErrorInput>, user: &User) {
        self.log("account.register", actor, error, Some(user), BodyInput::new())
            .await;
    }

    /// A login attempt. `user` is `None` when the username matched no account.
    pub async fn login(&self, actor: impl Into<Actor>, error: Option<ErrorInput>, user: Option<&User>) {
        self.log("account.login", actor, error, user, BodyInput::new())
            .await;
    }

    /// Records `account.logout`.
    pub async fn logout(&self, actor: impl Into<Actor>, error: Option<ErrorInput>, user: &User) {
        self.log("account.logout", actor, error, Some(user), BodyInput::new())
            .await;
    }

    /// Records `account.forgot-password`.
    pub async fn forgot_password(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        user: Option<&User>,
    ) {
        self.log("account.forgot-password", actor, error, user, BodyInput::new())
            .await;
    }

    /// Records `account.reset-password`.
    pub async fn reset_password(&self, actor: impl Into<Actor>, error: Option<ErrorInput>, user: &User) {
        self.log("account.reset-password", actor, error, Some(user), BodyInput::new())
            .await;
    }

    /// A user edited their own profile.
    pub async fn updated_user(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        user: &User,
        updates: impl Into<UpdatesInput>,
    ) {
        self.log(
            "user.updated-user",
            actor,
            error,
            Some(user),
            BodyInput::new().updates(updates),
        )
        .await;
    }

    /// Records `user.updated-password`.
    pub async fn updated_password(&self, actor: impl Into<Actor>, error: Option<ErrorInput>, user: &User) {
        self.log("user.updated-password", actor, error, Some(user), BodyInput::new())
            .await;
    }

    /// Records `user.verified-email`.
    pub async fn verified_email(&self, actor: impl Into<Actor>, error: Option<ErrorInput>, user: &User) {
        self.log("user.verified-email", actor, error, Some(user), BodyInput::new())
            .await;
    }

    /// Records `user.invitation.accepted`.
    pub async fn invitation_accepted(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        user: &User,
        team: &Team,
    ) {
        self.log(
            "user.invitation.accepted",
            actor,
            error,
            Some(user),
            BodyInput::new().team(team),
        )
        .await;
    }

    /// Records `user.invitation.deleted`.
    pub async fn invitation_deleted(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        user: &User,
        team: &Team,
    ) {
        self.log(
            "user.invitation.deleted",
            actor,
            error,
            Some(user),
            BodyInput::new().team(team),
        )
        .await;
    }

    /// An administrator created an account.
    pub async fn admin_created_user(&self, actor: impl Into<Actor>, error: Option<ErrorInput>, user: &User) {
        self.log("users.created-user", actor, error, Some(user), BodyInput::new())
            .await;
    }

    /// An administrator edited an account.
    pub async fn admin_updated_user(
        &self,
        actor: impl Into<Actor>,
        error: Option<ErrorInput>,
        user: &User,
        updates: impl Into<UpdatesInput>,
    ) {
        self.log(
            "users.updated-user",
            actor,
            error,
            Some(user),
            BodyInput::new().updates(updates),
        )
        .await;
    }

    /// An administrator deleted an account.
    pub async fn admin_deleted_user(&self, actor: impl Into<Actor>, error: Option<ErrorInput>, user: &User) {
        self.log("users.deleted-user", actor, error, Some(user), BodyInput::new())
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowhub_audit::Updates;
    use flowhub_entity::audit::BodySlot;
    use serde_json::json;

    use crate::audit::recorder::tests::recorder;

    fn alice() -> User {
        User {
            id: 21,
            external_id: Some("u-21".to_string()),
            username: "alice".to_string(),
            name: Some("Alice".to_string()),
            password: Some("$argon2id$...".to_string()),
            ..User::default()
        }
    }

    #[tokio::test]
    async fn test_login_is_attributed_to_the_user() {
        let (sink, recorder) = recorder();
        let logger = UserAuditLogger::new(Arc::new(recorder));
        let user = alice();

        logger.login(&user, None, Some(&user)).await;

        let events = sink.take();
        assert_eq!(events[0].event, "account.login");
        assert_eq!(events[0].actor_id, Some(21));
        assert_eq!(events[0].scope, AuditScope::user(21));
        assert_eq!(
            events[0].body.get(BodySlot::User),
            Some(&json!({ "id": 21, "externalId": "u-21", "name": "Alice", "username": "alice" }))
        );
    }

    #[tokio::test]
    async fn test_failed_login_for_unknown_account() {
        let (sink, recorder) = recorder();
        let logger = UserAuditLogger::new(Arc::new(recorder));

        logger
            .login(Actor::Absent, Some(ErrorInput::from("user not found")), None)
            .await;

        let events = sink.take();
        assert_eq!(events[0].scope.id, None);
        assert_eq!(events[0].actor_id, None);
        assert!(events[0].body.contains(BodySlot::Trigger));
        assert!(!events[0].body.contains(BodySlot::User));
        assert_eq!(events[0].body.get(BodySlot::Error).unwrap()["code"], "unexpected_error");
    }

    #[tokio::test]
    async fn test_password_never_reaches_the_body() {
        let (sink, recorder) = recorder();
        let logger = UserAuditLogger::new(Arc::new(recorder));
        let mut updates = Updates::new();
        updates.push("password", "old-hash", "new-hash");

        logger.admin_updated_user(1_i64, None, &alice(), updates).await;

        let stored = serde_json::to_string(&sink.take()[0].body).unwrap();
        assert!(!stored.contains("hash"));
        assert!(!stored.contains("argon2"));
        assert!(stored.contains("***"));
    }
}
