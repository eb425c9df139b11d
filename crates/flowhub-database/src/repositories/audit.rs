//! Audit event repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use flowhub_audit::AuditEventSink;
use flowhub_core::error::{AppError, ErrorKind};
use flowhub_core::result::AppResult;
use flowhub_entity::audit::{AuditEventRow, Body, NewAuditEvent, ScopeType};

/// Default page size for listings.
pub const DEFAULT_LIST_LIMIT: i64 = 50;

/// Filters for [`AuditEventRepository::list`].
#[derive(Debug, Clone)]
pub struct AuditEventFilter {
    pub scope_type: Option<ScopeType>,
    pub scope_id: Option<String>,
    pub event: Option<String>,
    pub since: Option<DateTime<Utc>>,
    pub limit: i64,
}

impl Default for AuditEventFilter {
    fn default() -> Self {
        Self {
            scope_type: None,
            scope_id: None,
            event: None,
            since: None,
            limit: DEFAULT_LIST_LIMIT,
        }
    }
}

impl AuditEventFilter {
    /// Events filed under one scope.
    pub fn scope(scope_type: ScopeType, scope_id: Option<String>) -> Self {
        Self {
            scope_type: Some(scope_type),
            scope_id,
            ..Self::default()
        }
    }

    /// Build the `WHERE` clause and the index of the next bind parameter.
    fn where_clause(&self) -> (String, u32) {
        let mut conditions = Vec::new();
        let mut param_idx = 1u32;

        if self.scope_type.is_some() {
            conditions.push(format!("scope_type = ${param_idx}"));
            param_idx += 1;
        }
        if self.scope_id.is_some() {
            conditions.push(format!("scope_id = ${param_idx}"));
            param_idx += 1;
        }
        if self.event.is_some() {
            conditions.push(format!("event = ${param_idx}"));
            param_idx += 1;
        }
        if self.since.is_some() {
            conditions.push(format!("created_at >= ${param_idx}"));
            param_idx += 1;
        }

        let clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };
        (clause, param_idx)
    }

    fn select_sql(&self) -> String {
        let (where_clause, limit_idx) = self.where_clause();
        format!(
            "SELECT * FROM audit_events {where_clause} ORDER BY created_at DESC LIMIT ${limit_idx}"
        )
    }
}

/// Stores and queries audit events.
#[derive(Debug, Clone)]
pub struct AuditEventRepository {
    pool: PgPool,
}

impl AuditEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert an event and return the stored row.
    pub async fn create(&self, data: &NewAuditEvent) -> AppResult<AuditEventRow> {
        let body = serialize_body(&data.body)?;
        sqlx::query_as::<_, AuditEventRow>(
            "INSERT INTO audit_events (actor_id, event, scope_type, scope_id, body) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(data.actor_id)
        .bind(&data.event)
        .bind(data.scope.scope_type)
        .bind(&data.scope.id)
        .bind(body)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create audit event", e))
    }

    /// Find an event by id.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<AuditEventRow>> {
        sqlx::query_as::<_, AuditEventRow>("SELECT * FROM audit_events WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find audit event", e))
    }

    /// List events matching `filter`, newest first.
    pub async fn list(&self, filter: &AuditEventFilter) -> AppResult<Vec<AuditEventRow>> {
        let sql = filter.select_sql();
        let mut query = sqlx::query_as::<_, AuditEventRow>(&sql);

        if let Some(scope_type) = filter.scope_type {
            query = query.bind(scope_type);
        }
        if let Some(scope_id) = &filter.scope_id {
            query = query.bind(scope_id.clone());
        }
        if let Some(event) = &filter.event {
            query = query.bind(event.clone());
        }
        if let Some(since) = filter.since {
            query = query.bind(since);
        }

        query
            .bind(filter.limit.max(1))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list audit events", e))
    }

    /// List the events of one scope, optionally restricted to one event name.
    pub async fn list_for_scope(
        &self,
        scope_type: ScopeType,
        scope_id: Option<&str>,
        event: Option<&str>,
        limit: i64,
    ) -> AppResult<Vec<AuditEventRow>> {
        let filter = AuditEventFilter {
            event: event.map(str::to_string),
            limit,
            ..AuditEventFilter::scope(scope_type, scope_id.map(str::to_string))
        };
        self.list(&filter).await
    }

    /// Every event recorded at or after `since`, oldest first.
    pub async fn find_since(&self, since: DateTime<Utc>) -> AppResult<Vec<AuditEventRow>> {
        sqlx::query_as::<_, AuditEventRow>(
            "SELECT * FROM audit_events WHERE created_at >= $1 ORDER BY created_at ASC",
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find recent audit events", e)
        })
    }
}

#[async_trait]
impl AuditEventSink for AuditEventRepository {
    async fn record(&self, event: NewAuditEvent) -> AppResult<()> {
        self.create(&event).await.map(|_| ())
    }
}

/// Serialize a body for the `body` column; an empty body is stored as
/// `NULL`.
fn serialize_body(body: &Body) -> AppResult<Option<String>> {
    if body.is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::to_string(body)?))
}
