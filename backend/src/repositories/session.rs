//! Session repository for database operations

use super::{NewSession, SessionStore, StoreError, StoreResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;
use werd_shared::Session;

/// Session record joined with its owner's username
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SessionRecord {
    pub session_token: String,
    pub user_id: Uuid,
    pub username: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<SessionRecord> for Session {
    fn from(record: SessionRecord) -> Self {
        Self {
            token: record.session_token,
            user_id: record.user_id,
            username: record.username,
            expires_at: record.expires_at,
            created_at: record.created_at,
        }
    }
}

/// PostgreSQL-backed session store
#[derive(Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for SessionRepository {
    async fn find_by_token(&self, token: &str) -> StoreResult<Option<Session>> {
        let session = sqlx::query_as::<_, SessionRecord>(
            r#"
            SELECT s.session_token, s.user_id, u.username, s.expires_at, s.created_at
            FROM sessions s
            JOIN users u ON u.user_id = s.user_id
            WHERE s.session_token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(session.map(Session::from))
    }

    async fn replace_for_user(&self, new: &NewSession) -> StoreResult<u64> {
        let mut tx = self.pool.begin().await?;

        let removed = sqlx::query(
            r#"
            DELETE FROM sessions
            WHERE user_id = $1
            "#,
        )
        .bind(new.user_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        sqlx::query(
            r#"
            INSERT INTO sessions (session_token, user_id, expires_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(&new.token)
        .bind(new.user_id)
        .bind(new.expires_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(removed)
    }

    async fn delete_by_token(&self, token: &str) -> StoreResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM sessions
            WHERE session_token = $1
            "#,
        )
        .bind(token)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> StoreResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM sessions
            WHERE expires_at <= $1
            "#,
        )
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn health_check(&self) -> StoreResult<()> {
        crate::db::health_check(&self.pool)
            .await
            .map_err(StoreError::from)
    }
}
