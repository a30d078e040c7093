use async_trait::async_trait;
use tracing::{debug, warn};

use crate::auth::error::StoreError;
use crate::auth::repo_types::User;
use crate::db::Database;

#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Fails with [`StoreError::Duplicate`] when the username is already present.
    async fn create(&self, username: &str, password_hash: &str) -> Result<User, StoreError>;
}

/// SQLite-backed store; opens one connection per call.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CredentialStore for SqliteStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let mut conn = self.db.acquire().await?;
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash
            FROM users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(&mut conn)
        .await?;
        self.db.release(conn).await?;
        Ok(user)
    }

    async fn create(&self, username: &str, password_hash: &str) -> Result<User, StoreError> {
        let mut conn = self.db.acquire().await?;
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES (?, ?)
            RETURNING id, username, password_hash
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&mut conn)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                debug!("unique constraint rejected insert");
                StoreError::Duplicate
            }
            other => StoreError::Database(other),
        })?;
        // Row is committed; a failed close is only logged.
        if let Err(e) = self.db.release(conn).await {
            warn!(error = %e, user_id = user.id, "closing connection after insert failed");
        }
        Ok(user)
    }
}
