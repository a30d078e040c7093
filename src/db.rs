use std::path::{Path, PathBuf};

use anyhow::Context;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteConnection},
    ConnectOptions, Connection,
};
use tracing::{debug, info};

const CREATE_USERS: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT UNIQUE NOT NULL,
        password_hash TEXT NOT NULL
    )
"#;

/// Handle to the on-disk credential database.
///
/// No connection is held between operations: every caller acquires its own
/// connection through [`Database::acquire`] and gives it back with
/// [`Database::release`]. A connection dropped on an error path is closed by
/// its `Drop` impl.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[cfg(test)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the database file and the `users` table if either is missing.
    pub async fn init(&self) -> anyhow::Result<()> {
        let mut conn = self
            .acquire()
            .await
            .with_context(|| format!("open database {}", self.path.display()))?;
        sqlx::query(CREATE_USERS)
            .execute(&mut conn)
            .await
            .context("create users table")?;
        self.release(conn).await?;
        info!(path = %self.path.display(), "credential store ready");
        Ok(())
    }

    pub async fn acquire(&self) -> Result<SqliteConnection, sqlx::Error> {
        let conn = SqliteConnectOptions::new()
            .filename(&self.path)
            .create_if_missing(true)
            .connect()
            .await?;
        debug!(path = %self.path.display(), "connection opened");
        Ok(conn)
    }

    pub async fn release(&self, conn: SqliteConnection) -> Result<(), sqlx::Error> {
        conn.close().await?;
        debug!(path = %self.path.display(), "connection closed");
        Ok(())
    }
}
