use std::sync::Arc;

use anyhow::Context;

use crate::auth::{password::Hasher, CredentialManager, SqliteStore};
use crate::config::AppConfig;
use crate::db::Database;

pub struct AppState {
    pub config: Arc<AppConfig>,
    pub manager: CredentialManager<SqliteStore>,
}

impl AppState {
    /// Prepares the credential store on disk and builds the manager.
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let db = Database::new(&config.database_path);
        db.init().await?;

        let hasher = Hasher::new(&config.hashing).context("configure password hashing")?;
        let manager = CredentialManager::new(SqliteStore::new(db), hasher)?;

        Ok(Self {
            config: Arc::new(config),
            manager,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::HashingConfig;
    use crate::auth::CredentialStore;

    #[tokio::test]
    async fn init_prepares_store_and_manager() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = AppConfig {
            database_path: dir.path().join("users.db"),
            hashing: HashingConfig {
                memory_kib: 64,
                iterations: 1,
                parallelism: 1,
            },
        };
        let state = AppState::init(config).await.expect("init");
        assert!(state.config.database_path.exists());

        state.manager.register("eka", "pw").await.expect("register");
        let stored = state
            .manager
            .store()
            .find_by_username("eka")
            .await
            .unwrap()
            .unwrap();
        assert!(stored.password_hash.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn init_rejects_bad_hashing_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = AppConfig {
            database_path: dir.path().join("users.db"),
            hashing: HashingConfig {
                memory_kib: 64,
                iterations: 0,
                parallelism: 1,
            },
        };
        let err = AppState::init(config).await.err().expect("should fail");
        assert!(err.to_string().contains("password hashing"));
    }
}
