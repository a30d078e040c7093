use std::path::PathBuf;

use serde::Deserialize;

use crate::auth::password::HashingConfig;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub hashing: HashingConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_path = std::env::var("DATABASE_PATH")
            .unwrap_or_else(|_| "users.db".into())
            .into();
        let defaults = HashingConfig::default();
        let hashing = HashingConfig {
            memory_kib: env_u32("HASH_MEMORY_KIB")?.unwrap_or(defaults.memory_kib),
            iterations: env_u32("HASH_ITERATIONS")?.unwrap_or(defaults.iterations),
            parallelism: env_u32("HASH_PARALLELISM")?.unwrap_or(defaults.parallelism),
        };
        Ok(Self {
            database_path,
            hashing,
        })
    }
}

fn env_u32(key: &str) -> anyhow::Result<Option<u32>> {
    match std::env::var(key) {
        Ok(v) => v
            .trim()
            .parse::<u32>()
            .map(Some)
            .map_err(|e| anyhow::anyhow!("{key}: {e}")),
        Err(_) => Ok(None),
    }
}
