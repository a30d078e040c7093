use tracing::{error, info, instrument, warn};

use crate::auth::{
    dto::PublicUser,
    error::{AuthError, StoreError},
    password::Hasher,
    repo::CredentialStore,
};

/// Registers and authenticates users against a [`CredentialStore`].
pub struct CredentialManager<S> {
    store: S,
    hasher: Hasher,
    // Verified against when the username is unknown, so both failure paths
    // pay for one Argon2 run.
    dummy_hash: String,
}

impl<S: CredentialStore> CredentialManager<S> {
    pub fn new(store: S, hasher: Hasher) -> anyhow::Result<Self> {
        let dummy_hash = hasher.hash_password("dummy-password-for-unknown-users")?;
        Ok(Self {
            store,
            hasher,
            dummy_hash,
        })
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[instrument(skip(self, password))]
    pub async fn register(&self, username: &str, password: &str) -> Result<PublicUser, AuthError> {
        if username.is_empty() || password.is_empty() {
            warn!("registration with empty input");
            return Err(AuthError::EmptyInput);
        }

        let hash = self.hasher.hash_password(password)?;

        let user = match self.store.create(username, &hash).await {
            Ok(u) => u,
            Err(StoreError::Duplicate) => {
                warn!(username = %username, "username already registered");
                return Err(AuthError::UsernameTaken);
            }
            Err(e) => {
                error!(error = %e, "create user failed");
                return Err(AuthError::Internal(e.into()));
            }
        };

        info!(user_id = user.id, username = %user.username, "user registered");
        Ok(user.into())
    }

    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<PublicUser, AuthError> {
        let user = match self.store.find_by_username(username).await {
            Ok(u) => u,
            Err(e) => {
                error!(error = %e, "find_by_username failed");
                return Err(AuthError::Internal(e.into()));
            }
        };

        let Some(user) = user else {
            // Result ignored; only the work matters.
            let _ = self.hasher.verify_password(password, &self.dummy_hash);
            warn!(username = %username, "login unknown username");
            return Err(AuthError::AuthenticationFailed);
        };

        let ok = match self.hasher.verify_password(password, &user.password_hash) {
            Ok(v) => v,
            Err(e) => {
                error!(error = %e, user_id = user.id, "stored hash unreadable");
                return Err(AuthError::Internal(e));
            }
        };

        if !ok {
            warn!(user_id = user.id, "login invalid password");
            return Err(AuthError::AuthenticationFailed);
        }

        info!(user_id = user.id, username = %user.username, "user logged in");
        Ok(user.into())
    }
}
