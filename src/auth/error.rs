/// Errors surfaced by the credential manager.
///
/// `AuthenticationFailed` covers both an unknown username and a wrong
/// password so callers cannot tell which accounts exist.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("username and password must not be empty")]
    EmptyInput,

    #[error("username already taken")]
    UsernameTaken,

    #[error("invalid username or password")]
    AuthenticationFailed,

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Errors raised by a [`CredentialStore`](crate::auth::repo::CredentialStore).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("username already exists")]
    Duplicate,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
