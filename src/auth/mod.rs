pub mod dto;
pub mod error;
pub mod password;
pub mod repo;
pub mod repo_types;
pub mod services;

pub use dto::Credentials;
pub use error::AuthError;
pub use repo::{CredentialStore, SqliteStore};
pub use services::CredentialManager;
