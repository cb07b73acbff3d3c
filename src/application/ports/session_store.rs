//! Session persistence port interface

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::auth::AuthSession;

/// Session store errors
#[derive(Debug, Clone, Error)]
pub enum SessionStoreError {
    #[error("Failed to read session file: {0}")]
    ReadError(String),

    #[error("Failed to parse session file: {0}")]
    ParseError(String),

    #[error("Failed to write session file: {0}")]
    WriteError(String),
}

/// Port for persisting the authenticated session between runs.
/// Set at login, cleared at logout.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the stored session, or None when logged out.
    async fn load(&self) -> Result<Option<AuthSession>, SessionStoreError>;

    /// Persist the session.
    async fn save(&self, session: &AuthSession) -> Result<(), SessionStoreError>;

    /// Clear the stored session. Clearing an absent session is a no-op.
    async fn clear(&self) -> Result<(), SessionStoreError>;

    /// Get the session file path.
    fn path(&self) -> PathBuf;
}
