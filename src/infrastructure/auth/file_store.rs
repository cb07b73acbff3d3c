//! JSON session store in the user's config directory
//!
//! The authenticated session lives in `auth.json` next to the config file.
//! Login writes it, logout deletes it.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::application::ports::{SessionStore, SessionStoreError};
use crate::domain::auth::AuthSession;

/// Session file name inside the app config directory
const SESSION_FILE: &str = "auth.json";

/// Stores the session as a JSON file on disk.
pub struct JsonSessionStore {
    file_path: PathBuf,
}

impl JsonSessionStore {
    /// Store rooted at the platform config directory
    /// (`~/.config/ielts-practice/auth.json` on Linux)
    pub fn new() -> Self {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            file_path: base.join("ielts-practice").join(SESSION_FILE),
        }
    }

    /// Store at an explicit path
    pub fn with_path(file_path: PathBuf) -> Self {
        Self { file_path }
    }
}

impl Default for JsonSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for JsonSessionStore {
    async fn load(&self) -> Result<Option<AuthSession>, SessionStoreError> {
        if !self.file_path.exists() {
            return Ok(None);
        }

        let content = tokio::fs::read_to_string(&self.file_path)
            .await
            .map_err(|e| SessionStoreError::ReadError(e.to_string()))?;

        let session = serde_json::from_str(&content)
            .map_err(|e| SessionStoreError::ParseError(e.to_string()))?;

        Ok(Some(session))
    }

    async fn save(&self, session: &AuthSession) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.file_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| SessionStoreError::WriteError(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(session)
            .map_err(|e| SessionStoreError::WriteError(e.to_string()))?;

        tokio::fs::write(&self.file_path, content)
            .await
            .map_err(|e| SessionStoreError::WriteError(e.to_string()))?;

        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionStoreError> {
        if self.file_path.exists() {
            tokio::fs::remove_file(&self.file_path)
                .await
                .map_err(|e| SessionStoreError::WriteError(e.to_string()))?;
        }
        Ok(())
    }

    fn path(&self) -> PathBuf {
        self.file_path.clone()
    }
}
