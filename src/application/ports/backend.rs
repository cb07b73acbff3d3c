//! Backend API port interfaces

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::auth::AuthSession;
use crate::domain::catalog::{ListeningTest, SpeakingTest};

/// Backend API errors
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Request failed: {0}")]
    Network(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Failed to parse server response: {0}")]
    Parse(String),
}

/// Port for authenticating against the backend
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Exchange credentials for an authenticated session.
    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, ApiError>;
}

/// Port for browsing and managing the test catalog
#[async_trait]
pub trait TestCatalog: Send + Sync {
    /// List all speaking test prompts
    async fn speaking_tests(&self) -> Result<Vec<SpeakingTest>, ApiError>;

    /// List all listening tests
    async fn listening_tests(&self) -> Result<Vec<ListeningTest>, ApiError>;

    /// Create a new speaking test prompt
    async fn create_speaking_test(&self, question: &str) -> Result<SpeakingTest, ApiError>;

    /// Delete a speaking test prompt
    async fn delete_speaking_test(&self, id: &str) -> Result<(), ApiError>;
}
