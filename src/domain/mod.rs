//! Domain layer - Core business logic
//!
//! Contains value objects, entities, and domain errors.
//! This layer has no dependencies on external systems.

pub mod audio;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod recording;
pub mod session;
pub mod submission;

// Re-export common types
pub use audio::{AudioBlob, AudioMimeType};
pub use auth::{AuthSession, Role};
pub use catalog::{ListeningTest, SpeakingTest};
pub use config::AppConfig;
pub use error::*;
pub use recording::Duration;
pub use session::{PracticeTimer, ResponseSession, SessionState};
pub use submission::{DeliveryRoute, DraftResponse, SubmissionReceipt};
