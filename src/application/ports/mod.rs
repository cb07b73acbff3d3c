//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod backend;
pub mod config;
pub mod recorder;
pub mod session_store;
pub mod submitter;

// Re-export common types
pub use backend::{ApiError, Authenticator, TestCatalog};
pub use config::ConfigStore;
pub use recorder::{RecordingError, VoiceRecorder};
pub use session_store::{SessionStore, SessionStoreError};
pub use submitter::{AttemptCallback, ResponseSubmitter, SubmitError};
