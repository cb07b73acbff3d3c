//! Infrastructure layer: adapters implementing the application ports

pub mod api;
pub mod auth;
pub mod config;
pub mod recording;

pub use api::{ApiClient, FallbackSubmitter};
pub use auth::JsonSessionStore;
pub use config::XdgConfigStore;
pub use recording::CpalRecorder;
