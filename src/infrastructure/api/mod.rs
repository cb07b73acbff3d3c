pub mod client;
pub mod submitter;

pub use client::ApiClient;
pub use submitter::FallbackSubmitter;
