//! Application layer - Use cases and port interfaces
//!
//! Contains the core business operations and trait definitions
//! for external system interactions.

pub mod ports;
pub mod respond;

// Re-export use cases
pub use respond::{
    RespondError, SubmitResponseCallbacks, SubmitResponseInput, SubmitResponseUseCase,
};
