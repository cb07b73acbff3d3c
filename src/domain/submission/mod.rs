//! Submission domain module

mod draft;
mod receipt;

pub use draft::DraftResponse;
pub use receipt::{DeliveryRoute, SubmissionReceipt};
