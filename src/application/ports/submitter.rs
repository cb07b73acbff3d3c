//! Submission port interface

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::error::EmptyDraftError;
use crate::domain::session::InvalidStateTransition;
use crate::domain::submission::{DeliveryRoute, DraftResponse, SubmissionReceipt};

/// Submission errors
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] EmptyDraftError),

    #[error(transparent)]
    Session(#[from] InvalidStateTransition),

    #[error("All delivery endpoints failed ({attempts} attempts). Last error: {last_error}")]
    AllRoutesFailed { attempts: usize, last_error: String },
}

/// Callback invoked when a single delivery route fails and the submitter
/// moves on to the next one. Parameters: (route, error message).
pub type AttemptCallback = Arc<dyn Fn(DeliveryRoute, &str) + Send + Sync>;

/// Port for delivering one response to the backend.
///
/// Implementations evaluate an ordered list of delivery routes and
/// short-circuit on the first success. Intermediate failures are reported
/// through the attempt callback only; an error is returned only after
/// every route is exhausted.
#[async_trait]
pub trait ResponseSubmitter: Send + Sync {
    async fn submit(
        &self,
        test_id: &str,
        draft: &DraftResponse,
        on_attempt_failed: Option<AttemptCallback>,
    ) -> Result<SubmissionReceipt, SubmitError>;
}
