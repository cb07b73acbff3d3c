//! Submit response use case

use thiserror::Error;

use crate::domain::session::ResponseSession;
use crate::domain::submission::{DraftResponse, SubmissionReceipt};

use super::ports::{AttemptCallback, ResponseSubmitter, SubmitError};

/// Errors from the submit response use case
#[derive(Debug, Error)]
pub enum RespondError {
    #[error(transparent)]
    Submit(#[from] SubmitError),
}

/// Input parameters for one submission
#[derive(Debug, Clone, Default)]
pub struct SubmitResponseInput {
    /// The speaking test being answered
    pub test_id: String,
    /// Optional written response
    pub text: Option<String>,
}

/// Callbacks for submission progress
#[derive(Default)]
pub struct SubmitResponseCallbacks {
    /// Called once before the first delivery attempt
    pub on_submit_start: Option<Box<dyn Fn() + Send + Sync>>,
    /// Called for each delivery route that fails before fallback
    pub on_attempt_failed: Option<AttemptCallback>,
}

/// Orchestrates one submission: validate the draft, drive the session
/// state machine, and deliver through the submitter. A rejected draft
/// never reaches the network; a failed delivery rolls the session back
/// so the user can retry.
pub struct SubmitResponseUseCase<S: ResponseSubmitter> {
    submitter: S,
}

impl<S: ResponseSubmitter> SubmitResponseUseCase<S> {
    /// Create a new use case instance
    pub fn new(submitter: S) -> Self {
        Self { submitter }
    }

    /// Execute the submission workflow
    pub async fn execute(
        &self,
        session: &mut ResponseSession,
        input: SubmitResponseInput,
        callbacks: SubmitResponseCallbacks,
    ) -> Result<SubmissionReceipt, RespondError> {
        let mut draft = DraftResponse::new();
        if let Some(text) = input.text {
            draft = draft.with_text(text);
        }
        if let Some(audio) = session.audio() {
            draft = draft.with_audio(audio.clone());
        }

        // Rejected before any network call
        draft
            .validate()
            .map_err(|e| RespondError::Submit(e.into()))?;

        session
            .begin_submission()
            .map_err(|e| RespondError::Submit(e.into()))?;

        if let Some(ref cb) = callbacks.on_submit_start {
            cb();
        }

        match self
            .submitter
            .submit(&input.test_id, &draft, callbacks.on_attempt_failed)
            .await
        {
            Ok(receipt) => {
                session
                    .complete_submission()
                    .map_err(|e| RespondError::Submit(e.into()))?;
                Ok(receipt)
            }
            Err(e) => {
                session
                    .fail_submission()
                    .map_err(|e| RespondError::Submit(e.into()))?;
                Err(e.into())
            }
        }
    }
}
