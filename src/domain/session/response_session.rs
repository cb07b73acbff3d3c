//! Response session state machine

use std::fmt;
use thiserror::Error;

use crate::domain::audio::AudioBlob;

/// Session states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Recording,
    Recorded,
    Submitting,
    Submitted,
}

impl SessionState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Recording => "recording",
            Self::Recorded => "recorded",
            Self::Submitting => "submitting",
            Self::Submitted => "submitted",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid state transition: cannot {action} while in {current_state} state")]
pub struct InvalidStateTransition {
    pub current_state: SessionState,
    pub action: String,
}

/// One recording-and-submission attempt for a single test.
///
/// State machine:
///   IDLE -> RECORDING (start_recording)
///   RECORDED -> RECORDING (start_recording, "record again")
///   RECORDING -> RECORDED (stop_recording)
///   RECORDED -> IDLE (delete_recording)
///   RECORDED | IDLE -> SUBMITTING (begin_submission; idle covers text-only)
///   SUBMITTING -> SUBMITTED (complete_submission, terminal)
///   SUBMITTING -> RECORDED | IDLE (fail_submission, audio kept if present)
#[derive(Debug, Default)]
pub struct ResponseSession {
    state: SessionState,
    audio: Option<AudioBlob>,
    elapsed_secs: u64,
}

impl ResponseSession {
    /// Create a new session in idle state
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Get the recorded audio, if any
    pub fn audio(&self) -> Option<&AudioBlob> {
        self.audio.as_ref()
    }

    /// Elapsed seconds of the last recording
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    /// Check if currently recording
    pub fn is_recording(&self) -> bool {
        self.state == SessionState::Recording
    }

    /// Check if the session reached its terminal state
    pub fn is_submitted(&self) -> bool {
        self.state == SessionState::Submitted
    }

    /// Transition to RECORDING from IDLE or RECORDED.
    /// Starting over from RECORDED discards the previous recording.
    pub fn start_recording(&mut self) -> Result<(), InvalidStateTransition> {
        match self.state {
            SessionState::Idle | SessionState::Recorded => {
                self.audio = None;
                self.elapsed_secs = 0;
                self.state = SessionState::Recording;
                Ok(())
            }
            _ => Err(self.invalid("start recording")),
        }
    }

    /// Transition from RECORDING to RECORDED, attaching the captured blob.
    pub fn stop_recording(
        &mut self,
        audio: AudioBlob,
        elapsed_secs: u64,
    ) -> Result<(), InvalidStateTransition> {
        if self.state != SessionState::Recording {
            return Err(self.invalid("stop recording"));
        }
        self.audio = Some(audio);
        self.elapsed_secs = elapsed_secs;
        self.state = SessionState::Recorded;
        Ok(())
    }

    /// Transition from RECORDED back to IDLE, discarding the blob.
    pub fn delete_recording(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != SessionState::Recorded {
            return Err(self.invalid("delete recording"));
        }
        self.audio = None;
        self.elapsed_secs = 0;
        self.state = SessionState::Idle;
        Ok(())
    }

    /// Transition to SUBMITTING. Allowed from RECORDED (audio answer) and
    /// from IDLE (text-only answer).
    pub fn begin_submission(&mut self) -> Result<(), InvalidStateTransition> {
        match self.state {
            SessionState::Recorded | SessionState::Idle => {
                self.state = SessionState::Submitting;
                Ok(())
            }
            _ => Err(self.invalid("begin submission")),
        }
    }

    /// Transition from SUBMITTING to the terminal SUBMITTED state.
    pub fn complete_submission(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != SessionState::Submitting {
            return Err(self.invalid("complete submission"));
        }
        self.state = SessionState::Submitted;
        Ok(())
    }

    /// Roll back a failed submission: RECORDED when audio is still held,
    /// IDLE otherwise. The user can retry without losing the recording.
    pub fn fail_submission(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != SessionState::Submitting {
            return Err(self.invalid("fail submission"));
        }
        self.state = if self.audio.is_some() {
            SessionState::Recorded
        } else {
            SessionState::Idle
        };
        Ok(())
    }

    fn invalid(&self, action: &str) -> InvalidStateTransition {
        InvalidStateTransition {
            current_state: self.state,
            action: action.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audio::AudioMimeType;

    fn blob() -> AudioBlob {
        AudioBlob::new(vec![1u8; 64], AudioMimeType::Wav)
    }

    #[test]
    fn new_session_is_idle() {
        let session = ResponseSession::new();
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.audio().is_none());
        assert_eq!(session.elapsed_secs(), 0);
    }

    #[test]
    fn start_stop_yields_one_blob() {
        let mut session = ResponseSession::new();
        session.start_recording().unwrap();
        assert!(session.is_recording());

        session.stop_recording(blob(), 7).unwrap();
        assert_eq!(session.state(), SessionState::Recorded);
        assert_eq!(session.elapsed_secs(), 7);

        let audio = session.audio().unwrap();
        assert!(audio.size_bytes() > 0);
    }

    #[test]
    fn start_recording_while_recording_fails() {
        let mut session = ResponseSession::new();
        session.start_recording().unwrap();

        let err = session.start_recording().unwrap_err();
        assert_eq!(err.current_state, SessionState::Recording);
    }

    #[test]
    fn stop_recording_while_idle_fails() {
        let mut session = ResponseSession::new();
        let err = session.stop_recording(blob(), 1).unwrap_err();
        assert_eq!(err.current_state, SessionState::Idle);
    }

    #[test]
    fn record_again_discards_previous_blob() {
        let mut session = ResponseSession::new();
        session.start_recording().unwrap();
        session.stop_recording(blob(), 5).unwrap();

        session.start_recording().unwrap();
        assert!(session.is_recording());
        assert!(session.audio().is_none());
        assert_eq!(session.elapsed_secs(), 0);
    }

    #[test]
    fn delete_returns_to_idle_and_accepts_fresh_recording() {
        let mut session = ResponseSession::new();
        session.start_recording().unwrap();
        session.stop_recording(blob(), 5).unwrap();

        session.delete_recording().unwrap();
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.audio().is_none());

        assert!(session.start_recording().is_ok());
    }

    #[test]
    fn delete_while_idle_fails() {
        let mut session = ResponseSession::new();
        assert!(session.delete_recording().is_err());
    }

    #[test]
    fn submission_from_recorded() {
        let mut session = ResponseSession::new();
        session.start_recording().unwrap();
        session.stop_recording(blob(), 5).unwrap();

        session.begin_submission().unwrap();
        assert_eq!(session.state(), SessionState::Submitting);

        session.complete_submission().unwrap();
        assert!(session.is_submitted());
    }

    #[test]
    fn text_only_submission_from_idle() {
        let mut session = ResponseSession::new();
        session.begin_submission().unwrap();
        session.complete_submission().unwrap();
        assert!(session.is_submitted());
    }

    #[test]
    fn failed_submission_keeps_audio() {
        let mut session = ResponseSession::new();
        session.start_recording().unwrap();
        session.stop_recording(blob(), 5).unwrap();
        session.begin_submission().unwrap();

        session.fail_submission().unwrap();
        assert_eq!(session.state(), SessionState::Recorded);
        assert!(session.audio().is_some());
    }

    #[test]
    fn failed_text_only_submission_returns_to_idle() {
        let mut session = ResponseSession::new();
        session.begin_submission().unwrap();
        session.fail_submission().unwrap();
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn submitted_is_terminal() {
        let mut session = ResponseSession::new();
        session.begin_submission().unwrap();
        session.complete_submission().unwrap();

        assert!(session.start_recording().is_err());
        assert!(session.begin_submission().is_err());
        assert!(session.delete_recording().is_err());
    }

    #[test]
    fn begin_submission_while_recording_fails() {
        let mut session = ResponseSession::new();
        session.start_recording().unwrap();

        let err = session.begin_submission().unwrap_err();
        assert_eq!(err.current_state, SessionState::Recording);
        assert!(err.to_string().contains("begin submission"));
    }

    #[test]
    fn state_display() {
        assert_eq!(SessionState::Idle.to_string(), "idle");
        assert_eq!(SessionState::Recording.to_string(), "recording");
        assert_eq!(SessionState::Submitted.to_string(), "submitted");
    }
}
