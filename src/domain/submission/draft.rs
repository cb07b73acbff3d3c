//! Draft response value object

use crate::domain::audio::AudioBlob;
use crate::domain::error::EmptyDraftError;

/// One answer being prepared for submission: optional written text and
/// optional recorded audio. At least one must be present.
#[derive(Debug, Clone, Default)]
pub struct DraftResponse {
    text: Option<String>,
    audio: Option<AudioBlob>,
}

impl DraftResponse {
    /// Create an empty draft
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach written text. Whitespace-only text counts as absent.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.text = if text.trim().is_empty() {
            None
        } else {
            Some(text)
        };
        self
    }

    /// Attach recorded audio
    pub fn with_audio(mut self, audio: AudioBlob) -> Self {
        self.audio = Some(audio);
        self
    }

    /// Get the written text, if any
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Get the recorded audio, if any
    pub fn audio(&self) -> Option<&AudioBlob> {
        self.audio.as_ref()
    }

    /// Whether the draft carries audio
    pub fn has_audio(&self) -> bool {
        self.audio.is_some()
    }

    /// Whether the draft carries text
    pub fn has_text(&self) -> bool {
        self.text.is_some()
    }

    /// Reject drafts with nothing to deliver. Runs before any network call.
    pub fn validate(&self) -> Result<(), EmptyDraftError> {
        if self.text.is_none() && self.audio.is_none() {
            return Err(EmptyDraftError);
        }
        Ok(())
    }
}
