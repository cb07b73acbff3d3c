//! Delivery routes and submission receipt

use std::fmt;

/// The ordered delivery routes a submission may travel, most specific
/// first. Evaluated in order with short-circuit on the first success;
/// the placeholder route runs at most once, as the final text-only resort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryRoute {
    /// POST /api/speaking-tests/{id}/audio-response with the audio form
    SpeakingTestAudio,
    /// POST /api/upload-audio with the audio form
    UploadAudio,
    /// POST /api/submit-audio with the audio form
    SubmitAudio,
    /// POST /api/upload-audio with a text-only form
    UploadTextOnly,
    /// POST /api/submit-audio with a text-only form
    SubmitTextOnly,
    /// POST /api/upload-audio with the text plus an empty placeholder
    /// audio part
    UploadWithPlaceholderAudio,
}

impl DeliveryRoute {
    /// Human-readable route name for attempt reporting
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::SpeakingTestAudio => "speaking test audio endpoint",
            Self::UploadAudio => "general audio upload endpoint",
            Self::SubmitAudio => "fallback audio endpoint",
            Self::UploadTextOnly => "general upload endpoint (text only)",
            Self::SubmitTextOnly => "fallback endpoint (text only)",
            Self::UploadWithPlaceholderAudio => "general upload endpoint (placeholder audio)",
        }
    }

    /// Whether this route sends a text-only form without an audio part
    pub const fn is_text_only(&self) -> bool {
        matches!(self, Self::UploadTextOnly | Self::SubmitTextOnly)
    }
}

impl fmt::Display for DeliveryRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}

/// Outcome of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    /// The route that accepted the payload
    pub route: DeliveryRoute,
    /// Server-assigned identifier, when the backend returned one
    pub response_id: Option<String>,
    /// Server message, when the backend returned one
    pub message: Option<String>,
}

impl SubmissionReceipt {
    /// Create a receipt for an accepting route
    pub fn new(route: DeliveryRoute) -> Self {
        Self {
            route,
            response_id: None,
            message: None,
        }
    }

    /// Attach the server-assigned id
    pub fn with_response_id(mut self, id: impl Into<String>) -> Self {
        self.response_id = Some(id.into());
        self
    }

    /// Attach the server message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}
