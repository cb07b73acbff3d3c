//! Recording port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::audio::AudioBlob;

/// Recording errors
#[derive(Debug, Clone, Error)]
pub enum RecordingError {
    #[error("Microphone access denied. Please allow access to your microphone.")]
    PermissionDenied,

    #[error("No audio input device available")]
    NoAudioDevice,

    #[error("Failed to start recording: {0}")]
    StartFailed(String),

    #[error("Recording failed: {0}")]
    RecordingFailed(String),

    #[error("No audio data captured")]
    EmptyCapture,
}

/// Port for microphone capture.
///
/// Contract: `start` acquires the input device and buffers audio in
/// fixed-size chunks; `stop` finalizes the buffer into exactly one
/// non-empty blob and releases the device; `cancel` releases the device
/// and discards the buffer. The device is never left acquired after
/// stop or cancel.
#[async_trait]
pub trait VoiceRecorder: Send + Sync {
    /// Start capturing. Fails if a recording is already in progress.
    async fn start(&self) -> Result<(), RecordingError>;

    /// Stop capturing and return the encoded audio.
    async fn stop(&self) -> Result<AudioBlob, RecordingError>;

    /// Stop capturing and discard everything.
    async fn cancel(&self) -> Result<(), RecordingError>;

    /// Check if currently recording
    fn is_recording(&self) -> bool;

    /// Elapsed capture time in milliseconds; advances only while recording
    fn elapsed_ms(&self) -> u64;
}
