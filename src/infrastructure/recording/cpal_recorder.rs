//! Cross-platform microphone recorder using cpal
//!
//! Captures mono i16 samples at the device rate and encodes them as WAV
//! on stop. The stream lives on a dedicated thread because cpal::Stream
//! is not Send.

use std::io::Cursor;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Instant;

use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, StreamConfig};
use hound::{WavSpec, WavWriter};
use tokio::sync::oneshot;
use tokio::time::Duration as TokioDuration;

use crate::application::ports::{RecordingError, VoiceRecorder};
use crate::domain::audio::{AudioBlob, AudioMimeType};

/// Preferred capture rate when the device supports it
const PREFERRED_SAMPLE_RATE: u32 = 44_100;

/// Microphone recorder backed by cpal.
pub struct CpalRecorder {
    /// Captured samples (mono, i16, at device sample rate)
    audio_buffer: Arc<StdMutex<Vec<i16>>>,
    /// Device sample rate chosen at start
    device_sample_rate: Arc<AtomicU32>,
    /// Recording state
    is_recording: Arc<AtomicBool>,
    /// Elapsed capture time in milliseconds
    elapsed_ms: Arc<AtomicU64>,
}

impl CpalRecorder {
    /// Create a new cpal-based recorder
    pub fn new() -> Self {
        Self {
            audio_buffer: Arc::new(StdMutex::new(Vec::new())),
            device_sample_rate: Arc::new(AtomicU32::new(0)),
            is_recording: Arc::new(AtomicBool::new(false)),
            elapsed_ms: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Get the default input device
    fn get_input_device() -> Result<cpal::Device, RecordingError> {
        let host = cpal::default_host();
        host.default_input_device()
            .ok_or(RecordingError::NoAudioDevice)
    }

    /// Pick an input configuration, preferring mono i16/f32 streams
    fn get_input_config(
        device: &cpal::Device,
    ) -> Result<(StreamConfig, SampleFormat), RecordingError> {
        let supported_configs = device
            .supported_input_configs()
            .map_err(|e| map_device_error(&e.to_string()))?;

        let mut best_config: Option<cpal::SupportedStreamConfigRange> = None;

        for config in supported_configs {
            if config.sample_format() != SampleFormat::I16
                && config.sample_format() != SampleFormat::F32
            {
                continue;
            }

            let is_better = match &best_config {
                None => true,
                Some(current) => config.channels() < current.channels(),
            };
            if is_better {
                best_config = Some(config);
            }
        }

        let config_range = best_config.ok_or(RecordingError::StartFailed(
            "No suitable input config found".into(),
        ))?;

        let sample_rate = PREFERRED_SAMPLE_RATE
            .clamp(config_range.min_sample_rate().0, config_range.max_sample_rate().0);

        let sample_format = config_range.sample_format();
        let config = StreamConfig {
            channels: config_range.channels(),
            sample_rate: cpal::SampleRate(sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };

        Ok((config, sample_format))
    }

    /// Mix interleaved multi-channel samples down to mono
    fn mix_to_mono(samples: &[i16], channels: u16) -> Vec<i16> {
        if channels == 1 {
            return samples.to_vec();
        }

        samples
            .chunks(channels as usize)
            .map(|chunk| {
                let sum: i32 = chunk.iter().map(|&s| s as i32).sum();
                (sum / channels as i32) as i16
            })
            .collect()
    }

    /// Encode PCM samples into an in-memory WAV container
    fn encode_wav(samples: &[i16], sample_rate: u32) -> Result<AudioBlob, RecordingError> {
        let spec = WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut cursor = Cursor::new(Vec::new());
        let mut writer = WavWriter::new(&mut cursor, spec)
            .map_err(|e| RecordingError::RecordingFailed(format!("WAV init failed: {}", e)))?;

        for &sample in samples {
            writer
                .write_sample(sample)
                .map_err(|e| RecordingError::RecordingFailed(format!("WAV write failed: {}", e)))?;
        }

        writer
            .finalize()
            .map_err(|e| RecordingError::RecordingFailed(format!("WAV finalize failed: {}", e)))?;

        let data = cursor.into_inner();
        if data.is_empty() {
            return Err(RecordingError::EmptyCapture);
        }

        Ok(AudioBlob::new(data, AudioMimeType::Wav))
    }
}

/// Map a device/stream error message to a typed recording error.
/// Permission refusals surface as PermissionDenied so the user gets
/// the microphone-access message instead of a raw driver string.
fn map_device_error(message: &str) -> RecordingError {
    let lower = message.to_lowercase();
    if lower.contains("permission") || lower.contains("denied") || lower.contains("access") {
        RecordingError::PermissionDenied
    } else {
        RecordingError::StartFailed(message.to_string())
    }
}

impl Default for CpalRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VoiceRecorder for CpalRecorder {
    async fn start(&self) -> Result<(), RecordingError> {
        if self.is_recording.load(Ordering::SeqCst) {
            return Err(RecordingError::StartFailed(
                "Recording already in progress".to_string(),
            ));
        }

        {
            let mut buffer = self.audio_buffer.lock().unwrap();
            buffer.clear();
        }
        self.elapsed_ms.store(0, Ordering::SeqCst);
        self.is_recording.store(true, Ordering::SeqCst);

        let audio_buffer = Arc::clone(&self.audio_buffer);
        let device_sample_rate = Arc::clone(&self.device_sample_rate);
        let is_recording = Arc::clone(&self.is_recording);
        let elapsed_ms = Arc::clone(&self.elapsed_ms);

        // Setup outcome travels back over a oneshot so start() can report
        // PermissionDenied / NoAudioDevice instead of a silent failure.
        let (ready_tx, ready_rx) = oneshot::channel::<Result<(), RecordingError>>();

        std::thread::spawn(move || {
            let setup = (|| {
                let device = CpalRecorder::get_input_device()?;
                let (config, sample_format) = CpalRecorder::get_input_config(&device)?;
                let channels = config.channels;
                device_sample_rate.store(config.sample_rate.0, Ordering::SeqCst);

                let buffer = Arc::clone(&audio_buffer);
                let active = Arc::clone(&is_recording);

                let stream = match sample_format {
                    SampleFormat::I16 => device
                        .build_input_stream(
                            &config,
                            move |data: &[i16], _: &cpal::InputCallbackInfo| {
                                if active.load(Ordering::SeqCst) {
                                    let mono = CpalRecorder::mix_to_mono(data, channels);
                                    if let Ok(mut buf) = buffer.lock() {
                                        buf.extend_from_slice(&mono);
                                    }
                                }
                            },
                            |err| eprintln!("Audio stream error: {}", err),
                            None,
                        )
                        .map_err(|e| map_device_error(&e.to_string()))?,

                    SampleFormat::F32 => device
                        .build_input_stream(
                            &config,
                            move |data: &[f32], _: &cpal::InputCallbackInfo| {
                                if active.load(Ordering::SeqCst) {
                                    let i16_data: Vec<i16> =
                                        data.iter().map(|&s| (s * 32767.0) as i16).collect();
                                    let mono = CpalRecorder::mix_to_mono(&i16_data, channels);
                                    if let Ok(mut buf) = buffer.lock() {
                                        buf.extend_from_slice(&mono);
                                    }
                                }
                            },
                            |err| eprintln!("Audio stream error: {}", err),
                            None,
                        )
                        .map_err(|e| map_device_error(&e.to_string()))?,

                    _ => {
                        return Err(RecordingError::StartFailed(
                            "Unsupported sample format".into(),
                        ))
                    }
                };

                stream
                    .play()
                    .map_err(|e| map_device_error(&e.to_string()))?;

                Ok(stream)
            })();

            let stream = match setup {
                Ok(stream) => {
                    let _ = ready_tx.send(Ok(()));
                    stream
                }
                Err(e) => {
                    is_recording.store(false, Ordering::SeqCst);
                    let _ = ready_tx.send(Err(e));
                    return;
                }
            };

            // Keep the stream alive and the elapsed counter ticking until
            // stop() or cancel() flips the flag.
            let started = Instant::now();
            while is_recording.load(Ordering::SeqCst) {
                elapsed_ms.store(started.elapsed().as_millis() as u64, Ordering::SeqCst);
                std::thread::sleep(std::time::Duration::from_millis(100));
            }

            // Releases the microphone device
            drop(stream);
        });

        match ready_rx.await {
            Ok(result) => result,
            Err(_) => {
                self.is_recording.store(false, Ordering::SeqCst);
                Err(RecordingError::StartFailed(
                    "Recording thread exited before starting".into(),
                ))
            }
        }
    }

    async fn stop(&self) -> Result<AudioBlob, RecordingError> {
        if !self.is_recording.load(Ordering::SeqCst) {
            return Err(RecordingError::RecordingFailed(
                "No recording in progress".to_string(),
            ));
        }

        self.is_recording.store(false, Ordering::SeqCst);

        // Give the capture thread a moment to release the device
        tokio::time::sleep(TokioDuration::from_millis(150)).await;

        let sample_rate = self.device_sample_rate.load(Ordering::SeqCst);
        if sample_rate == 0 {
            return Err(RecordingError::RecordingFailed(
                "Sample rate not set".into(),
            ));
        }

        let samples = {
            let mut buffer = self.audio_buffer.lock().unwrap();
            std::mem::take(&mut *buffer)
        };

        if samples.is_empty() {
            return Err(RecordingError::EmptyCapture);
        }

        tokio::task::spawn_blocking(move || Self::encode_wav(&samples, sample_rate))
            .await
            .map_err(|e| RecordingError::RecordingFailed(format!("Encode task error: {}", e)))?
    }

    async fn cancel(&self) -> Result<(), RecordingError> {
        self.is_recording.store(false, Ordering::SeqCst);

        tokio::time::sleep(TokioDuration::from_millis(150)).await;

        {
            let mut buffer = self.audio_buffer.lock().unwrap();
            buffer.clear();
        }
        self.elapsed_ms.store(0, Ordering::SeqCst);

        Ok(())
    }

    fn is_recording(&self) -> bool {
        self.is_recording.load(Ordering::SeqCst)
    }

    fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms.load(Ordering::SeqCst)
    }
}
