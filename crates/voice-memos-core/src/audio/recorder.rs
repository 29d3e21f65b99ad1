use crate::{AudioError, CoreResult};

use std::{
    collections::VecDeque,
    panic::Location,
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicBool, Ordering},
        {Arc, Mutex},
    },
    time::Duration,
};

use cpal::{
    Device, Stream, StreamConfig,
    traits::{DeviceTrait, HostTrait, StreamTrait},
};
use error_location::ErrorLocation;
use tracing::{debug, error, info, instrument};

/// Maximum samples to buffer (10 minutes of 48kHz stereo).
///
/// **Memory footprint at max capacity:**
/// - 48,000 Hz * 2 channels * 600s * 4 bytes/f32 = ~230MB
/// - Oldest audio is dropped past this point
pub(crate) const MAX_BUFFER_SAMPLES: usize = 48_000 * 2 * 60 * 10;

/// Captures audio from the default input device into a WAV file.
pub struct AudioRecorder {
    device: Device,
    config: StreamConfig,
    stream: Option<Stream>,
    location: Option<PathBuf>,
    samples: Arc<Mutex<VecDeque<f32>>>,
    /// Set before the stream is dropped so no in-flight callback writes
    /// after `stop()` takes the buffer.
    shutdown: Arc<AtomicBool>,
}

impl AudioRecorder {
    /// Open the default input device.
    #[track_caller]
    #[instrument]
    pub fn new() -> CoreResult<Self> {
        let device = Self::default_input()?;

        let config = device
            .default_input_config()
            .map_err(|e| AudioError::DeviceError {
                reason: format!("Failed to get config: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!(
            device_id = ?device.id(),
            sample_rate = config.sample_rate(),
            channels = config.channels(),
            "AudioRecorder initialized"
        );

        Ok(Self {
            device,
            config: config.into(),
            stream: None,
            location: None,
            samples: Arc::new(Mutex::new(VecDeque::new())),
            shutdown: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Check that an input device exists and reports a usable configuration.
    ///
    /// Desktop platforms without a dedicated permission prompt treat this as
    /// the microphone permission check.
    #[track_caller]
    #[instrument]
    pub fn check_input_device() -> CoreResult<()> {
        let device = Self::default_input()?;
        device
            .default_input_config()
            .map_err(|e| AudioError::DeviceError {
                reason: format!("Input device unusable: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;
        Ok(())
    }

    /// Start capturing. The file is written by [`stop`](Self::stop).
    #[track_caller]
    #[instrument(skip(self))]
    pub fn start(&mut self, location: &Path) -> CoreResult<()> {
        let samples = Arc::clone(&self.samples);
        let shutdown = Arc::clone(&self.shutdown);

        self.shutdown.store(false, Ordering::Release);

        samples
            .lock()
            .map_err(|e| AudioError::DeviceError {
                reason: format!("Failed to lock samples: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?
            .clear();

        let stream = self
            .device
            .build_input_stream(
                &self.config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    if shutdown.load(Ordering::Acquire) {
                        return;
                    }
                    // A poisoned mutex still holds valid samples.
                    let mut buf = samples.lock().unwrap_or_else(|e| {
                        error!("Sample buffer lock poisoned, recovering: {}", e);
                        e.into_inner()
                    });
                    buf.extend(data.iter().copied());
                    while buf.len() > MAX_BUFFER_SAMPLES {
                        buf.pop_front();
                    }
                },
                |err| {
                    error!("Audio input stream error: {}", err);
                },
                None,
            )
            .map_err(|e| AudioError::DeviceError {
                reason: format!("Failed to build stream: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        stream.play().map_err(|e| AudioError::DeviceError {
            reason: format!("Failed to start stream: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        self.stream = Some(stream);
        self.location = Some(location.to_path_buf());
        info!(location = ?location, "Audio capture started");

        Ok(())
    }

    /// Stop capturing, write the WAV file and return its duration.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn stop(&mut self) -> CoreResult<Duration> {
        self.shutdown.store(true, Ordering::Release);

        let Some(stream) = self.stream.take() else {
            return Err(AudioError::NotRecording {
                location: ErrorLocation::from(Location::caller()),
            });
        };
        drop(stream);
        // Let a final in-flight callback observe the shutdown flag.
        std::thread::sleep(Duration::from_millis(5));
        info!("Audio capture stopped");

        let location = self.location.take().ok_or_else(|| AudioError::NotRecording {
            location: ErrorLocation::from(Location::caller()),
        })?;

        let samples: Vec<f32> = self
            .samples
            .lock()
            .map_err(|e| AudioError::DeviceError {
                reason: format!("Failed to lock samples: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?
            .drain(..)
            .collect();

        if samples.is_empty() {
            return Err(AudioError::NoAudioCaptured {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        write_wav(&location, &samples, self.config.channels, self.config.sample_rate)?;

        let duration =
            samples_to_duration(samples.len(), self.config.channels, self.config.sample_rate);
        debug!(
            sample_count = samples.len(),
            duration_ms = duration.as_millis(),
            location = ?location,
            "Recording written"
        );

        Ok(duration)
    }

    #[track_caller]
    fn default_input() -> CoreResult<Device> {
        cpal::default_host()
            .default_input_device()
            .ok_or(AudioError::NoMicrophoneFound {
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

/// Duration of `sample_count` interleaved samples.
pub(crate) fn samples_to_duration(
    sample_count: usize,
    channels: u16,
    sample_rate: u32,
) -> Duration {
    if channels == 0 || sample_rate == 0 {
        return Duration::ZERO;
    }
    let frames = sample_count as f64 / f64::from(channels);
    Duration::from_secs_f64(frames / f64::from(sample_rate))
}

/// Write interleaved `f32` samples as 16-bit PCM.
#[track_caller]
pub(crate) fn write_wav(
    location: &Path,
    samples: &[f32],
    channels: u16,
    sample_rate: u32,
) -> CoreResult<()> {
    if let Some(parent) = location.parent() {
        std::fs::create_dir_all(parent).map_err(|e| AudioError::DeviceError {
            reason: format!("Failed to create recording directory: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;
    }

    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(location, spec)?;
    for sample in samples {
        let value = (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16;
        writer.write_sample(value)?;
    }
    writer.finalize()?;

    Ok(())
}
