use crate::{
    AudioError, CoreResult,
    audio::{recorder::samples_to_duration, resampler::Resampler},
};

use std::{
    panic::Location,
    path::Path,
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    time::Duration,
};

use cpal::{
    Stream,
    traits::{DeviceTrait, HostTrait, StreamTrait},
};
use error_location::ErrorLocation;
use tracing::{debug, error, info, instrument};

/// Plays WAV files on the default output device.
pub struct AudioPlayer;

impl AudioPlayer {
    /// Decode `location` and start playing it.
    ///
    /// Playback stops when the returned [`Playback`] is dropped.
    #[track_caller]
    #[instrument]
    pub fn play(location: &Path) -> CoreResult<Playback> {
        let (samples, source_channels, source_rate) = read_wav(location)?;

        let device = cpal::default_host()
            .default_output_device()
            .ok_or(AudioError::NoOutputDevice {
                location: ErrorLocation::from(Location::caller()),
            })?;

        let config: cpal::StreamConfig = device
            .default_output_config()
            .map_err(|e| AudioError::DeviceError {
                reason: format!("Failed to get output config: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?
            .into();

        let output = convert(
            &samples,
            source_channels,
            source_rate,
            config.channels,
            config.sample_rate,
        )?;
        let duration = samples_to_duration(output.len(), config.channels, config.sample_rate);

        let cursor = Arc::new(AtomicUsize::new(0));
        let finished = Arc::new(AtomicBool::new(output.is_empty()));

        let stream = {
            let cursor = Arc::clone(&cursor);
            let finished = Arc::clone(&finished);
            device
                .build_output_stream(
                    &config,
                    move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                        let start = cursor.load(Ordering::Acquire);
                        let available = output.len().saturating_sub(start);
                        let count = available.min(data.len());
                        data[..count].copy_from_slice(&output[start..start + count]);
                        data[count..].fill(0.0);
                        cursor.store(start + count, Ordering::Release);
                        if start + count >= output.len() {
                            finished.store(true, Ordering::Release);
                        }
                    },
                    |err| {
                        error!("Audio output stream error: {}", err);
                    },
                    None,
                )
                .map_err(|e| AudioError::DeviceError {
                    reason: format!("Failed to build output stream: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                })?
        };

        stream.play().map_err(|e| AudioError::DeviceError {
            reason: format!("Failed to start output stream: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(
            location = ?location,
            duration_ms = duration.as_millis(),
            "Playback started"
        );

        Ok(Playback {
            _stream: stream,
            cursor,
            finished,
            channels: config.channels,
            sample_rate: config.sample_rate,
            duration,
        })
    }
}

/// A running playback. Dropping it stops the sound.
pub struct Playback {
    _stream: Stream,
    cursor: Arc<AtomicUsize>,
    finished: Arc<AtomicBool>,
    channels: u16,
    sample_rate: u32,
    duration: Duration,
}

impl Playback {
    /// Whether every sample has been handed to the device.
    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Acquire)
    }

    /// Time played so far.
    pub fn elapsed(&self) -> Duration {
        samples_to_duration(self.cursor.load(Ordering::Acquire), self.channels, self.sample_rate)
    }

    /// Total length.
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

/// Read a WAV file into interleaved `f32` samples.
#[track_caller]
pub(crate) fn read_wav(location: &Path) -> CoreResult<(Vec<f32>, u16, u32)> {
    let mut reader = hound::WavReader::open(location)?;
    let spec = reader.spec();

    let samples = match spec.sample_format {
        hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<Vec<_>, _>>()?,
        hound::SampleFormat::Int => {
            let scale = (1_i64 << (spec.bits_per_sample.saturating_sub(1))) as f32;
            reader
                .samples::<i32>()
                .map(|sample| sample.map(|value| value as f32 / scale))
                .collect::<Result<Vec<_>, _>>()?
        }
    };

    debug!(
        sample_count = samples.len(),
        channels = spec.channels,
        sample_rate = spec.sample_rate,
        "WAV decoded"
    );

    Ok((samples, spec.channels, spec.sample_rate))
}

/// Map interleaved audio onto another sample rate and channel layout.
///
/// Degenerate layouts produce no audio.
#[track_caller]
pub(crate) fn convert(
    samples: &[f32],
    source_channels: u16,
    source_rate: u32,
    target_channels: u16,
    target_rate: u32,
) -> CoreResult<Vec<f32>> {
    if source_channels == 0 || target_channels == 0 || source_rate == 0 || target_rate == 0 {
        return Ok(Vec::new());
    }

    let resampled = if source_rate == target_rate {
        samples.to_vec()
    } else {
        Resampler::new(source_rate, target_rate, source_channels)?.resample(samples)?
    };

    Ok(remix(&resampled, source_channels, target_channels))
}

/// Map interleaved frames onto another channel count.
///
/// Output channels beyond the source's repeat the last source channel, so
/// mono fills every speaker. Extra source channels are dropped.
pub(crate) fn remix(samples: &[f32], source_channels: u16, target_channels: u16) -> Vec<f32> {
    let source_channels = usize::from(source_channels);
    let target_channels = usize::from(target_channels);
    if source_channels == 0 || target_channels == 0 {
        return Vec::new();
    }
    if source_channels == target_channels {
        return samples.to_vec();
    }

    let frames = samples.len() / source_channels;
    let mut output = Vec::with_capacity(frames * target_channels);
    for frame in samples.chunks_exact(source_channels) {
        for channel in 0..target_channels {
            output.push(frame[channel.min(source_channels - 1)]);
        }
    }
    output
}
