use crate::{
    AudioError, AudioRecorder,
    audio::{MAX_BUFFER_SAMPLES, read_wav, samples_to_duration, write_wav},
};

use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::Duration;

fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join("voice-memos-core-tests")
        .join(format!("{}-{}.wav", name, std::process::id()))
}

/// WHAT: Buffer respects MAX_BUFFER_SAMPLES limit
/// WHY: Prevents unbounded memory growth during long recordings
#[test]
fn given_buffer_at_max_capacity_when_adding_samples_then_oldest_discarded() {
    // Given: A VecDeque at max capacity filled with 0.0
    let mut buf = VecDeque::with_capacity(MAX_BUFFER_SAMPLES);
    buf.extend(std::iter::repeat_n(0.0f32, MAX_BUFFER_SAMPLES));

    // When: Adding 1024 new samples beyond the limit
    buf.extend(std::iter::repeat_n(1.0f32, 1024));
    while buf.len() > MAX_BUFFER_SAMPLES {
        buf.pop_front();
    }

    // Then: Buffer stays at MAX_BUFFER_SAMPLES and newest samples are kept
    assert_eq!(buf.len(), MAX_BUFFER_SAMPLES);
    assert!((buf[MAX_BUFFER_SAMPLES - 1] - 1.0).abs() < f32::EPSILON);
    assert!((buf[MAX_BUFFER_SAMPLES - 1025]).abs() < f32::EPSILON);
}

/// WHAT: Sample counts convert to durations per frame, not per sample
/// WHY: Memo durations must not double for stereo input
#[test]
fn given_stereo_samples_when_computing_duration_then_counts_frames() {
    // Given: One second of 48kHz stereo
    let samples = 48_000 * 2;

    // When: Converting to a duration
    let duration = samples_to_duration(samples, 2, 48_000);

    // Then: Exactly one second
    assert_eq!(duration, Duration::from_secs(1));
    assert_eq!(samples_to_duration(samples, 0, 48_000), Duration::ZERO);
}

/// WHAT: Written WAV files decode back to the same layout
/// WHY: Playback relies on the recorder's channel count and rate
#[test]
#[allow(clippy::unwrap_used)]
fn given_samples_when_writing_wav_then_file_decodes_with_same_layout() {
    // Given: A short stereo ramp
    let path = scratch_path("layout");
    let samples: Vec<f32> = (0..200).map(|i| (i as f32 / 200.0) - 0.5).collect();

    // When: Writing and reading it back
    write_wav(&path, &samples, 2, 44_100).unwrap();
    let (decoded, channels, rate) = read_wav(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    // Then: Layout matches and values survive 16-bit quantisation
    assert_eq!(channels, 2);
    assert_eq!(rate, 44_100);
    assert_eq!(decoded.len(), samples.len());
    for (original, restored) in samples.iter().zip(&decoded) {
        assert!((original - restored).abs() < 1e-3);
    }
}

/// WHAT: Out-of-range samples are clamped when written
/// WHY: Overdriven input must not wrap around to the opposite polarity
#[test]
#[allow(clippy::unwrap_used)]
fn given_clipping_samples_when_writing_wav_then_values_clamped() {
    // Given: Samples beyond full scale
    let path = scratch_path("clamp");

    // When: Writing and reading back
    write_wav(&path, &[2.0, -2.0], 1, 8_000).unwrap();
    let (decoded, _, _) = read_wav(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    // Then: Values are pinned to full scale with the original sign
    assert!(decoded[0] > 0.99);
    assert!(decoded[1] < -0.99);
}

/// WHAT: Reading a missing file is a WAV error
/// WHY: Playback failure must surface as a typed error, not a panic
#[test]
fn given_missing_file_when_reading_wav_then_wav_error() {
    // Given: A path that does not exist
    let path = PathBuf::from("/nonexistent/voice-memo.wav");

    // When: Reading it
    let result = read_wav(&path);

    // Then: WavError is returned
    assert!(matches!(result, Err(AudioError::WavError { .. })));
}

/// WHAT: Stopping a recorder that never started fails cleanly
/// WHY: A stray stop must not write an empty file
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)] // Requires an audio input device
#[allow(clippy::unwrap_used)]
fn given_idle_recorder_when_stopping_then_not_recording_error() {
    // Given: A recorder on the default input device
    let mut recorder = AudioRecorder::new().unwrap();

    // When: Stopping without starting
    let result = recorder.stop();

    // Then: NotRecording is returned
    assert!(matches!(result, Err(AudioError::NotRecording { .. })));
}
