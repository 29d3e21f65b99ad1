use crate::audio::{convert, remix};

const DEVICE_RATE: u32 = 48_000;
const HALF_RATE: u32 = 24_000;
// The FFT resampler delays its output by part of a chunk.
const LENGTH_TOLERANCE: usize = 2_400;

/// WHAT: Mono input fills every output channel
/// WHY: Recordings from a mono microphone must play on both speakers
#[test]
fn given_mono_source_when_remixing_to_stereo_then_channels_duplicated() {
    // Given: Three mono samples
    let samples = [0.1, 0.2, 0.3];

    // When: Remixing to stereo
    let output = remix(&samples, 1, 2);

    // Then: Each sample appears on both channels
    assert_eq!(output, vec![0.1, 0.1, 0.2, 0.2, 0.3, 0.3]);
}

/// WHAT: Extra source channels are dropped when the device has fewer
/// WHY: A stereo memo must still play on a mono output
#[test]
fn given_stereo_source_when_remixing_to_mono_then_first_channel_kept() {
    // Given: Two stereo frames
    let samples = [0.1, 0.9, 0.2, 0.8];

    // When: Remixing to mono
    let output = remix(&samples, 2, 1);

    // Then: One sample per frame
    assert_eq!(output, vec![0.1, 0.2]);
}

/// WHAT: Matching rate and layout pass samples through untouched
/// WHY: No resampler should run when the device matches the file
#[test]
#[allow(clippy::unwrap_used)]
fn given_matching_format_when_converting_then_samples_unchanged() {
    // Given: Stereo samples at the device rate
    let samples = [0.1, -0.1, 0.2, -0.2];

    // When: Converting to the same format
    let output = convert(&samples, 2, DEVICE_RATE, 2, DEVICE_RATE).unwrap();

    // Then: Identical
    assert_eq!(output, samples.to_vec());
}

/// WHAT: Upsampling roughly doubles the frame count and fills both channels
/// WHY: Output devices rarely share the microphone's rate
#[test]
#[allow(clippy::unwrap_used)]
fn given_half_rate_mono_when_converting_to_device_stereo_then_length_scaled() {
    // Given: One second of mono at 24kHz
    let samples = vec![0.25_f32; HALF_RATE as usize];

    // When: Converting to 48kHz stereo
    let output = convert(&samples, 1, HALF_RATE, 2, DEVICE_RATE).unwrap();

    // Then: About one second of stereo frames, all finite, channels equal
    let frames = output.len() / 2;
    assert!(
        frames.abs_diff(DEVICE_RATE as usize) < LENGTH_TOLERANCE,
        "Expected ~{} frames, got {}",
        DEVICE_RATE,
        frames
    );
    assert!(output.iter().all(|s| s.is_finite()));
    assert!(output.chunks_exact(2).all(|frame| frame[0] == frame[1]));
}

/// WHAT: Degenerate layouts produce no audio
/// WHY: A corrupt header must not reach the resampler
#[test]
#[allow(clippy::unwrap_used)]
fn given_zero_channels_when_converting_then_empty() {
    // Given/When: A source that claims zero channels
    let output = convert(&[0.5, 0.5], 0, DEVICE_RATE, 2, DEVICE_RATE).unwrap();

    // Then: Nothing to play
    assert!(output.is_empty());
}
