use crate::audio::Resampler;

const INPUT_RATE: u32 = 44_100;
const OUTPUT_RATE: u32 = 48_000;
// The FFT resampler delays its output by part of a chunk.
const LENGTH_TOLERANCE: usize = 2_400;

/// WHAT: Stereo 44.1kHz resamples to about the same duration at 48kHz
/// WHY: Playback length must match the memo's recorded duration
#[test]
#[allow(clippy::unwrap_used)]
fn given_stereo_audio_when_resampling_up_then_frame_count_scaled() {
    // Given: One second of stereo at 44.1kHz
    let mut resampler = Resampler::new(INPUT_RATE, OUTPUT_RATE, 2).unwrap();
    let input = vec![0.5_f32; INPUT_RATE as usize * 2];

    // When: Resampling
    let output = resampler.resample(&input).unwrap();

    // Then: About one second of 48kHz stereo, whole frames only
    assert_eq!(output.len() % 2, 0);
    assert!(
        (output.len() / 2).abs_diff(OUTPUT_RATE as usize) < LENGTH_TOLERANCE,
        "Expected ~{} frames, got {}",
        OUTPUT_RATE,
        output.len() / 2
    );
    assert!(output.iter().all(|s| s.is_finite()));
}

/// WHAT: Empty input gives empty output
/// WHY: A file with a header but no frames is still playable
#[test]
#[allow(clippy::unwrap_used)]
fn given_empty_samples_when_resampling_then_empty_output() {
    // Given
    let mut resampler = Resampler::new(INPUT_RATE, OUTPUT_RATE, 1).unwrap();

    // When
    let output = resampler.resample(&[]).unwrap();

    // Then
    assert!(output.is_empty());
}
