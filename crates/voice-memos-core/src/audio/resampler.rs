use crate::{AudioError, CoreResult};

use std::panic::Location;

use audioadapter_buffers::direct::InterleavedSlice;
use error_location::ErrorLocation;
use rubato::{Fft, FixedSync, Resampler as RubatoResampler};
use tracing::{debug, instrument};

/// Frames handed to the FFT resampler per call.
const CHUNK_FRAMES: usize = 1024;
const SUB_CHUNKS: usize = 2;

/// Converts interleaved audio between sample rates.
pub(crate) struct Resampler {
    resampler: Fft<f32>,
    channels: usize,
    input_rate: u32,
    output_rate: u32,
}

impl Resampler {
    #[track_caller]
    #[instrument]
    pub(crate) fn new(input_rate: u32, output_rate: u32, channels: u16) -> CoreResult<Self> {
        let channels = usize::from(channels);

        let resampler = Fft::<f32>::new(
            input_rate as usize,
            output_rate as usize,
            CHUNK_FRAMES,
            SUB_CHUNKS,
            channels,
            FixedSync::Input,
        )
        .map_err(|e| AudioError::ResamplingError {
            reason: format!("Failed to create resampler: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        debug!(
            input_rate = input_rate,
            output_rate = output_rate,
            channels = channels,
            "Resampler initialized"
        );

        Ok(Self {
            resampler,
            channels,
            input_rate,
            output_rate,
        })
    }

    /// Resample interleaved `samples`. A trailing partial chunk is padded
    /// with silence and the result trimmed to the expected length.
    #[track_caller]
    #[instrument(skip(self, samples))]
    pub(crate) fn resample(&mut self, samples: &[f32]) -> CoreResult<Vec<f32>> {
        let input_frames = samples.len() / self.channels;
        if input_frames == 0 {
            return Ok(Vec::new());
        }

        let estimated_frames =
            (input_frames as f64 * f64::from(self.output_rate) / f64::from(self.input_rate))
                as usize;
        let mut output = Vec::with_capacity(estimated_frames * self.channels);

        let chunk_len = CHUNK_FRAMES * self.channels;
        for chunk in samples[..input_frames * self.channels].chunks(chunk_len) {
            let mut input_chunk = chunk.to_vec();
            input_chunk.resize(chunk_len, 0.0);

            let input_adapter = InterleavedSlice::new(&input_chunk, self.channels, CHUNK_FRAMES)
                .map_err(|e| AudioError::ResamplingError {
                    reason: format!("Failed to create input adapter: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                })?;

            let max_frames = self.resampler.output_frames_max();
            let mut output_chunk = vec![0.0f32; max_frames * self.channels];

            let mut output_adapter =
                InterleavedSlice::new_mut(&mut output_chunk, self.channels, max_frames).map_err(
                    |e| AudioError::ResamplingError {
                        reason: format!("Failed to create output adapter: {}", e),
                        location: ErrorLocation::from(Location::caller()),
                    },
                )?;

            let (_frames_read, frames_written) = self
                .resampler
                .process_into_buffer(&input_adapter, &mut output_adapter, None)
                .map_err(|e| AudioError::ResamplingError {
                    reason: format!("Resampling failed: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                })?;

            output.extend_from_slice(&output_chunk[..frames_written * self.channels]);
        }

        output.truncate(estimated_frames * self.channels);

        debug!(
            input_frames = input_frames,
            output_frames = output.len() / self.channels,
            input_rate = self.input_rate,
            output_rate = self.output_rate,
            "Resampled audio"
        );

        Ok(output)
    }
}
