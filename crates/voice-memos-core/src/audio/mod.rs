mod player;
mod recorder;
mod resampler;

pub use {
    player::{AudioPlayer, Playback},
    recorder::AudioRecorder,
};

#[cfg(test)]
pub(crate) use {
    player::{convert, read_wav, remix},
    recorder::{MAX_BUFFER_SAMPLES, samples_to_duration, write_wav},
    resampler::Resampler,
};
