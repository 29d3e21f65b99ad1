mod player;
mod recorder;
mod resampler;
