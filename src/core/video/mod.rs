pub mod ffmpeg;
pub mod sampler;
pub mod source;

pub use ffmpeg::FfmpegVideoSource;
pub use sampler::FrameSampler;
pub use source::{MockVideoSource, VideoSource};
