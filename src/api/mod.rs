pub mod audio;
pub mod convert;
pub mod image;
pub mod video;

pub use audio::AudioConverter;
pub use convert::{ConvertOutput, EngineSet, MediaConverter};
pub use image::ImageConverter;
pub use video::VideoConverter;
