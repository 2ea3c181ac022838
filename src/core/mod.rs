pub mod audio;
pub mod config;
pub mod document;
pub mod error;
pub mod frame;
pub mod media;
pub mod quality;
pub mod recognize;
pub mod video;

pub use config::ConvertConfig;
pub use error::ConvertError;
pub use frame::Frame;
pub use media::{MediaInput, MediaKind};
pub use quality::QualityGate;
pub use recognize::{EngineError, SpeechRecognizer, TextRecognizer};
