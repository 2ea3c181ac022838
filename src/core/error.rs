use crate::core::recognize::EngineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("WAV format error: {0}")]
    Wav(#[from] hound::Error),
    #[error("Resample error: {0}")]
    Resample(String),
    #[error("Input decode failed: {0}")]
    InputDecode(String),
    #[error("Image rejected: sharpness {variance:.2} below threshold {threshold:.2}")]
    QualityRejected { variance: f64, threshold: f64 },
    #[error("No usable text extracted")]
    EmptyExtraction,
    #[error("Recognition engine failed on {unit}: {source}")]
    Engine {
        unit: String,
        #[source]
        source: EngineError,
    },
    #[error("Invalid frame interval: {0} (must be > 0)")]
    InvalidInterval(f64),
    #[error("Artifact write failed: {0}")]
    WriteFailure(String),
}
