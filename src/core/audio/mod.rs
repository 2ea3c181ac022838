pub mod utils;

pub use utils::{load_wav_mono_16k, resample_to_16k_mono};
