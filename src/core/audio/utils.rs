//! 音频预处理 - WAV 读取、单声道混合、16 kHz 重采样

use crate::core::error::ConvertError;
use log::{debug, error, info};
use rubato::{Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType};
use std::path::Path;

/// 转写引擎统一要求的采样率
pub const TARGET_SAMPLE_RATE: u32 = 16_000;

/// 读取 WAV 文件，混为单声道并重采样到 16 kHz
pub fn load_wav_mono_16k(path: &Path) -> Result<Vec<f32>, ConvertError> {
    info!("📖 Reading WAV file: {}", path.display());
    let mut reader = hound::WavReader::open(path)?;
    let spec = reader.spec();

    info!(
        "📊 WAV spec: {} Hz, {} channels, {} bits ({:?})",
        spec.sample_rate, spec.channels, spec.bits_per_sample, spec.sample_format
    );

    if spec.sample_rate == 0 || spec.channels == 0 {
        return Err(ConvertError::Wav(hound::Error::FormatError(
            "invalid sample rate or channel count",
        )));
    }

    let mono = read_mono(&mut reader, &spec)?;
    debug!("Loaded {} mono samples", mono.len());

    if spec.sample_rate != TARGET_SAMPLE_RATE {
        resample_to_16k_mono(&mono, spec.sample_rate)
    } else {
        Ok(mono)
    }
}

/// 按采样帧混合所有声道为单声道 f32
fn read_mono<R: std::io::Read>(
    reader: &mut hound::WavReader<R>,
    spec: &hound::WavSpec,
) -> Result<Vec<f32>, ConvertError> {
    let channels = spec.channels as usize;
    let mut mono = Vec::with_capacity(reader.duration() as usize);
    let mut frame = Vec::with_capacity(channels);

    match spec.sample_format {
        hound::SampleFormat::Float => {
            for sample in reader.samples::<f32>() {
                frame.push(sample?);
                if frame.len() == channels {
                    mono.push(frame.iter().sum::<f32>() / channels as f32);
                    frame.clear();
                }
            }
        }
        hound::SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample.max(1) - 1)) as f32;
            for sample in reader.samples::<i32>() {
                frame.push(sample? as f32 / scale);
                if frame.len() == channels {
                    mono.push(frame.iter().sum::<f32>() / channels as f32);
                    frame.clear();
                }
            }
        }
    }

    Ok(mono)
}

pub fn resample_to_16k_mono(input: &[f32], in_rate: u32) -> Result<Vec<f32>, ConvertError> {
    if in_rate == TARGET_SAMPLE_RATE {
        return Ok(input.to_vec());
    }

    if in_rate % TARGET_SAMPLE_RATE == 0 {
        let factor = (in_rate / TARGET_SAMPLE_RATE) as usize;
        debug!(
            "⚡ Fast downsample from {} Hz to 16 kHz (factor {})",
            in_rate, factor
        );
        return Ok(downsample_by_factor(input, factor));
    }

    info!(
        "🔧 Resampling {} samples from {} Hz to 16 kHz",
        input.len(),
        in_rate
    );
    let ratio = TARGET_SAMPLE_RATE as f64 / in_rate as f64;
    let params = SincInterpolationParameters {
        sinc_len: 48,
        f_cutoff: 0.90,
        interpolation: SincInterpolationType::Cubic,
        oversampling_factor: 4,
        window: rubato::WindowFunction::BlackmanHarris2,
    };

    let mut resampler =
        SincFixedIn::<f32>::new(ratio, 1.0, params, input.len(), 1).map_err(|e| {
            error!("❌ Resampler creation failed: {}", e);
            ConvertError::Resample(e.to_string())
        })?;

    let mut output = vec![vec![0.0f32; input.len() * 2]];
    resampler
        .process_into_buffer(&[input], &mut output, None)
        .map_err(|e| {
            error!("❌ Resample processing failed: {}", e);
            ConvertError::Resample(e.to_string())
        })?;

    let result: Vec<f32> = output.into_iter().flatten().collect();
    debug!("Resampled {} -> {} samples", input.len(), result.len());
    Ok(result)
}

/// 整数倍下采样：按组平均
fn downsample_by_factor(input: &[f32], factor: usize) -> Vec<f32> {
    debug_assert!(factor > 0);
    let mut output = Vec::with_capacity((input.len() + factor - 1) / factor);
    let mut accumulator = 0.0_f32;
    let mut count = 0;

    for &sample in input {
        accumulator += sample;
        count += 1;
        if count == factor {
            output.push(accumulator / factor as f32);
            accumulator = 0.0;
            count = 0;
        }
    }

    if count > 0 {
        output.push(accumulator / count as f32);
    }

    output
}
