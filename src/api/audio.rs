//! 音频转换器 - WAV 读取、重采样、整段转写

use crate::api::convert::{display_name, finish, ConvertOutput};
use crate::core::audio::utils::{load_wav_mono_16k, TARGET_SAMPLE_RATE};
use crate::core::config::ConvertConfig;
use crate::core::document::aggregate::{aggregate, ExtractionUnit};
use crate::core::error::ConvertError;
use crate::core::recognize::SpeechRecognizer;
use log::info;
use std::path::Path;

pub struct AudioConverter {
    config: ConvertConfig,
}

impl AudioConverter {
    pub fn new() -> Self {
        Self::with_config(ConvertConfig::default())
    }

    pub fn with_config(config: ConvertConfig) -> Self {
        Self { config }
    }

    /// 音频文件 -> 文本 + 分页文档
    ///
    /// 转写结果作为单个无时间戳单元聚合，空转写产出空文档而非错误。
    pub fn convert(
        &self,
        audio_path: &Path,
        engine: &dyn SpeechRecognizer,
        out_stem: &Path,
    ) -> Result<ConvertOutput, ConvertError> {
        info!("🎵 Converting audio {}", audio_path.display());
        let samples = load_wav_mono_16k(audio_path)?;

        let text = engine
            .transcribe(
                &samples,
                TARGET_SAMPLE_RATE,
                self.config.language_hint.as_deref(),
            )
            .map_err(|e| ConvertError::Engine {
                unit: audio_path.display().to_string(),
                source: e,
            })?;

        let doc = aggregate(vec![ExtractionUnit::new(text)]);
        info!("✅ Transcription done, {} chars", doc.text().len());

        let title = format!("Transcription {}", display_name(audio_path));
        finish(&self.config.layout, title, doc.text(), out_stem)
    }
}

impl Default for AudioConverter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::recognize::{MockSpeechRecognizer, UnavailableEngine};
    use std::fs;

    fn write_test_wav(path: &Path, sample_rate: u32) {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for i in 0..(sample_rate / 10) {
            let v = if i % 2 == 0 { 1000i16 } else { -1000i16 };
            writer.write_sample(v).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_audio_end_to_end_no_marker() {
        let dir = tempfile::tempdir().unwrap();
        let wav_path = dir.path().join("memo.wav");
        write_test_wav(&wav_path, 16_000);

        let engine = MockSpeechRecognizer::with_text("spoken words here");
        let output = AudioConverter::new()
            .convert(&wav_path, &engine, &dir.path().join("memo_out"))
            .unwrap();

        // 单单元音频文档没有时间戳标记
        assert_eq!(output.text, "spoken words here");
        assert!(!output.text.contains("--- t="));
        assert_eq!(
            fs::read_to_string(&output.text_path).unwrap(),
            "spoken words here"
        );
    }

    #[test]
    fn test_language_hint_reaches_engine() {
        let dir = tempfile::tempdir().unwrap();
        let wav_path = dir.path().join("fr.wav");
        write_test_wav(&wav_path, 32_000);

        let config = ConvertConfig {
            language_hint: Some("fr".into()),
            ..Default::default()
        };
        let engine = MockSpeechRecognizer::with_text("bonjour");
        AudioConverter::with_config(config)
            .convert(&wav_path, &engine, &dir.path().join("fr_out"))
            .unwrap();

        assert_eq!(engine.last_language().as_deref(), Some("fr"));
    }

    #[test]
    fn test_engine_failure_tagged_with_source_path() {
        let dir = tempfile::tempdir().unwrap();
        let wav_path = dir.path().join("memo.wav");
        write_test_wav(&wav_path, 16_000);

        let result = AudioConverter::new().convert(
            &wav_path,
            &UnavailableEngine,
            &dir.path().join("memo_out"),
        );
        match result {
            Err(ConvertError::Engine { unit, .. }) => assert!(unit.contains("memo.wav")),
            other => panic!("expected Engine error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_unreadable_audio_fails() {
        let dir = tempfile::tempdir().unwrap();
        let bogus = dir.path().join("bogus.wav");
        fs::write(&bogus, b"not a wav").unwrap();

        let result = AudioConverter::new().convert(
            &bogus,
            &MockSpeechRecognizer::with_text("x"),
            &dir.path().join("out"),
        );
        assert!(result.is_err());
    }
}
