//! 识别引擎适配层 - OCR / 语音转写能力接口
//!
//! 管线只通过这两个 trait 调用识别引擎，不依赖任何具体引擎的错误类型。

use crate::core::frame::Frame;
use std::sync::Mutex;
use std::time::Duration;
use thiserror::Error;

/// 引擎侧故障，管线只观察这三种
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine unavailable: {0}")]
    Unavailable(String),
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("engine timed out after {0:?}")]
    Timeout(Duration),
}

/// 图片文字识别（OCR）
///
/// 返回的文本可以为空；空文本不是错误，由调用方决定如何处理。
/// `&self` 接收者：同一实例可跨多次调用复用，实现方不得做每次调用的内部可变。
pub trait TextRecognizer: Send + Sync {
    fn recognize(&self, frame: &Frame) -> Result<String, EngineError>;
}

/// 语音转写（ASR）
///
/// `samples` 为 16 kHz 单声道 f32 PCM，取值范围 [-1.0, 1.0]。
pub trait SpeechRecognizer: Send + Sync {
    fn transcribe(
        &self,
        samples: &[f32],
        sample_rate: u32,
        language: Option<&str>,
    ) -> Result<String, EngineError>;
}

/// 按帧返回固定模式文本的 OCR mock
pub struct MockTextRecognizer {
    pattern: Box<dyn Fn(&Frame) -> String + Send + Sync>,
}

impl MockTextRecognizer {
    pub fn empty() -> Self {
        Self::with_pattern(|_| String::new())
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::with_pattern(move |_| text.clone())
    }

    pub fn with_pattern<F>(pattern: F) -> Self
    where
        F: Fn(&Frame) -> String + Send + Sync + 'static,
    {
        Self {
            pattern: Box::new(pattern),
        }
    }
}

impl TextRecognizer for MockTextRecognizer {
    fn recognize(&self, frame: &Frame) -> Result<String, EngineError> {
        Ok((self.pattern)(frame))
    }
}

/// 返回固定文本并记录语言提示的 ASR mock
pub struct MockSpeechRecognizer {
    text: String,
    last_language: Mutex<Option<String>>,
}

impl MockSpeechRecognizer {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            last_language: Mutex::new(None),
        }
    }

    pub fn last_language(&self) -> Option<String> {
        self.last_language.lock().ok().and_then(|g| (*g).clone())
    }
}

impl SpeechRecognizer for MockSpeechRecognizer {
    fn transcribe(
        &self,
        _samples: &[f32],
        _sample_rate: u32,
        language: Option<&str>,
    ) -> Result<String, EngineError> {
        if let Ok(mut guard) = self.last_language.lock() {
            *guard = language.map(String::from);
        }
        Ok(self.text.clone())
    }
}

/// 始终失败的引擎，用于验证错误传播
pub struct UnavailableEngine;

impl TextRecognizer for UnavailableEngine {
    fn recognize(&self, _frame: &Frame) -> Result<String, EngineError> {
        Err(EngineError::Unavailable("engine not loaded".into()))
    }
}

impl SpeechRecognizer for UnavailableEngine {
    fn transcribe(
        &self,
        _samples: &[f32],
        _sample_rate: u32,
        _language: Option<&str>,
    ) -> Result<String, EngineError> {
        Err(EngineError::Unavailable("engine not loaded".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_frame(frame_number: u64) -> Frame {
        Frame::new(
            4,
            4,
            vec![128u8; 4 * 4 * 4],
            Duration::from_secs(frame_number),
            frame_number,
        )
    }

    #[test]
    fn test_mock_text_pattern() {
        let engine = MockTextRecognizer::with_pattern(|f| {
            if f.frame_number == 2 {
                "HELLO".into()
            } else {
                String::new()
            }
        });

        assert_eq!(engine.recognize(&test_frame(2)).unwrap(), "HELLO");
        assert_eq!(engine.recognize(&test_frame(1)).unwrap(), "");
    }

    #[test]
    fn test_mock_speech_records_language() {
        let engine = MockSpeechRecognizer::with_text("bonjour");
        let text = engine.transcribe(&[0.0; 16], 16_000, Some("fr")).unwrap();
        assert_eq!(text, "bonjour");
        assert_eq!(engine.last_language().as_deref(), Some("fr"));
    }

    #[test]
    fn test_unavailable_engine_fails() {
        let engine = UnavailableEngine;
        assert!(matches!(
            engine.recognize(&test_frame(0)),
            Err(EngineError::Unavailable(_))
        ));
    }
}
