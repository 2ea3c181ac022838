//! 图片转换器 - OCR 单张图片并输出产物

use crate::api::convert::{display_name, finish, ConvertOutput};
use crate::core::config::ConvertConfig;
use crate::core::document::aggregate::{aggregate, ExtractionUnit};
use crate::core::error::ConvertError;
use crate::core::frame::{decode_image, decode_image_bytes, Frame};
use crate::core::quality::QualityGate;
use crate::core::recognize::TextRecognizer;
use log::{debug, info};
use std::path::Path;

pub struct ImageConverter {
    config: ConvertConfig,
}

impl ImageConverter {
    pub fn new() -> Self {
        Self::with_config(ConvertConfig::default())
    }

    pub fn with_config(config: ConvertConfig) -> Self {
        Self { config }
    }

    /// 图片文件 -> 文本 + 分页文档
    ///
    /// 流程：解码 -> 质量闸 -> OCR -> 空文本后置闸 -> 聚合 -> 分页 -> 落盘
    pub fn convert(
        &self,
        image_path: &Path,
        engine: &dyn TextRecognizer,
        out_stem: &Path,
    ) -> Result<ConvertOutput, ConvertError> {
        info!("🖼️ Converting image {}", image_path.display());
        let frame = decode_image(image_path)?;
        let title = format!("OCR {}", display_name(image_path));
        self.run(frame, &image_path.display().to_string(), title, engine, out_stem)
    }

    /// 内存中的图片字节 -> 文本 + 分页文档
    pub fn convert_bytes(
        &self,
        bytes: &[u8],
        engine: &dyn TextRecognizer,
        out_stem: &Path,
    ) -> Result<ConvertOutput, ConvertError> {
        info!("🖼️ Converting in-memory image ({} bytes)", bytes.len());
        let frame = decode_image_bytes(bytes)?;
        self.run(frame, "in-memory image", "OCR image".to_string(), engine, out_stem)
    }

    fn run(
        &self,
        frame: Frame,
        unit: &str,
        title: String,
        engine: &dyn TextRecognizer,
        out_stem: &Path,
    ) -> Result<ConvertOutput, ConvertError> {
        let gate = QualityGate::new(self.config.sharpness_threshold);
        let variance = gate.assess(&frame)?;
        debug!("Quality gate passed, variance {:.2}", variance);

        let text = engine
            .recognize(&frame)
            .map_err(|e| ConvertError::Engine {
                unit: unit.to_string(),
                source: e,
            })?;

        // 提取后的二次闸：空白文本视为不可用
        if text.trim().is_empty() {
            return Err(ConvertError::EmptyExtraction);
        }

        let doc = aggregate(vec![ExtractionUnit::new(text)]);
        info!("✅ Image OCR done, {} chars", doc.text().len());
        finish(&self.config.layout, title, doc.text(), out_stem)
    }
}

impl Default for ImageConverter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::recognize::{MockTextRecognizer, UnavailableEngine};
    use std::fs;

    /// 写一张高对比棋盘格 PNG，稳过质量闸
    fn write_sharp_png(path: &Path) {
        let img = image::RgbaImage::from_fn(64, 64, |x, y| {
            if (x + y) % 2 == 0 {
                image::Rgba([255, 255, 255, 255])
            } else {
                image::Rgba([0, 0, 0, 255])
            }
        });
        img.save(path).unwrap();
    }

    /// 纯色 PNG，方差为 0，必被质量闸拒绝
    fn write_flat_png(path: &Path) {
        let img = image::RgbaImage::from_pixel(64, 64, image::Rgba([128, 128, 128, 255]));
        img.save(path).unwrap();
    }

    #[test]
    fn test_image_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let img_path = dir.path().join("doc.png");
        write_sharp_png(&img_path);

        let engine = MockTextRecognizer::with_text("scanned text");
        let output = ImageConverter::new()
            .convert(&img_path, &engine, &dir.path().join("doc_out"))
            .unwrap();

        assert_eq!(output.text, "scanned text");
        assert_eq!(output.page_count, 1);
        assert_eq!(
            fs::read_to_string(&output.text_path).unwrap(),
            "scanned text"
        );
        assert!(output.document_path.exists());
    }

    #[test]
    fn test_blurry_image_rejected_before_engine() {
        let dir = tempfile::tempdir().unwrap();
        let img_path = dir.path().join("flat.png");
        write_flat_png(&img_path);

        // 引擎不可用也无妨：质量闸先拒绝
        let result = ImageConverter::new().convert(
            &img_path,
            &UnavailableEngine,
            &dir.path().join("flat_out"),
        );
        assert!(matches!(
            result,
            Err(ConvertError::QualityRejected { .. })
        ));
    }

    #[test]
    fn test_empty_extraction_is_error_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let img_path = dir.path().join("doc.png");
        write_sharp_png(&img_path);

        let stem = dir.path().join("doc_out");
        let result =
            ImageConverter::new().convert(&img_path, &MockTextRecognizer::empty(), &stem);
        assert!(matches!(result, Err(ConvertError::EmptyExtraction)));

        let mut txt = stem.as_os_str().to_os_string();
        txt.push(".txt");
        assert!(!Path::new(&txt).exists());
    }

    #[test]
    fn test_undecodable_input() {
        let dir = tempfile::tempdir().unwrap();
        let bogus = dir.path().join("not_an_image.png");
        fs::write(&bogus, b"garbage").unwrap();

        let result = ImageConverter::new().convert(
            &bogus,
            &MockTextRecognizer::with_text("x"),
            &dir.path().join("out"),
        );
        assert!(matches!(result, Err(ConvertError::InputDecode(_))));
    }

    #[test]
    fn test_engine_failure_tagged_with_unit() {
        let dir = tempfile::tempdir().unwrap();
        let img_path = dir.path().join("doc.png");
        write_sharp_png(&img_path);

        let result = ImageConverter::new().convert(
            &img_path,
            &UnavailableEngine,
            &dir.path().join("out"),
        );
        match result {
            Err(ConvertError::Engine { unit, .. }) => {
                assert!(unit.contains("doc.png"));
            }
            other => panic!("expected Engine error, got {:?}", other.map(|_| ())),
        }
    }
}
