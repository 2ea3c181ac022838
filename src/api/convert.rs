//! 统一入口 - 按媒体类型分发

use crate::api::audio::AudioConverter;
use crate::api::image::ImageConverter;
use crate::api::video::VideoConverter;
use crate::core::config::ConvertConfig;
use crate::core::document::output::write_outputs;
use crate::core::document::paginate::{paginate, PageLayout};
use crate::core::error::ConvertError;
use crate::core::media::{MediaInput, MediaKind};
use crate::core::recognize::{SpeechRecognizer, TextRecognizer};
use std::path::{Path, PathBuf};

/// 一次转换运行的结果
#[derive(Debug, Clone)]
pub struct ConvertOutput {
    /// 聚合后的完整文本
    pub text: String,
    pub text_path: PathBuf,
    pub document_path: PathBuf,
    pub page_count: usize,
}

/// 调用方持有的引擎句柄集合
///
/// 引擎生命周期（加载一次、跨调用复用、退出时释放）归调用方所有，
/// 管线内部不加载也不缓存任何引擎。
pub struct EngineSet<'a> {
    pub text: &'a dyn TextRecognizer,
    pub speech: &'a dyn SpeechRecognizer,
}

/// 按 `MediaKind` 分发到对应的转换器
pub struct MediaConverter {
    config: ConvertConfig,
}

impl MediaConverter {
    pub fn new() -> Self {
        Self::with_config(ConvertConfig::default())
    }

    pub fn with_config(config: ConvertConfig) -> Self {
        Self { config }
    }

    pub fn convert(
        &self,
        input: &MediaInput,
        engines: &EngineSet<'_>,
        out_stem: &Path,
    ) -> Result<ConvertOutput, ConvertError> {
        match input.kind() {
            MediaKind::Image => ImageConverter::with_config(self.config.clone()).convert(
                input.path(),
                engines.text,
                out_stem,
            ),
            MediaKind::Video => VideoConverter::with_config(self.config.clone()).convert(
                input.path(),
                engines.text,
                out_stem,
            ),
            MediaKind::Audio => AudioConverter::with_config(self.config.clone()).convert(
                input.path(),
                engines.speech,
                out_stem,
            ),
        }
    }
}

impl Default for MediaConverter {
    fn default() -> Self {
        Self::new()
    }
}

/// 分页 + 落盘，三个转换器共用的收尾
pub(crate) fn finish(
    layout: &PageLayout,
    title: String,
    text: &str,
    out_stem: &Path,
) -> Result<ConvertOutput, ConvertError> {
    let layout = layout.clone().with_title(title);
    let paged = paginate(text, &layout);
    let paths = write_outputs(out_stem, text, &paged)?;
    Ok(ConvertOutput {
        text: text.to_string(),
        text_path: paths.text_path,
        document_path: paths.document_path,
        page_count: paged.page_count(),
    })
}

/// 产物标题里用的文件名
pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
