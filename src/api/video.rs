//! 视频转换器 - 定间隔抽帧、逐帧 OCR、按时间戳聚合

use crate::api::convert::{display_name, finish, ConvertOutput};
use crate::core::config::ConvertConfig;
use crate::core::document::aggregate::{aggregate, ExtractionUnit};
use crate::core::error::ConvertError;
use crate::core::recognize::TextRecognizer;
use crate::core::video::ffmpeg::FfmpegVideoSource;
use crate::core::video::sampler::FrameSampler;
use crate::core::video::source::VideoSource;
use log::info;
use std::path::Path;

pub struct VideoConverter {
    config: ConvertConfig,
}

impl VideoConverter {
    pub fn new() -> Self {
        Self::with_config(ConvertConfig::default())
    }

    pub fn with_config(config: ConvertConfig) -> Self {
        Self { config }
    }

    /// 视频文件 -> 文本 + 分页文档（ffmpeg 解码）
    pub fn convert(
        &self,
        video_path: &Path,
        engine: &dyn TextRecognizer,
        out_stem: &Path,
    ) -> Result<ConvertOutput, ConvertError> {
        let source = FfmpegVideoSource::open(video_path)?;
        self.convert_source(source, engine, &display_name(video_path), out_stem)
    }

    /// 任意视频源 -> 文本 + 分页文档
    ///
    /// 逐帧识别是惰性消费采样序列的；任何一帧识别失败都会带着该帧的
    /// 时间戳向上传播，解码资源由采样器保证释放。
    pub fn convert_source<S: VideoSource>(
        &self,
        source: S,
        engine: &dyn TextRecognizer,
        name: &str,
        out_stem: &Path,
    ) -> Result<ConvertOutput, ConvertError> {
        info!("🎬 Converting video {}", name);
        let sampler = FrameSampler::open(source, self.config.frame_interval_secs)?;

        let mut units = Vec::new();
        for frame in sampler {
            let frame = frame?;
            let timestamp = frame.timestamp;
            let text = engine
                .recognize(&frame)
                .map_err(|e| ConvertError::Engine {
                    unit: format!("frame t={:.2}s", timestamp.as_secs_f64()),
                    source: e,
                })?;
            units.push(ExtractionUnit::at(timestamp, text));
        }

        let sampled = units.len();
        let doc = aggregate(units);
        info!(
            "✅ Video OCR done: {} frames sampled, {} with text",
            sampled,
            doc.units().len()
        );

        let title = format!("OCR video {}", name);
        finish(&self.config.layout, title, doc.text(), out_stem)
    }
}

impl Default for VideoConverter {
    fn default() -> Self {
        Self::new()
    }
}
