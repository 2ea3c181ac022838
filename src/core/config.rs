use crate::core::document::paginate::PageLayout;
use crate::core::quality::DEFAULT_SHARPNESS_THRESHOLD;
use serde::{Deserialize, Serialize};

/// 转换管线配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertConfig {
    /// 视频抽帧间隔（秒），必须 > 0
    pub frame_interval_secs: f64,
    /// 图片锐度阈值，拉普拉斯方差低于该值则拒绝
    pub sharpness_threshold: f64,
    /// 转写语言提示，None 表示自动检测
    pub language_hint: Option<String>,
    pub layout: PageLayout,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            frame_interval_secs: 1.0,
            sharpness_threshold: DEFAULT_SHARPNESS_THRESHOLD,
            language_hint: None,
            layout: PageLayout::default(),
        }
    }
}

impl ConvertConfig {
    /// 字幕变化快的视频：抽帧更密
    pub fn for_dense_text() -> Self {
        Self {
            frame_interval_secs: 0.5,
            ..Default::default()
        }
    }

    /// 静态画面为主的视频：抽帧更疏
    pub fn for_sparse_text() -> Self {
        Self {
            frame_interval_secs: 2.0,
            ..Default::default()
        }
    }
}
