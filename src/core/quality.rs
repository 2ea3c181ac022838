//! 图片质量闸 - 基于拉普拉斯方差的模糊检测

use crate::core::error::ConvertError;
use crate::core::frame::Frame;
use log::debug;

/// 默认锐度阈值，方差低于该值的图片视为模糊
pub const DEFAULT_SHARPNESS_THRESHOLD: f64 = 100.0;

pub struct QualityGate {
    sharpness_threshold: f64,
}

impl QualityGate {
    pub fn new(sharpness_threshold: f64) -> Self {
        Self {
            sharpness_threshold,
        }
    }

    /// 评估图片锐度；通过时返回方差，否则返回 QualityRejected
    ///
    /// 边界规则：方差等于阈值时通过，严格小于阈值时拒绝。
    pub fn assess(&self, frame: &Frame) -> Result<f64, ConvertError> {
        let gray = frame.to_gray();
        let variance = laplacian_variance(&gray, frame.width, frame.height);
        debug!(
            "🔍 Sharpness variance {:.2} (threshold {:.2})",
            variance, self.sharpness_threshold
        );

        if variance < self.sharpness_threshold {
            return Err(ConvertError::QualityRejected {
                variance,
                threshold: self.sharpness_threshold,
            });
        }
        Ok(variance)
    }
}

impl Default for QualityGate {
    fn default() -> Self {
        Self::new(DEFAULT_SHARPNESS_THRESHOLD)
    }
}

/// 灰度图拉普拉斯响应的总体方差（边缘锐度代理）
///
/// Kernel [[0,1,0],[1,-4,1],[0,1,0]] over interior pixels.
pub fn laplacian_variance(gray: &[u8], width: u32, height: u32) -> f64 {
    let w = width as usize;
    let h = height as usize;

    if w < 3 || h < 3 || gray.len() < w * h {
        return 0.0;
    }

    let mut sum = 0.0f64;
    let mut sum_sq = 0.0f64;
    let count = ((w - 2) * (h - 2)) as f64;

    for y in 1..(h - 1) {
        let row = y * w;
        for x in 1..(w - 1) {
            let idx = row + x;
            let lap = gray[idx - 1] as i32
                + gray[idx + 1] as i32
                + gray[idx - w] as i32
                + gray[idx + w] as i32
                - 4 * gray[idx] as i32;
            let lap = lap as f64;
            sum += lap;
            sum_sq += lap * lap;
        }
    }

    let mean = sum / count;
    sum_sq / count - mean * mean
}
