use crate::core::error::ConvertError;
use std::path::Path;
use std::time::Duration;

/// 帧数据结构
#[derive(Debug, Clone)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>, // RGBA 格式
    pub timestamp: Duration,
    pub frame_number: u64,
}

impl Frame {
    pub fn new(
        width: u32,
        height: u32,
        data: Vec<u8>,
        timestamp: Duration,
        frame_number: u64,
    ) -> Self {
        Self {
            width,
            height,
            data,
            timestamp,
            frame_number,
        }
    }

    pub fn pixel_count(&self) -> usize {
        (self.width * self.height) as usize
    }

    pub fn timestamp_secs(&self) -> f64 {
        self.timestamp.as_secs_f64()
    }

    /// 转换为灰度图（整数权重）
    pub fn to_gray(&self) -> Vec<u8> {
        self.data
            .chunks_exact(4)
            .map(|rgba| {
                let r = rgba[0] as u32;
                let g = rgba[1] as u32;
                let b = rgba[2] as u32;
                ((r * 299 + g * 587 + b * 114) / 1000) as u8
            })
            .collect()
    }

    fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self::new(width, height, img.into_raw(), Duration::ZERO, 0)
    }
}

/// 解码图片文件为帧
pub fn decode_image(path: &Path) -> Result<Frame, ConvertError> {
    let img = image::open(path)
        .map_err(|e| ConvertError::InputDecode(format!("{}: {}", path.display(), e)))?;
    Ok(Frame::from_rgba_image(img.to_rgba8()))
}

/// 解码内存中的图片字节为帧
pub fn decode_image_bytes(bytes: &[u8]) -> Result<Frame, ConvertError> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| ConvertError::InputDecode(format!("in-memory image: {}", e)))?;
    Ok(Frame::from_rgba_image(img.to_rgba8()))
}
