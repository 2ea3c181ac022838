//! 视频源能力接口

use crate::core::error::ConvertError;
use crate::core::frame::Frame;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// 隐藏具体解码器的视频源
///
/// 实现方负责底层解码会话；`close` 必须幂等，采样器保证在序列耗尽、
/// 提前放弃或出错时都会调用它。
pub trait VideoSource {
    /// 视频总时长（秒）
    fn duration(&self) -> f64;

    /// 解码指定时间点的一帧
    fn frame_at(&mut self, timestamp_secs: f64) -> Result<Frame, ConvertError>;

    /// 释放解码资源
    fn close(&mut self) {}
}

/// 产生纯灰帧的视频源 mock
pub struct MockVideoSource {
    duration_secs: f64,
    width: u32,
    height: u32,
    closed: Arc<AtomicBool>,
}

impl MockVideoSource {
    pub fn new(duration_secs: f64) -> Self {
        Self {
            duration_secs,
            width: 64,
            height: 64,
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// 共享的关闭标记，测试用来断言资源确实被释放
    pub fn close_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.closed)
    }
}

impl VideoSource for MockVideoSource {
    fn duration(&self) -> f64 {
        self.duration_secs
    }

    fn frame_at(&mut self, timestamp_secs: f64) -> Result<Frame, ConvertError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(ConvertError::InputDecode("source already closed".into()));
        }
        let data = vec![128u8; (self.width * self.height * 4) as usize];
        Ok(Frame::new(
            self.width,
            self.height,
            data,
            Duration::from_secs_f64(timestamp_secs),
            0,
        ))
    }

    fn close(&mut self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}
