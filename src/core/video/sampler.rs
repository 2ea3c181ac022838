//! 定间隔抽帧采样器

use crate::core::error::ConvertError;
use crate::core::frame::Frame;
use crate::core::video::source::VideoSource;
use log::debug;
use std::time::Duration;

/// 惰性抽帧序列
///
/// 从 t = 0 开始，每 `interval_secs` 取一帧，时间戳严格小于视频时长；
/// 总帧数为 ceil(duration / interval)。时间戳恒为间隔的整数倍，
/// 单调递增，无重复。
///
/// 解码资源在序列耗尽、提前 drop、或解码出错时都会被释放；
/// 错误在释放之后才向外传播。
pub struct FrameSampler<S: VideoSource> {
    source: S,
    interval_secs: f64,
    total_frames: u64,
    next_index: u64,
    closed: bool,
}

impl<S: VideoSource> FrameSampler<S> {
    pub fn open(source: S, interval_secs: f64) -> Result<Self, ConvertError> {
        if !interval_secs.is_finite() || interval_secs <= 0.0 {
            return Err(ConvertError::InvalidInterval(interval_secs));
        }

        let duration = source.duration();
        let total_frames = if duration > 0.0 {
            (duration / interval_secs).ceil() as u64
        } else {
            0
        };

        debug!(
            "🎞️ Sampler: duration {:.2}s, interval {:.2}s -> {} frames",
            duration, interval_secs, total_frames
        );

        Ok(Self {
            source,
            interval_secs,
            total_frames,
            next_index: 0,
            closed: false,
        })
    }

    pub fn frame_count(&self) -> u64 {
        self.total_frames
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.source.close();
        }
    }
}

impl<S: VideoSource> Iterator for FrameSampler<S> {
    type Item = Result<Frame, ConvertError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.closed {
            return None;
        }
        if self.next_index >= self.total_frames {
            self.close();
            return None;
        }

        let index = self.next_index;
        self.next_index += 1;
        let t = index as f64 * self.interval_secs;

        match self.source.frame_at(t) {
            Ok(mut frame) => {
                // 时间戳由采样器盖章，保证恒为间隔的整数倍
                frame.timestamp = Duration::from_secs_f64(t);
                frame.frame_number = index;
                Some(Ok(frame))
            }
            Err(e) => {
                // 先释放解码资源，错误才离开序列边界
                self.close();
                Some(Err(e))
            }
        }
    }
}

impl<S: VideoSource> Drop for FrameSampler<S> {
    fn drop(&mut self) {
        self.close();
    }
}
