//! 基于外部 ffmpeg 进程的视频源
//!
//! 每次 `frame_at` 用 `-ss` 定位后抓取一帧（对应原始管线逐时间点取帧的
//! 语义），时长用 ffprobe 探测。

use crate::core::error::ConvertError;
use crate::core::frame::Frame;
use crate::core::video::source::VideoSource;
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::FfmpegEvent;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

pub struct FfmpegVideoSource {
    path: PathBuf,
    duration_secs: f64,
    closed: bool,
}

impl FfmpegVideoSource {
    /// 打开视频文件并探测时长
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ConvertError> {
        let path = path.as_ref().to_path_buf();
        let duration_secs = probe_duration(&path)?;
        info!(
            "🎬 Opened video {}: {:.2}s",
            path.display(),
            duration_secs
        );
        Ok(Self {
            path,
            duration_secs,
            closed: false,
        })
    }
}

impl VideoSource for FfmpegVideoSource {
    fn duration(&self) -> f64 {
        self.duration_secs
    }

    fn frame_at(&mut self, timestamp_secs: f64) -> Result<Frame, ConvertError> {
        if self.closed {
            return Err(ConvertError::InputDecode(
                "video source already closed".into(),
            ));
        }

        debug!("🎞️ Decoding frame at t={:.3}s", timestamp_secs);

        // -ss 在 -i 之前：按关键帧快速定位
        let seek = format!("{:.6}", timestamp_secs);
        let mut cmd = FfmpegCommand::new();
        cmd.args(["-ss", seek.as_str()])
            .input(self.path.to_string_lossy().as_ref())
            .args(["-frames:v", "1"])
            .rawvideo();

        let mut child = cmd.spawn().map_err(|e| {
            ConvertError::InputDecode(format!("ffmpeg spawn failed: {}", e))
        })?;

        let events = child.iter().map_err(|e| {
            ConvertError::InputDecode(format!("ffmpeg event stream failed: {}", e))
        })?;

        let mut decoded = None;
        let mut last_error = None;
        for event in events {
            match event {
                FfmpegEvent::OutputFrame(frame) => {
                    decoded = Some(frame);
                    break;
                }
                FfmpegEvent::Error(message) => {
                    last_error = Some(message);
                }
                _ => {}
            }
        }

        let _ = child.kill();
        let _ = child.wait();

        let raw = decoded.ok_or_else(|| {
            ConvertError::InputDecode(format!(
                "no frame decoded at t={:.2}s from {}{}",
                timestamp_secs,
                self.path.display(),
                last_error
                    .map(|e| format!(" ({})", e))
                    .unwrap_or_default()
            ))
        })?;

        Ok(rgb24_to_frame(
            raw.width,
            raw.height,
            &raw.data,
            timestamp_secs,
        ))
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            debug!("🗑️ FfmpegVideoSource: closed {}", self.path.display());
        }
    }
}

impl Drop for FfmpegVideoSource {
    fn drop(&mut self) {
        self.close();
    }
}

/// rawvideo 输出是 rgb24，转成管线内部的 RGBA 帧
fn rgb24_to_frame(width: u32, height: u32, data: &[u8], timestamp_secs: f64) -> Frame {
    let mut rgba = Vec::with_capacity((width * height * 4) as usize);
    for px in data.chunks_exact(3) {
        rgba.extend_from_slice(&[px[0], px[1], px[2], 255]);
    }
    Frame::new(
        width,
        height,
        rgba,
        Duration::from_secs_f64(timestamp_secs),
        0,
    )
}

fn probe_duration(path: &Path) -> Result<f64, ConvertError> {
    let output = Command::new(ffmpeg_sidecar::ffprobe::ffprobe_path())
        .args([
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
        ])
        .arg(path)
        .output()
        .map_err(|e| ConvertError::InputDecode(format!("ffprobe not available: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        warn!("❌ ffprobe failed for {}: {}", path.display(), stderr.trim());
        return Err(ConvertError::InputDecode(format!(
            "{}: {}",
            path.display(),
            stderr.trim()
        )));
    }

    parse_duration(&String::from_utf8_lossy(&output.stdout))
        .ok_or_else(|| ConvertError::InputDecode(format!("{}: unreadable duration", path.display())))
}

fn parse_duration(raw: &str) -> Option<f64> {
    let secs: f64 = raw.trim().parse().ok()?;
    if secs.is_finite() {
        Some(secs)
    } else {
        None
    }
}
