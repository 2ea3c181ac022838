use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 媒体类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Audio,
}

impl MediaKind {
    pub fn from_extension(ext: &str) -> Option<MediaKind> {
        match ext.to_lowercase().as_str() {
            "jpg" | "jpeg" | "png" | "bmp" | "gif" | "webp" | "tiff" | "tif" => {
                Some(MediaKind::Image)
            }
            "mp4" | "mov" | "mkv" | "avi" | "webm" | "m4v" => Some(MediaKind::Video),
            "wav" | "mp3" | "m4a" | "flac" | "ogg" | "aac" => Some(MediaKind::Audio),
            _ => None,
        }
    }
}

/// 媒体输入：路径 + 类型，创建后不可变
#[derive(Debug, Clone)]
pub struct MediaInput {
    path: PathBuf,
    kind: MediaKind,
}

impl MediaInput {
    pub fn new(path: impl Into<PathBuf>, kind: MediaKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    /// 根据扩展名推断媒体类型
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let kind = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(MediaKind::from_extension)?;
        Some(Self { path, kind })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }
}
