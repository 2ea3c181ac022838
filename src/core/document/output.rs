//! 产物落盘 - 全量成功或全量失败

use crate::core::document::paginate::PaginatedDocument;
use crate::core::error::ConvertError;
use log::{info, warn};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// 成功写出的两个产物路径
#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub text_path: PathBuf,
    pub document_path: PathBuf,
}

/// 写出 `<stem>.txt` 与 `<stem>.pages.json`
///
/// 先写临时文件再重命名提交；任何一步失败都会清理已产生的文件，
/// 调用方要么拿到两个路径，要么拿到错误，不会观察到部分成功。
pub fn write_outputs(
    out_stem: &Path,
    text: &str,
    document: &PaginatedDocument,
) -> Result<OutputPaths, ConvertError> {
    let text_path = with_suffix(out_stem, ".txt");
    let document_path = with_suffix(out_stem, ".pages.json");
    let text_tmp = with_suffix(out_stem, ".txt.tmp");
    let document_tmp = with_suffix(out_stem, ".pages.json.tmp");

    let json = serde_json::to_vec_pretty(document)
        .map_err(|e| ConvertError::WriteFailure(format!("document serialization: {}", e)))?;

    stage(&text_tmp, text.as_bytes())?;
    if let Err(e) = stage(&document_tmp, &json) {
        let _ = fs::remove_file(&text_tmp);
        return Err(e);
    }

    if let Err(e) = fs::rename(&text_tmp, &text_path) {
        let _ = fs::remove_file(&text_tmp);
        let _ = fs::remove_file(&document_tmp);
        return Err(ConvertError::WriteFailure(format!(
            "{}: {}",
            text_path.display(),
            e
        )));
    }
    if let Err(e) = fs::rename(&document_tmp, &document_path) {
        // 文本产物已提交，撤回以维持全有或全无
        warn!("❌ Document commit failed, rolling back {}", text_path.display());
        let _ = fs::remove_file(&text_path);
        let _ = fs::remove_file(&document_tmp);
        return Err(ConvertError::WriteFailure(format!(
            "{}: {}",
            document_path.display(),
            e
        )));
    }

    info!(
        "📄 Wrote {} and {}",
        text_path.display(),
        document_path.display()
    );
    Ok(OutputPaths {
        text_path,
        document_path,
    })
}

fn stage(path: &Path, bytes: &[u8]) -> Result<(), ConvertError> {
    fs::write(path, bytes).map_err(|e| {
        let _ = fs::remove_file(path);
        ConvertError::WriteFailure(format!("{}: {}", path.display(), e))
    })
}

/// `stem + suffix`，不吞掉 stem 里已有的点号
fn with_suffix(stem: &Path, suffix: &str) -> PathBuf {
    let mut s: OsString = stem.as_os_str().to_os_string();
    s.push(suffix);
    PathBuf::from(s)
}
