//! 提取结果聚合 - 合并有序提取单元为单一文档

use std::time::Duration;

/// 单个提取结果：一张图、一帧、或一段音频对应一个单元
#[derive(Debug, Clone)]
pub struct ExtractionUnit {
    pub timestamp: Option<Duration>,
    pub text: String,
}

impl ExtractionUnit {
    /// 无时间戳单元（图片 / 音频来源）
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            timestamp: None,
            text: text.into(),
        }
    }

    /// 带时间戳单元（视频帧来源）
    pub fn at(timestamp: Duration, text: impl Into<String>) -> Self {
        Self {
            timestamp: Some(timestamp),
            text: text.into(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// 聚合后的文档，构建后不可变
#[derive(Debug, Clone)]
pub struct AggregatedDocument {
    units: Vec<ExtractionUnit>,
    text: String,
}

impl AggregatedDocument {
    /// 保留下来的非空单元
    pub fn units(&self) -> &[ExtractionUnit] {
        &self.units
    }

    /// 渲染后的完整文本
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

/// 聚合有序提取单元
///
/// 空文本单元被丢弃但不打乱其余单元的顺序。带时间戳的单元渲染为
/// `--- t=<秒, 两位小数>s ---` 标记行加正文，单元之间以一个空行分隔；
/// 无时间戳的单元原样输出。
pub fn aggregate(units: Vec<ExtractionUnit>) -> AggregatedDocument {
    debug_assert!(
        units
            .windows(2)
            .all(|w| match (w[0].timestamp, w[1].timestamp) {
                (Some(a), Some(b)) => a <= b,
                _ => true,
            }),
        "extraction units out of timestamp order"
    );

    let kept: Vec<ExtractionUnit> = units.into_iter().filter(|u| !u.is_blank()).collect();

    let blocks: Vec<String> = kept
        .iter()
        .map(|unit| match unit.timestamp {
            Some(ts) => format!("--- t={:.2}s ---\n{}", ts.as_secs_f64(), unit.text),
            None => unit.text.clone(),
        })
        .collect();

    let text = blocks.join("\n\n");
    AggregatedDocument { units: kept, text }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_unit_has_no_marker() {
        let doc = aggregate(vec![ExtractionUnit::new("hello world")]);
        assert_eq!(doc.text(), "hello world");
        assert_eq!(doc.units().len(), 1);
    }

    #[test]
    fn test_video_units_render_markers_in_order() {
        let doc = aggregate(vec![
            ExtractionUnit::at(Duration::from_secs(1), "first"),
            ExtractionUnit::at(Duration::from_secs(2), "second"),
        ]);
        assert_eq!(
            doc.text(),
            "--- t=1.00s ---\nfirst\n\n--- t=2.00s ---\nsecond"
        );
        // 恰好一个空行分隔、两个标记
        assert_eq!(doc.text().matches("--- t=").count(), 2);
        assert_eq!(doc.text().matches("\n\n").count(), 1);
    }

    #[test]
    fn test_blank_units_dropped_without_breaking_order() {
        let doc = aggregate(vec![
            ExtractionUnit::at(Duration::from_secs(0), "  \n "),
            ExtractionUnit::at(Duration::from_secs(1), "kept"),
            ExtractionUnit::at(Duration::from_secs(2), ""),
            ExtractionUnit::at(Duration::from_secs(3), "also kept"),
        ]);
        assert_eq!(doc.units().len(), 2);
        assert_eq!(
            doc.text(),
            "--- t=1.00s ---\nkept\n\n--- t=3.00s ---\nalso kept"
        );
    }

    #[test]
    fn test_all_blank_yields_empty_document() {
        let doc = aggregate(vec![
            ExtractionUnit::at(Duration::from_secs(0), ""),
            ExtractionUnit::at(Duration::from_secs(1), "   "),
        ]);
        assert!(doc.is_empty());
        assert_eq!(doc.text(), "");
    }

    #[test]
    fn test_fractional_timestamp_rendering() {
        let doc = aggregate(vec![ExtractionUnit::at(Duration::from_millis(2500), "x")]);
        assert_eq!(doc.text(), "--- t=2.50s ---\nx");
    }
}
