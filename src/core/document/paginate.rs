//! 分页器 - 固定行宽、固定页高的贪心排版

use serde::{Deserialize, Serialize};

/// A4 页面尺寸（pt）
pub const A4_WIDTH: f32 = 595.28;
pub const A4_HEIGHT: f32 = 841.89;

/// 标题行占用的垂直高度（pt），与正文行高无关
const TITLE_ADVANCE: f32 = 20.0;

/// 页面布局配置，与内容无关
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
    pub line_height: f32,
    pub max_chars_per_line: usize,
    pub title: Option<String>,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            page_width: A4_WIDTH,
            page_height: A4_HEIGHT,
            margin: 40.0,
            line_height: 12.0,
            max_chars_per_line: 100,
            title: None,
        }
    }
}

impl PageLayout {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// 放置在页面上的一行文本
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedLine {
    pub y: f32,
    pub text: String,
    pub is_title: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub lines: Vec<PlacedLine>,
}

/// 分页结果：(文本, 布局) 的纯函数，相同输入逐字节一致
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedDocument {
    pub layout: PageLayout,
    pub pages: Vec<Page>,
}

impl PaginatedDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// 贪心分页
///
/// 1. 按换行拆分文本，空行保留。
/// 2. 超过 `max_chars_per_line` 的行按字符数硬切分（恰好等于上限的行
///    不切分，与原始排版保持一致）。
/// 3. 若有标题，作为首页第一行输出，并额外占用固定高度。
/// 4. 光标从 `page_height - margin` 起向下走；画一行之前若
///    `y < margin + line_height` 则换页。
pub fn paginate(text: &str, layout: &PageLayout) -> PaginatedDocument {
    let lines = chunk_lines(text, layout.max_chars_per_line);

    let mut pages = Vec::new();
    let mut current = Page::default();
    let mut y = layout.page_height - layout.margin;

    if let Some(title) = &layout.title {
        current.lines.push(PlacedLine {
            y,
            text: title.clone(),
            is_title: true,
        });
        y -= TITLE_ADVANCE;
    }

    for line in lines {
        if y < layout.margin + layout.line_height {
            pages.push(std::mem::take(&mut current));
            y = layout.page_height - layout.margin;
        }
        current.lines.push(PlacedLine {
            y,
            text: line,
            is_title: false,
        });
        y -= layout.line_height;
    }

    pages.push(current);
    PaginatedDocument {
        layout: layout.clone(),
        pages,
    }
}

/// 行切分：长度按字符计，只有严格超限才切分
pub fn chunk_lines(text: &str, max_chars: usize) -> Vec<String> {
    if max_chars == 0 {
        // 0 表示不限制行宽
        return text.lines().map(String::from).collect();
    }

    let mut out = Vec::new();
    for line in text.lines() {
        let mut rest = line;
        while rest.chars().count() > max_chars {
            let split = rest
                .char_indices()
                .nth(max_chars)
                .map(|(i, _)| i)
                .unwrap_or(rest.len());
            out.push(rest[..split].to_string());
            rest = &rest[split..];
        }
        out.push(rest.to_string());
    }
    out
}
