use serde::{Deserialize, Serialize};

/// 缺省页面尺寸 (US Letter, 单位: point)
pub const DEFAULT_PAGE_WIDTH: f64 = 612.0;
pub const DEFAULT_PAGE_HEIGHT: f64 = 792.0;

/// OCR 未给出置信度时的缺省值
pub const DEFAULT_WORD_CONFIDENCE: f64 = 0.95;

/// 边界框 (像素或 0-1 归一化单位)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    #[serde(default)]
    pub left: f64,
    #[serde(default)]
    pub top: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
}

impl BoundingBox {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    fn components(&self) -> [f64; 4] {
        [self.left, self.top, self.width, self.height]
    }

    /// 所有分量 <= 2 时视为已归一化 (启发式, 对极小像素框不精确)
    pub fn looks_normalized(&self) -> bool {
        self.components().iter().all(|v| *v <= 2.0)
    }
}

/// OCR 识别出的单词 (Token)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrWord {
    pub text: String,
    #[serde(default = "default_confidence")]
    pub confidence: f64,
    #[serde(default)]
    pub bounding_box: BoundingBox,
}

/// 单页 OCR 结果, words 按阅读顺序排列
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrPage {
    #[serde(default = "default_page_number")]
    pub page_number: u32,
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default)]
    pub words: Vec<OcrWord>,
}

impl OcrPage {
    /// 用于归一化的页面尺寸, 非正数时回退到缺省值
    pub fn dimensions(&self) -> (f64, f64) {
        let width = if self.width > 0.0 { self.width } else { DEFAULT_PAGE_WIDTH };
        let height = if self.height > 0.0 { self.height } else { DEFAULT_PAGE_HEIGHT };
        (width, height)
    }
}

/// 整个文档的 OCR 语料
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OcrCorpus {
    #[serde(default)]
    pub pages: Vec<OcrPage>,
}

impl OcrCorpus {
    pub fn word_count(&self) -> usize {
        self.pages.iter().map(|p| p.words.len()).sum()
    }
}

fn default_confidence() -> f64 {
    DEFAULT_WORD_CONFIDENCE
}

fn default_page_number() -> u32 {
    1
}

fn default_width() -> f64 {
    DEFAULT_PAGE_WIDTH
}

fn default_height() -> f64 {
    DEFAULT_PAGE_HEIGHT
}
