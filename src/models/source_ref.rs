use super::ocr::BoundingBox;
use serde::{Deserialize, Serialize};

/// 候选生成策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Exact,
    Amount,
    Date,
    Fuzzy,
    Multiword,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Exact => "exact",
            Strategy::Amount => "amount",
            Strategy::Date => "date",
            Strategy::Fuzzy => "fuzzy",
            Strategy::Multiword => "multiword",
        }
    }
}

/// 匹配候选 - 只在单个字段的匹配过程中存在
#[derive(Debug, Clone, PartialEq)]
pub struct MatchCandidate {
    pub page_number: u32,
    pub bbox: BoundingBox,
    /// 原始排序分数, exact/amount/date 加成后可能 > 1.0
    pub confidence: f64,
    pub matched_text: String,
    pub strategy: Strategy,
    pub fuzzy_ratio: Option<f64>,
    pub word_count: Option<usize>,
}

/// 字段到原文位置的引用 (点击核验 UI 使用)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceReference {
    pub field: String,
    pub page_number: u32,
    pub bounding_box: BoundingBox,
    pub confidence: f64,
    pub matched_text: String,
    pub strategy: Strategy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_id: Option<String>,
}

impl SourceReference {
    /// 由候选生成引用; confidence 四舍五入到两位小数, clamp 时限制在 [0,1]
    pub fn from_candidate(
        field: &str,
        candidate: MatchCandidate,
        file_id: Option<&str>,
        clamp: bool,
    ) -> Self {
        let mut confidence = candidate.confidence;
        if clamp {
            confidence = confidence.clamp(0.0, 1.0);
        }

        Self {
            field: field.to_string(),
            page_number: candidate.page_number,
            bounding_box: candidate.bbox,
            confidence: round2(confidence),
            matched_text: candidate.matched_text,
            strategy: candidate.strategy,
            file_id: file_id.map(str::to_string),
        }
    }
}

/// 保留两位小数, .5 时取偶数 (1/8 -> 0.12)
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
