use super::geometry::{clamp_unit, normalize_bbox, union_bbox};
use super::normalize::{levenshtein_ratio, normalize_amount, normalize_date, parse_amount};
use crate::config::LinkerConfig;
use crate::models::{FieldValue, MatchCandidate, OcrCorpus, OcrPage, OcrWord, Strategy};

/// 字段类型, 决定使用哪些候选生成策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Code,
    Text,
    Amount,
    Date,
    Name,
    Provider,
    EncounterType,
    Description,
}

impl FieldKind {
    pub fn strategies(&self) -> &'static [Strategy] {
        match self {
            FieldKind::Code | FieldKind::Text => &[Strategy::Exact],
            FieldKind::Amount => &[Strategy::Amount],
            FieldKind::Date => &[Strategy::Date],
            FieldKind::Name | FieldKind::Provider | FieldKind::EncounterType | FieldKind::Description => {
                &[Strategy::Fuzzy, Strategy::Multiword]
            }
        }
    }

    /// 人名/机构名要求更高的模糊相似度
    pub fn fuzzy_threshold(&self, config: &LinkerConfig) -> f64 {
        match self {
            FieldKind::Name | FieldKind::Provider => config.fuzzy_name_threshold,
            _ => config.fuzzy_text_threshold,
        }
    }
}

/// 对一个字段值运行所有适用的策略, 按发现顺序合并候选
pub fn generate_candidates(
    value: &FieldValue,
    kind: FieldKind,
    corpus: &OcrCorpus,
    config: &LinkerConfig,
) -> Vec<MatchCandidate> {
    let text = value.as_text();
    let mut candidates = Vec::new();

    for strategy in kind.strategies() {
        let found = match strategy {
            Strategy::Exact => exact_match(&text, corpus, config),
            Strategy::Amount => amount_match(value, corpus, config),
            Strategy::Date => date_match(&text, corpus, config),
            Strategy::Fuzzy => fuzzy_match(&text, kind.fuzzy_threshold(config), corpus, config),
            Strategy::Multiword => multiword_match(&text, corpus, config),
        };
        candidates.extend(found);
    }

    candidates
}

fn single_word_candidate(
    page: &OcrPage,
    word: &OcrWord,
    confidence: f64,
    strategy: Strategy,
    fuzzy_ratio: Option<f64>,
) -> MatchCandidate {
    MatchCandidate {
        page_number: page.page_number,
        bbox: clamp_unit(normalize_bbox(&word.bounding_box, page)),
        confidence,
        matched_text: word.text.clone(),
        strategy,
        fuzzy_ratio,
        word_count: None,
    }
}

/// 策略1: 精确匹配 (去除首尾空白后相等)
pub fn exact_match(value: &str, corpus: &OcrCorpus, config: &LinkerConfig) -> Vec<MatchCandidate> {
    let value = value.trim();
    let mut candidates = Vec::new();

    for page in &corpus.pages {
        for word in &page.words {
            if word.text.trim() == value {
                candidates.push(single_word_candidate(
                    page,
                    word,
                    word.confidence + config.exact_boost,
                    Strategy::Exact,
                    None,
                ));
            }
        }
    }

    candidates
}

/// 策略2: 金额匹配 (容差内相等, 完全相等加成更高)
pub fn amount_match(value: &FieldValue, corpus: &OcrCorpus, config: &LinkerConfig) -> Vec<MatchCandidate> {
    let Some(target) = normalize_amount(value) else {
        return Vec::new();
    };
    let mut candidates = Vec::new();

    for page in &corpus.pages {
        for word in &page.words {
            let Some(amount) = parse_amount(&word.text) else {
                continue;
            };
            if (amount - target).abs() >= config.amount_tolerance {
                continue;
            }

            let boost = if amount == target {
                config.amount_exact_boost
            } else {
                config.amount_near_boost
            };
            candidates.push(single_word_candidate(
                page,
                word,
                word.confidence + boost,
                Strategy::Amount,
                None,
            ));
        }
    }

    candidates
}

/// 策略3: 日期匹配 (双方归一化为 YYYY-MM-DD 后比较)
pub fn date_match(value: &str, corpus: &OcrCorpus, config: &LinkerConfig) -> Vec<MatchCandidate> {
    let Some(target) = normalize_date(value) else {
        return Vec::new();
    };
    let mut candidates = Vec::new();

    for page in &corpus.pages {
        for word in &page.words {
            if normalize_date(&word.text).as_deref() == Some(target.as_str()) {
                candidates.push(single_word_candidate(
                    page,
                    word,
                    word.confidence + config.date_boost,
                    Strategy::Date,
                    None,
                ));
            }
        }
    }

    candidates
}

/// 策略4: 单词级模糊匹配, 相似度越低扣分越多
pub fn fuzzy_match(
    value: &str,
    threshold: f64,
    corpus: &OcrCorpus,
    config: &LinkerConfig,
) -> Vec<MatchCandidate> {
    let value = value.trim().to_lowercase();
    let mut candidates = Vec::new();

    for page in &corpus.pages {
        for word in &page.words {
            let ratio = levenshtein_ratio(&value, &word.text.to_lowercase());
            if ratio < threshold {
                continue;
            }

            let penalty = (100.0 - ratio) / 100.0 * config.fuzzy_penalty_weight;
            candidates.push(single_word_candidate(
                page,
                word,
                (word.confidence - penalty).max(0.0),
                Strategy::Fuzzy,
                Some(ratio),
            ));
        }
    }

    candidates
}

/// 策略5: 连续多词滑动窗口匹配, 输出并集框和平均置信度
pub fn multiword_match(value: &str, corpus: &OcrCorpus, config: &LinkerConfig) -> Vec<MatchCandidate> {
    let value = value.trim();
    if value.split_whitespace().count() < config.multiword_min_words {
        return Vec::new();
    }

    let value = value.to_lowercase();
    let mut candidates = Vec::new();

    for page in &corpus.pages {
        let words = &page.words;
        let lowered: Vec<String> = words.iter().map(|w| w.text.to_lowercase()).collect();
        let max_window = config.multiword_max_window.min(words.len());

        for size in 2..=max_window {
            for start in 0..=(words.len() - size) {
                let span = &words[start..start + size];
                let ratio = levenshtein_ratio(&value, &lowered[start..start + size].join(" "));
                if ratio < config.multiword_threshold {
                    continue;
                }

                let Some(bbox) = union_bbox(span, page) else {
                    continue;
                };
                let confidence = span.iter().map(|w| w.confidence).sum::<f64>() / size as f64;

                candidates.push(MatchCandidate {
                    page_number: page.page_number,
                    bbox: clamp_unit(bbox),
                    confidence,
                    matched_text: span.iter().map(|w| w.text.as_str()).collect::<Vec<_>>().join(" "),
                    strategy: Strategy::Multiword,
                    fuzzy_ratio: Some(ratio),
                    word_count: Some(size),
                });
            }
        }
    }

    candidates
}
