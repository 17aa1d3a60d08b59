use super::source_ref::{round2, SourceReference, Strategy};
use serde::{Deserialize, Serialize};

/// 匹配统计累加器 - 每次链接调用独立创建
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchStats {
    pub total_fields: usize,
    pub matched: usize,
    pub unmatched: usize,
    pub fuzzy_matched: usize,
    pub multiword_matched: usize,
}

impl MatchStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一次字段匹配的结果 (每个字段调用一次, 不是每个候选)
    pub fn record(&mut self, refs: &[SourceReference]) {
        self.total_fields += 1;

        if refs.is_empty() {
            self.unmatched += 1;
            return;
        }

        self.matched += 1;
        if refs.iter().any(|r| r.strategy == Strategy::Fuzzy) {
            self.fuzzy_matched += 1;
        }
        if refs.iter().any(|r| r.strategy == Strategy::Multiword) {
            self.multiword_matched += 1;
        }
    }

    pub fn match_rate(&self) -> f64 {
        round2(self.matched as f64 / self.total_fields.max(1) as f64)
    }

    pub fn summary(&self) -> MatchSummary {
        MatchSummary {
            total_fields: self.total_fields,
            matched: self.matched,
            unmatched: self.unmatched,
            fuzzy_matched: self.fuzzy_matched,
            multiword_matched: self.multiword_matched,
            match_rate: self.match_rate(),
        }
    }
}

/// 附加在输出记录末尾的匹配汇总
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub total_fields: usize,
    pub matched: usize,
    pub unmatched: usize,
    pub fuzzy_matched: usize,
    pub multiword_matched: usize,
    pub match_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BoundingBox;

    fn reference(strategy: Strategy) -> SourceReference {
        SourceReference {
            field: "provider".to_string(),
            page_number: 1,
            bounding_box: BoundingBox::default(),
            confidence: 0.9,
            matched_text: "Dr. Smlth".to_string(),
            strategy,
            file_id: None,
        }
    }

    #[test]
    fn counts_once_per_field() {
        let mut stats = MatchStats::new();
        stats.record(&[reference(Strategy::Fuzzy), reference(Strategy::Fuzzy), reference(Strategy::Multiword)]);
        stats.record(&[]);
        stats.record(&[reference(Strategy::Exact)]);

        assert_eq!(stats.total_fields, 3);
        assert_eq!(stats.matched, 2);
        assert_eq!(stats.unmatched, 1);
        assert_eq!(stats.fuzzy_matched, 1);
        assert_eq!(stats.multiword_matched, 1);
        assert_eq!(stats.matched + stats.unmatched, stats.total_fields);
    }

    #[test]
    fn match_rate_rounds_to_two_places() {
        let mut stats = MatchStats::new();
        stats.record(&[reference(Strategy::Exact)]);
        stats.record(&[]);
        stats.record(&[]);
        assert_eq!(stats.summary().match_rate, 0.33);
    }

    #[test]
    fn match_rate_ties_round_to_even() {
        let mut stats = MatchStats::new();
        stats.record(&[reference(Strategy::Exact)]);
        for _ in 0..7 {
            stats.record(&[]);
        }
        assert_eq!(stats.total_fields, 8);
        assert_eq!(stats.match_rate(), 0.12);

        let mut stats = MatchStats::new();
        for _ in 0..5 {
            stats.record(&[reference(Strategy::Exact)]);
        }
        for _ in 0..3 {
            stats.record(&[]);
        }
        assert_eq!(stats.match_rate(), 0.62);
    }

    #[test]
    fn empty_summary_is_zero() {
        let summary = MatchStats::new().summary();
        assert_eq!(summary, MatchSummary::default());
    }
}
