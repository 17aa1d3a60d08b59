use super::walker::FieldWalker;
use crate::config::LinkerConfig;
use crate::models::{EnrichedRecord, ExtractedRecord, MatchStats, OcrCorpus};
use rayon::prelude::*;
use serde::Deserialize;

/// 一份待链接文档: 抽取结果 + OCR 语料
#[derive(Debug, Clone, Deserialize)]
pub struct LinkRequest {
    pub record: ExtractedRecord,
    #[serde(alias = "ocr_map")]
    pub ocr: OcrCorpus,
    #[serde(default)]
    pub file_id: Option<String>,
}

/// 核验链接服务
///
/// 把抽取出的字段链接回 OCR 原文中的单词和像素区域。每次调用
/// 拷贝输入, 使用独立的统计累加器, 不修改调用方数据, 不会失败。
#[derive(Debug, Clone, Default)]
pub struct VerificationLinker {
    config: LinkerConfig,
}

impl VerificationLinker {
    pub fn new(config: LinkerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LinkerConfig {
        &self.config
    }

    /// 链接入口
    pub fn link(&self, record: &ExtractedRecord, corpus: &OcrCorpus, file_id: Option<&str>) -> EnrichedRecord {
        tracing::info!(
            "Starting verification linkage: {} record, {} pages, {} words",
            record.kind(),
            corpus.pages.len(),
            corpus.word_count()
        );

        let mut enriched = record.clone();
        let mut stats = MatchStats::new();
        FieldWalker::new(corpus, file_id, &self.config, &mut stats).walk(&mut enriched);

        let match_summary = stats.summary();
        tracing::info!(
            "Verification linkage completed: fields {}, matched {}, unmatched {}, fuzzy {}, multiword {}, rate {:.2}",
            match_summary.total_fields,
            match_summary.matched,
            match_summary.unmatched,
            match_summary.fuzzy_matched,
            match_summary.multiword_matched,
            match_summary.match_rate
        );

        EnrichedRecord { record: enriched, match_summary }
    }

    pub fn link_request(&self, request: &LinkRequest) -> EnrichedRecord {
        self.link(&request.record, &request.ocr, request.file_id.as_deref())
    }

    /// 多文档并行链接, 结果顺序与输入一致
    pub fn link_batch(&self, requests: &[LinkRequest]) -> Vec<EnrichedRecord> {
        requests.par_iter().map(|r| self.link_request(r)).collect()
    }
}

/// 使用缺省参数链接单个文档
pub fn link_verification(record: &ExtractedRecord, corpus: &OcrCorpus, file_id: Option<&str>) -> EnrichedRecord {
    VerificationLinker::default().link(record, corpus, file_id)
}
