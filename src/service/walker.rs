use super::ranker::rank_and_select;
use super::strategies::{generate_candidates, FieldKind};
use crate::config::LinkerConfig;
use crate::models::{
    Bill, BillLineItem, Chronology, ExtractedRecord, FieldValue, MatchStats, MedicalEvent, OcrCorpus,
    SourceReference,
};

/// 一个待链接字段: 字段名, 值, 匹配类型
#[derive(Debug, Clone, Copy)]
pub struct LinkableField<'a> {
    pub name: &'static str,
    pub value: &'a FieldValue,
    pub kind: FieldKind,
}

/// 拥有 source_refs 的对象 (记录本身或其中的明细)
pub trait Linkable {
    /// 本对象上需要链接的字段, 空值已跳过
    fn linkable_fields(&self) -> Vec<LinkableField<'_>>;

    fn source_refs_mut(&mut self) -> &mut Vec<SourceReference>;
}

fn push_field<'a>(
    fields: &mut Vec<LinkableField<'a>>,
    name: &'static str,
    value: Option<&'a FieldValue>,
    kind: FieldKind,
) {
    if let Some(value) = value.filter(|v| !v.is_null()) {
        fields.push(LinkableField { name, value, kind });
    }
}

impl Linkable for Chronology {
    fn linkable_fields(&self) -> Vec<LinkableField<'_>> {
        let mut fields = Vec::new();
        push_field(&mut fields, "patient_name", self.patient_name.as_ref(), FieldKind::Name);
        fields
    }

    fn source_refs_mut(&mut self) -> &mut Vec<SourceReference> {
        &mut self.source_refs
    }
}

impl Linkable for MedicalEvent {
    fn linkable_fields(&self) -> Vec<LinkableField<'_>> {
        let mut fields = Vec::new();
        push_field(&mut fields, "date", self.date.as_ref(), FieldKind::Date);
        push_field(&mut fields, "provider", self.provider.as_ref(), FieldKind::Provider);
        push_field(&mut fields, "encounter_type", self.encounter_type.as_ref(), FieldKind::EncounterType);
        for code in &self.diagnosis_codes {
            push_field(&mut fields, "diagnosis_codes", Some(code), FieldKind::Code);
        }
        fields
    }

    fn source_refs_mut(&mut self) -> &mut Vec<SourceReference> {
        &mut self.source_refs
    }
}

impl Linkable for Bill {
    fn linkable_fields(&self) -> Vec<LinkableField<'_>> {
        let mut fields = Vec::new();
        push_field(&mut fields, "invoice_number", self.invoice_number.as_ref(), FieldKind::Code);
        push_field(&mut fields, "total_amount", self.total_amount.as_ref(), FieldKind::Amount);
        fields
    }

    fn source_refs_mut(&mut self) -> &mut Vec<SourceReference> {
        &mut self.source_refs
    }
}

impl Linkable for BillLineItem {
    fn linkable_fields(&self) -> Vec<LinkableField<'_>> {
        let mut fields = Vec::new();
        push_field(&mut fields, "date_of_service", self.date_of_service.as_ref(), FieldKind::Date);
        push_field(&mut fields, "cpt_code", self.cpt_code.as_ref(), FieldKind::Code);
        push_field(&mut fields, "description", self.description.as_ref(), FieldKind::Description);
        push_field(&mut fields, "charged_amount", self.charged_amount.as_ref(), FieldKind::Amount);
        push_field(&mut fields, "allowed_amount", self.allowed_amount.as_ref(), FieldKind::Amount);
        fields
    }

    fn source_refs_mut(&mut self) -> &mut Vec<SourceReference> {
        &mut self.source_refs
    }
}

/// 遍历记录中的所有字段, 逐个生成候选, 排序筛选, 挂上 source_refs
pub struct FieldWalker<'a> {
    corpus: &'a OcrCorpus,
    file_id: Option<&'a str>,
    config: &'a LinkerConfig,
    stats: &'a mut MatchStats,
}

impl<'a> FieldWalker<'a> {
    pub fn new(
        corpus: &'a OcrCorpus,
        file_id: Option<&'a str>,
        config: &'a LinkerConfig,
        stats: &'a mut MatchStats,
    ) -> Self {
        Self { corpus, file_id, config, stats }
    }

    pub fn walk(&mut self, record: &mut ExtractedRecord) {
        match record {
            ExtractedRecord::Chronology(chronology) => {
                self.link_object(chronology);
                for event in &mut chronology.events {
                    self.link_object(event);
                }
            }
            ExtractedRecord::Bill(bill) => {
                self.link_object(bill);
                for item in &mut bill.line_items {
                    self.link_object(item);
                }
            }
            ExtractedRecord::Unrecognized(_) => {}
        }
    }

    /// 链接对象自身的字段, 结果追加到它的 source_refs
    pub fn link_object<T: Linkable>(&mut self, target: &mut T) {
        let mut refs = Vec::new();
        for field in target.linkable_fields() {
            refs.extend(self.link_field(&field));
        }
        target.source_refs_mut().extend(refs);
    }

    /// 单字段匹配; 统计在这里按字段计数一次
    pub fn link_field(&mut self, field: &LinkableField<'_>) -> Vec<SourceReference> {
        let candidates = generate_candidates(field.value, field.kind, self.corpus, self.config);
        let candidate_count = candidates.len();

        let refs: Vec<SourceReference> = rank_and_select(candidates, self.config)
            .into_iter()
            .map(|c| SourceReference::from_candidate(field.name, c, self.file_id, self.config.clamp_confidence))
            .collect();

        self.stats.record(&refs);
        let strategies: Vec<&str> = refs.iter().map(|r| r.strategy.as_str()).collect();
        tracing::debug!(
            "Field {} ({:?}): {} candidates, {} selected [{}]",
            field.name, field.kind, candidate_count, refs.len(), strategies.join(",")
        );

        refs
    }
}
