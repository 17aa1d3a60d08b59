pub mod ocr;
pub mod record;
pub mod source_ref;
pub mod stats;

pub use ocr::{BoundingBox, OcrCorpus, OcrPage, OcrWord};
pub use record::{
    Bill, BillLineItem, Chronology, EnrichedRecord, ExtractedRecord, FieldValue, MedicalEvent,
    SUMMARY_KEY,
};
pub use source_ref::{MatchCandidate, SourceReference, Strategy};
pub use stats::{MatchStats, MatchSummary};
