pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod service;

pub use crate::config::{AppConfig, LinkerConfig};
pub use error::LinkError;
pub use models::{EnrichedRecord, ExtractedRecord, OcrCorpus};
pub use service::{link_verification, LinkRequest, VerificationLinker};
