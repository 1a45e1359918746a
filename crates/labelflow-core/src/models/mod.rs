//! Data models for records, industries and configuration.

pub mod config;
pub mod record;

pub use config::LabelflowConfig;
pub use record::{
    Industry, NormalizedRecord, OcrEngineKind, RawRecord, RecordMetadata, METADATA_KEY,
};
