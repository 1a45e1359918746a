//! Core library for product label normalization.
//!
//! This crate provides:
//! - Parsing of OCR engine output into raw label/value records
//! - Industry classification from keyword evidence
//! - Canonical field names and values (prices, weights, sizes, casing)
//! - Batch assembly into ordered, spreadsheet-ready rows

pub mod error;
pub mod export;
pub mod models;
pub mod normalize;
pub mod ocr;
pub mod tables;

pub use error::{LabelflowError, Result};
pub use export::{AssembledBatch, BatchReport, TableRow, TabularAssembler};
pub use models::config::LabelflowConfig;
pub use models::record::{Industry, NormalizedRecord, OcrEngineKind, RawRecord, RecordMetadata};
pub use normalize::{DataNormalizer, FieldNormalizer, IndustryClassifier, ValueNormalizer};
pub use ocr::{parse_key_value_text, parse_structured_response, OcrOutput};
pub use tables::NormalizationTables;
