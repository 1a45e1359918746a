//! JSON-ready summary of a processed batch.

use serde::Serialize;

use crate::models::record::{Industry, NormalizedRecord};

use super::assembler::AssembledBatch;

/// What a caller gets back after a batch: the normalized records with
/// their metadata, per-record and batch industries, and the column layout.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub status: String,
    pub images_processed: usize,
    pub industry_detected: Industry,
    pub record_industries: Vec<Industry>,
    /// Sheet the external spreadsheet writer should use.
    pub sheet_name: String,
    pub columns: Vec<String>,
    pub normalized_data: Vec<NormalizedRecord>,
}

impl BatchReport {
    pub fn new(
        records: Vec<NormalizedRecord>,
        batch: &AssembledBatch,
        sheet_name: impl Into<String>,
    ) -> Self {
        Self {
            status: "success".to_string(),
            images_processed: records.len(),
            industry_detected: batch.industry,
            record_industries: records.iter().map(|r| r.metadata.industry).collect(),
            sheet_name: sheet_name.into(),
            columns: batch.columns.clone(),
            normalized_data: records,
        }
    }
}
