//! Record-level normalization: classify, then rename and clean every field.

use tracing::debug;

use crate::models::record::{Industry, NormalizedRecord, OcrEngineKind, RawRecord, RecordMetadata};
use crate::tables::NormalizationTables;

use super::classifier::IndustryClassifier;
use super::fields::FieldNormalizer;
use super::values::ValueNormalizer;

/// Normalizes whole raw records against one set of lookup tables.
#[derive(Debug, Clone, Copy)]
pub struct DataNormalizer<'a> {
    classifier: IndustryClassifier<'a>,
    fields: FieldNormalizer<'a>,
    values: ValueNormalizer<'a>,
}

impl<'a> DataNormalizer<'a> {
    pub fn new(tables: &'a NormalizationTables) -> Self {
        Self {
            classifier: IndustryClassifier::new(tables),
            fields: FieldNormalizer::new(tables),
            values: ValueNormalizer::new(tables),
        }
    }

    pub fn detect_industry(&self, record: &RawRecord) -> Industry {
        self.classifier.classify(record)
    }

    pub fn normalize_field_name(&self, raw_label: &str) -> String {
        self.fields.normalize(raw_label)
    }

    pub fn normalize_value(&self, field: &str, raw_value: Option<&str>, industry: Industry) -> String {
        self.values.normalize(field, raw_value, industry)
    }

    /// Normalize a raw record.
    ///
    /// Classifies the record when no industry is given. Labels starting with
    /// `_` are metadata and are skipped. When two labels resolve to the same
    /// canonical field the later one wins.
    pub fn normalize_data(
        &self,
        record: &RawRecord,
        industry: Option<Industry>,
    ) -> (NormalizedRecord, Industry) {
        let industry = industry.unwrap_or_else(|| self.detect_industry(record));
        let mut normalized = NormalizedRecord::new();

        for (raw_label, raw_value) in record.iter() {
            if raw_label.starts_with('_') {
                continue;
            }

            let field = self.normalize_field_name(raw_label);

            if normalized.contains(&field) {
                debug!("Label {:?} overwrites earlier value of {}", raw_label, field);
            }

            let value = self.normalize_value(&field, raw_value, industry);
            normalized.insert(field, value);
        }

        normalized.metadata.industry = industry;

        debug!(
            "Normalized {} raw fields into {} fields ({})",
            record.len(),
            normalized.len(),
            industry
        );

        (normalized, industry)
    }

    /// Normalize the record of one processed image and attach its metadata.
    pub fn normalize_image(
        &self,
        record: &RawRecord,
        image_ref: impl Into<String>,
        ocr_engine: OcrEngineKind,
        industry: Option<Industry>,
    ) -> NormalizedRecord {
        let (normalized, industry) = self.normalize_data(record, industry);
        normalized.with_metadata(RecordMetadata {
            image_ref: image_ref.into(),
            industry,
            ocr_engine,
        })
    }
}
