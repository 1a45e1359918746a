//! Configuration structures for the normalization pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{LabelflowError, Result};
use crate::models::record::Industry;
use crate::tables::NormalizationTables;

/// Main configuration for the labelflow pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelflowConfig {
    /// Normalization configuration.
    pub normalization: NormalizationConfig,

    /// Tabular export configuration.
    pub export: ExportConfig,

    /// Batch processing configuration.
    pub processing: ProcessingConfig,
}

/// Normalization configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizationConfig {
    /// JSON file with replacement lookup tables. Built-in tables when unset.
    pub tables_path: Option<PathBuf>,

    /// Skip classification and treat every record as this industry.
    pub force_industry: Option<Industry>,
}

/// Tabular export configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Header of the leading image column.
    pub image_column: String,

    /// Write image references into the image column instead of leaving it
    /// empty for a later embedding step.
    pub include_image_refs: bool,

    /// Sheet name for the spreadsheet writer that consumes the report.
    /// Nothing in this crate writes sheets.
    pub sheet_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            image_column: "Imagen".to_string(),
            include_image_refs: false,
            sheet_name: "Datos".to_string(),
        }
    }
}

/// Batch processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Number of worker threads normalizing records.
    pub jobs: usize,

    /// Keep going when an input file cannot be read or parsed.
    pub continue_on_error: bool,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            jobs: 4,
            continue_on_error: false,
        }
    }
}

impl LabelflowConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            LabelflowError::Config(format!("{}: {}", path.display(), e))
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load the lookup tables this configuration points at.
    pub fn load_tables(&self) -> Result<NormalizationTables> {
        match &self.normalization.tables_path {
            Some(path) => NormalizationTables::from_file(path),
            None => Ok(NormalizationTables::builtin().clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: LabelflowConfig =
            serde_json::from_str(r#"{"processing": {"jobs": 8}}"#).unwrap();

        assert_eq!(config.processing.jobs, 8);
        assert!(!config.processing.continue_on_error);
        assert_eq!(config.export.image_column, "Imagen");
        assert!(config.normalization.tables_path.is_none());
    }

    #[test]
    fn test_force_industry_deserializes_lowercase() {
        let config: LabelflowConfig =
            serde_json::from_str(r#"{"normalization": {"force_industry": "footwear"}}"#).unwrap();

        assert_eq!(config.normalization.force_industry, Some(Industry::Footwear));
    }

    #[test]
    fn test_default_tables_are_builtin() {
        let tables = LabelflowConfig::default().load_tables().unwrap();
        assert_eq!(&tables, NormalizationTables::builtin());
    }
}
