//! Reading OCR output files into raw records.

use std::fs;
use std::path::Path;

use labelflow_core::{OcrEngineKind, OcrOutput, RawRecord};

/// Metadata key carrying the image reference inside a JSON record.
const IMAGE_KEY: &str = "_image";
/// Metadata key carrying the OCR engine name inside a JSON record.
const ENGINE_KEY: &str = "_engine";

/// One raw record read from disk, with its image reference and engine.
#[derive(Debug, Clone)]
pub struct LoadedRecord {
    pub image_ref: String,
    pub engine: OcrEngineKind,
    pub record: RawRecord,
}

/// Whether a path has an extension this CLI can read.
pub fn is_supported(path: &Path) -> bool {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    matches!(ext.to_lowercase().as_str(), "json" | "txt")
}

/// Read every raw record in a file.
///
/// A `.json` file holds one record (optionally fenced like model output) or
/// an array of records. A `.txt` file is plain OCR text with one
/// `label: value` pair per line.
pub fn load_records(path: &Path) -> anyhow::Result<Vec<LoadedRecord>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let content = fs::read_to_string(path)?;

    match extension.as_str() {
        "json" => {
            if content.trim_start().starts_with('[') {
                let records: Vec<RawRecord> = serde_json::from_str(&content)?;
                Ok(records
                    .into_iter()
                    .enumerate()
                    .map(|(i, record)| {
                        loaded(format!("{}#{}", path.display(), i), OcrEngineKind::Unknown, record)
                    })
                    .collect())
            } else {
                let output = OcrOutput::from_structured(content, OcrEngineKind::Unknown)?;
                Ok(vec![loaded(
                    path.display().to_string(),
                    output.engine,
                    output.record,
                )])
            }
        }
        "txt" => {
            let output = OcrOutput::from_text(content, OcrEngineKind::Text);
            Ok(vec![loaded(
                path.display().to_string(),
                output.engine,
                output.record,
            )])
        }
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    }
}

/// Apply `_image` / `_engine` overrides carried inside the record.
fn loaded(default_ref: String, default_engine: OcrEngineKind, record: RawRecord) -> LoadedRecord {
    let image_ref = record
        .get(IMAGE_KEY)
        .map(str::to_string)
        .unwrap_or(default_ref);
    let engine = record
        .get(ENGINE_KEY)
        .map(OcrEngineKind::from_name)
        .unwrap_or(default_engine);

    LoadedRecord {
        image_ref,
        engine,
        record,
    }
}
