//! Adapters turning OCR engine output into raw records.
//!
//! The engines themselves live outside this crate. They hand back either
//! plain text (one `label: value` pair per line) or a JSON object produced
//! by a multimodal model, often wrapped in Markdown code fences.

use serde::Serialize;
use tracing::debug;

use crate::error::{ParseError, Result};
use crate::models::record::{OcrEngineKind, RawRecord};
use crate::normalize::patterns::CODE_FENCE;

/// Output of one OCR pass over one image.
#[derive(Debug, Clone, Serialize)]
pub struct OcrOutput {
    /// Full recognized text.
    pub text: String,
    /// Key-value pairs extracted from the text.
    pub record: RawRecord,
    /// Engine that produced the text.
    pub engine: OcrEngineKind,
}

impl OcrOutput {
    /// Build from plain text, splitting `label: value` lines.
    pub fn from_text(text: impl Into<String>, engine: OcrEngineKind) -> Self {
        let text = text.into();
        let record = parse_key_value_text(&text);
        Self { text, record, engine }
    }

    /// Build from a structured (JSON) response.
    pub fn from_structured(text: impl Into<String>, engine: OcrEngineKind) -> Result<Self> {
        let text = text.into();
        let record = parse_structured_response(&text)?;
        Ok(Self { text, record, engine })
    }
}

/// Parse plain OCR text into a raw record.
///
/// Each line containing a colon is split on the first one. Lines whose
/// label or value is empty after trimming are ignored.
pub fn parse_key_value_text(text: &str) -> RawRecord {
    let mut record = RawRecord::new();
    for line in text.lines() {
        if let Some((label, value)) = line.split_once(':') {
            let (label, value) = (label.trim(), value.trim());
            if !label.is_empty() && !value.is_empty() {
                record.insert(label, Some(value.to_string()));
            }
        }
    }
    debug!("Parsed {} fields from OCR text", record.len());
    record
}

/// Parse a JSON object response, tolerating Markdown code fences.
pub fn parse_structured_response(text: &str) -> Result<RawRecord> {
    let cleaned = CODE_FENCE.replace_all(text, "");
    let cleaned = cleaned.trim();

    let value: serde_json::Value = serde_json::from_str(cleaned)
        .map_err(|e| ParseError::InvalidJson(e.to_string()))?;

    let kind = match &value {
        serde_json::Value::Object(_) => None,
        serde_json::Value::Array(_) => Some("an array"),
        serde_json::Value::String(_) => Some("a string"),
        serde_json::Value::Number(_) => Some("a number"),
        serde_json::Value::Bool(_) => Some("a boolean"),
        serde_json::Value::Null => Some("null"),
    };
    if let Some(kind) = kind {
        return Err(ParseError::NotAnObject(kind).into());
    }

    // Re-read the text so that label order is preserved.
    let record: RawRecord = serde_json::from_str(cleaned)
        .map_err(|e| ParseError::InvalidJson(e.to_string()))?;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use crate::error::LabelflowError;

    #[test]
    fn test_output_from_structured_response() {
        let text = "```json\n{\"Marca\": \"acme\", \"Talla\": \"m\"}\n```";
        let output = OcrOutput::from_structured(text, OcrEngineKind::Gemini).unwrap();

        assert_eq!(output.engine, OcrEngineKind::Gemini);
        assert_eq!(output.text, text);
        let labels: Vec<&str> = output.record.iter().map(|(label, _)| label).collect();
        assert_eq!(labels, vec!["Marca", "Talla"]);

        assert!(OcrOutput::from_structured("[1, 2]", OcrEngineKind::Gemini).is_err());
    }

    #[test]
    fn test_parse_key_value_text() {
        let text = "ETIQUETA\nPrecio: $10.50\nTalla : M\nNota:\n: huérfano\nHora: 10:30\n";
        let record = parse_key_value_text(text);

        let entries: Vec<(&str, Option<&str>)> = record.iter().collect();
        assert_eq!(
            entries,
            vec![
                ("Precio", Some("$10.50")),
                ("Talla", Some("M")),
                ("Hora", Some("10:30")),
            ]
        );
    }

    #[test]
    fn test_parse_fenced_response() {
        let text = "```json\n{\"precio\": \"$10.50\", \"talla\": \"M\", \"color\": null}\n```";
        let record = parse_structured_response(text).unwrap();

        let keys: Vec<&str> = record.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["precio", "talla", "color"]);
        assert_eq!(record.get("color"), None);
    }

    #[test]
    fn test_parse_response_rejects_array() {
        let err = parse_structured_response("[1, 2]").unwrap_err();
        assert!(matches!(
            err,
            LabelflowError::Parse(ParseError::NotAnObject("an array"))
        ));
    }

    #[test]
    fn test_parse_response_rejects_garbage() {
        let err = parse_structured_response("no structured data here").unwrap_err();
        assert!(matches!(err, LabelflowError::Parse(ParseError::InvalidJson(_))));
    }

    #[test]
    fn test_ocr_output_from_text() {
        let output = OcrOutput::from_text("Marca: Acme", OcrEngineKind::GoogleVision);
        assert_eq!(output.record.get("Marca"), Some("Acme"));
        assert_eq!(output.engine, OcrEngineKind::GoogleVision);
    }
}
