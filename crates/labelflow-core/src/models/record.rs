//! Record models: raw OCR output, normalized records and their metadata.

use std::fmt;
use std::str::FromStr;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TablesError;

/// Key under which record metadata is serialized.
pub const METADATA_KEY: &str = "_metadata";

/// Product vertical used to pick the column presentation order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Industry {
    /// Clothing (camisa, pantalon, shirt...).
    Fashion,
    /// Furniture (mueble, silla, mesa...).
    Furniture,
    /// Shoes and boots.
    Footwear,
    /// Baby and infant products.
    Baby,
    /// Fabric sold by the roll.
    Textile,
    /// Fallback when no keyword matched.
    #[default]
    General,
}

impl Industry {
    /// All industries, in declaration order.
    pub const ALL: [Industry; 6] = [
        Industry::Fashion,
        Industry::Furniture,
        Industry::Footwear,
        Industry::Baby,
        Industry::Textile,
        Industry::General,
    ];

    /// Lower-case identifier used in tables, reports and file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Industry::Fashion => "fashion",
            Industry::Furniture => "furniture",
            Industry::Footwear => "footwear",
            Industry::Baby => "baby",
            Industry::Textile => "textile",
            Industry::General => "general",
        }
    }
}

impl fmt::Display for Industry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Industry {
    type Err = TablesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Industry::ALL
            .iter()
            .copied()
            .find(|industry| industry.as_str() == needle)
            .ok_or_else(|| TablesError::UnknownIndustry(s.to_string()))
    }
}

/// OCR engine that produced a raw record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OcrEngineKind {
    /// Google Vision text detection (plain text, parsed line by line).
    GoogleVision,
    /// Gemini structured extraction (JSON object).
    Gemini,
    /// Plain text supplied directly.
    Text,
    /// Engine not reported.
    #[default]
    Unknown,
}

impl OcrEngineKind {
    /// Resolve an engine from its reported name. Unrecognized names map to `Unknown`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "google_vision" | "vision" => Self::GoogleVision,
            "gemini" => Self::Gemini,
            "text" | "txt" => Self::Text,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GoogleVision => "google_vision",
            Self::Gemini => "gemini",
            Self::Text => "text",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for OcrEngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key-value text extracted by OCR from one image.
///
/// Entries keep the order in which the OCR engine reported them. Values are
/// optional: a label may be present with nothing readable next to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    entries: Vec<(String, Option<String>)>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a label. A repeated label replaces the earlier value in place.
    pub fn insert(&mut self, label: impl Into<String>, value: Option<String>) {
        let label = label.into();
        match self.entries.iter_mut().find(|(key, _)| *key == label) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((label, value)),
        }
    }

    /// Builder-style insert of a present value.
    pub fn with(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(label, Some(value.into()));
        self
    }

    /// Value for a label, if present and not null.
    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == label)
            .and_then(|(_, value)| value.as_deref())
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_deref()))
    }

    /// Iterate over values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = Option<&str>> {
        self.entries.iter().map(|(_, value)| value.as_deref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = RawRecord::new();
        for (key, value) in iter {
            record.insert(key, Some(value.into()));
        }
        record
    }
}

/// Coerce a JSON value to an optional raw string once, at the input boundary.
fn json_to_raw(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

impl Serialize for RawRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RawRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RawRecordVisitor;

        impl<'de> Visitor<'de> for RawRecordVisitor {
            type Value = RawRecord;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object of label/value pairs")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<RawRecord, A::Error> {
                let mut record = RawRecord::new();
                while let Some((key, value)) =
                    access.next_entry::<String, serde_json::Value>()?
                {
                    record.insert(key, json_to_raw(value));
                }
                Ok(record)
            }
        }

        deserializer.deserialize_map(RawRecordVisitor)
    }
}

/// Metadata attached to each normalized record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMetadata {
    /// Reference (URL or identifier) of the source image.
    pub image_ref: String,
    /// Industry detected for this record alone.
    pub industry: Industry,
    /// OCR engine that produced the raw record.
    pub ocr_engine: OcrEngineKind,
}

/// Canonical field names mapped to canonical values, plus metadata.
///
/// Serializes as a flat JSON object with the metadata under `_metadata`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedRecord {
    fields: Vec<(String, String)>,
    /// Source image, detected industry and OCR engine.
    pub metadata: RecordMetadata,
}

impl NormalizedRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field. Last write wins; the field keeps its first position.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        let field = field.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| *name == field) {
            Some(entry) => entry.1 = value,
            None => self.fields.push((field, value)),
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.iter().any(|(name, _)| name == field)
    }

    /// Iterate over fields in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn with_metadata(mut self, metadata: RecordMetadata) -> Self {
        self.metadata = metadata;
        self
    }
}

impl Serialize for NormalizedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.serialize_entry(METADATA_KEY, &self.metadata)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_industry_from_str() {
        assert_eq!("Fashion".parse::<Industry>().unwrap(), Industry::Fashion);
        assert_eq!(" textile ".parse::<Industry>().unwrap(), Industry::Textile);
        assert!("automotive".parse::<Industry>().is_err());
    }

    #[test]
    fn test_defaults_are_general_and_unknown() {
        let metadata = RecordMetadata::default();
        assert_eq!(metadata.industry, Industry::General);
        assert_eq!(metadata.ocr_engine, OcrEngineKind::Unknown);
    }

    #[test]
    fn test_raw_record_preserves_json_order() {
        let json = r#"{"zeta": "1", "alpha": null, "mid": 12.5, "flag": true}"#;
        let record: RawRecord = serde_json::from_str(json).unwrap();

        let keys: Vec<&str> = record.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid", "flag"]);
        assert_eq!(record.get("alpha"), None);
        assert_eq!(record.get("mid"), Some("12.5"));
        assert_eq!(record.get("flag"), Some("true"));
    }

    #[test]
    fn test_raw_record_rejects_non_object() {
        assert!(serde_json::from_str::<RawRecord>("[1, 2]").is_err());
    }

    #[test]
    fn test_normalized_record_last_write_wins_in_place() {
        let mut record = NormalizedRecord::new();
        record.insert("color", "Rojo");
        record.insert("talla", "M");
        record.insert("color", "Azul");

        let fields: Vec<(&str, &str)> = record.iter().collect();
        assert_eq!(fields, vec![("color", "Azul"), ("talla", "M")]);
    }

    #[test]
    fn test_normalized_record_serializes_flat_with_metadata() {
        let mut record = NormalizedRecord::new().with_metadata(RecordMetadata {
            image_ref: "img-1.jpg".to_string(),
            industry: Industry::Fashion,
            ocr_engine: OcrEngineKind::Gemini,
        });
        record.insert("talla", "M");

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["talla"], "M");
        assert_eq!(value["_metadata"]["industry"], "fashion");
        assert_eq!(value["_metadata"]["ocr_engine"], "gemini");
        assert_eq!(value["_metadata"]["image_ref"], "img-1.jpg");
    }

    #[test]
    fn test_ocr_engine_from_name() {
        assert_eq!(OcrEngineKind::from_name("Google Vision"), OcrEngineKind::GoogleVision);
        assert_eq!(OcrEngineKind::from_name("gemini"), OcrEngineKind::Gemini);
        assert_eq!(OcrEngineKind::from_name("tesseract"), OcrEngineKind::Unknown);
    }
}
