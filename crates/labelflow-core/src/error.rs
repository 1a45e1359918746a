//! Error types for the labelflow-core library.
//!
//! Normalization itself never fails: malformed values pass through and
//! unknown labels are slugified. Errors only come from the edges, when
//! lookup tables, configuration or OCR output are loaded.

use thiserror::Error;

/// Main error type for the labelflow library.
#[derive(Error, Debug)]
pub enum LabelflowError {
    /// Lookup table loading or validation error.
    #[error("lookup table error: {0}")]
    Tables(#[from] TablesError),

    /// OCR output parsing error.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to the normalization lookup tables.
#[derive(Error, Debug)]
pub enum TablesError {
    /// An industry name that is not part of the closed enumeration.
    #[error("unknown industry: {0}")]
    UnknownIndustry(String),

    /// An alias with an empty pattern would match every label.
    #[error("alias for {canonical} has an empty pattern")]
    EmptyAlias { canonical: String },

    /// The same industry appears twice in a keyword or column table.
    #[error("industry {0} listed more than once")]
    DuplicateIndustry(String),

    /// The fallback industry cannot carry keywords.
    #[error("the general industry cannot have keywords")]
    GeneralKeywords,
}

/// Errors related to parsing OCR engine output.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Structured output was valid JSON but not an object.
    #[error("expected a JSON object, found {0}")]
    NotAnObject(&'static str),

    /// Structured output was not valid JSON.
    #[error("invalid JSON: {0}")]
    InvalidJson(String),
}

/// Result type for the labelflow library.
pub type Result<T> = std::result::Result<T, LabelflowError>;
