//! Normalization engine: industry classification, canonical field names and
//! canonical values.

mod classifier;
mod fields;
mod normalizer;
pub mod patterns;
mod values;

pub use classifier::IndustryClassifier;
pub use fields::{clean_label, FieldNormalizer};
pub use normalizer::DataNormalizer;
pub use values::{capitalize, normalize_price, ValueKind, ValueNormalizer};
