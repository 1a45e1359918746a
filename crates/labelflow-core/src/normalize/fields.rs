//! Canonical field naming via the alias table.

use tracing::trace;

use crate::tables::NormalizationTables;

/// Clean a raw label before lookup.
///
/// Lower-cases, trims, drops `$` and `:`, turns underscores into spaces and
/// trims again.
pub fn clean_label(raw_label: &str) -> String {
    raw_label
        .to_lowercase()
        .trim()
        .replace(['$', ':'], "")
        .replace('_', " ")
        .trim()
        .to_string()
}

/// Maps raw OCR labels to canonical field names.
#[derive(Debug, Clone, Copy)]
pub struct FieldNormalizer<'a> {
    tables: &'a NormalizationTables,
}

impl<'a> FieldNormalizer<'a> {
    pub fn new(tables: &'a NormalizationTables) -> Self {
        Self { tables }
    }

    /// Resolve a raw label to its canonical field name.
    ///
    /// Depends only on the label text. A label whose slug is already a
    /// canonical name keeps it; otherwise the first alias that contains the
    /// cleaned label, or is contained in it, wins. An empty cleaned label is
    /// contained in every alias and so takes the first one. Unmatched labels
    /// fall back to the cleaned label with spaces turned into underscores.
    pub fn normalize(&self, raw_label: &str) -> String {
        let clean = clean_label(raw_label);
        let slug = clean.replace(' ', "_");

        if self.tables.is_canonical(&slug) {
            return slug;
        }

        for alias in &self.tables.aliases {
            let pattern = alias.pattern.as_str();
            if clean.contains(pattern) || pattern.contains(clean.as_str()) {
                trace!("Label {:?} matched alias {:?} -> {}", raw_label, pattern, alias.canonical);
                return alias.canonical.clone();
            }
        }

        slug
    }
}
