//! Keyword-based industry classification.

use tracing::debug;

use crate::models::record::{Industry, RawRecord};
use crate::tables::NormalizationTables;

/// Scores a raw record against the industry keyword sets.
#[derive(Debug, Clone, Copy)]
pub struct IndustryClassifier<'a> {
    tables: &'a NormalizationTables,
}

impl<'a> IndustryClassifier<'a> {
    pub fn new(tables: &'a NormalizationTables) -> Self {
        Self { tables }
    }

    /// Score every industry of the keyword table, in table order.
    ///
    /// Only values are scanned, never labels. A keyword counts once no
    /// matter how often it occurs.
    pub fn scores(&self, record: &RawRecord) -> Vec<(Industry, usize)> {
        let text = record
            .values()
            .map(|value| value.unwrap_or_default().to_lowercase())
            .collect::<Vec<_>>()
            .join(" ");

        self.tables
            .industry_keywords
            .iter()
            .map(|entry| {
                let score = entry
                    .keywords
                    .iter()
                    .filter(|keyword| text.contains(keyword.to_lowercase().as_str()))
                    .count();
                (entry.industry, score)
            })
            .collect()
    }

    /// Pick the industry with the strictly highest score.
    ///
    /// Ties go to the industry listed first in the keyword table. With no
    /// keyword evidence at all the record is `general`.
    pub fn classify(&self, record: &RawRecord) -> Industry {
        let mut best = (Industry::General, 0);
        for (industry, score) in self.scores(record) {
            if score > best.1 {
                best = (industry, score);
            }
        }

        debug!("Classified record as {} (score {})", best.0, best.1);
        best.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use crate::tables::IndustryKeywords;

    fn classify(record: &RawRecord) -> Industry {
        IndustryClassifier::new(NormalizationTables::builtin()).classify(record)
    }

    #[test]
    fn test_zero_evidence_is_general() {
        let record: RawRecord = [("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(classify(&record), Industry::General);
    }

    #[test]
    fn test_empty_record_is_general() {
        assert_eq!(classify(&RawRecord::new()), Industry::General);
    }

    #[test]
    fn test_fashion_keyword_in_value() {
        let record = RawRecord::new().with("descripcion", "camisa talla M");
        assert_eq!(classify(&record), Industry::Fashion);
    }

    #[test]
    fn test_labels_are_not_scanned() {
        let record = RawRecord::new().with("zapato", "123");
        assert_eq!(classify(&record), Industry::General);
    }

    #[test]
    fn test_keyword_counts_once() {
        // "bota bota bota" is one footwear keyword, "mesa silla" two furniture ones.
        let record = RawRecord::new()
            .with("a", "bota bota bota")
            .with("b", "mesa silla");
        assert_eq!(classify(&record), Industry::Furniture);
    }

    #[test]
    fn test_tie_goes_to_first_declared_industry() {
        // "fabric" is a keyword of both fashion and textile.
        let record = RawRecord::new().with("material", "Cotton FABRIC");
        let scores = IndustryClassifier::new(NormalizationTables::builtin()).scores(&record);

        assert!(scores.contains(&(Industry::Fashion, 1)));
        assert!(scores.contains(&(Industry::Textile, 1)));
        assert_eq!(classify(&record), Industry::Fashion);
    }

    #[test]
    fn test_null_values_are_ignored() {
        let mut record = RawRecord::new();
        record.insert("nota", None);
        record.insert("tipo", Some("Bebe".to_string()));
        assert_eq!(classify(&record), Industry::Baby);
    }

    #[test]
    fn test_substituted_keyword_table() {
        let mut tables = NormalizationTables::builtin().clone();
        tables.industry_keywords = vec![IndustryKeywords {
            industry: Industry::Textile,
            keywords: vec!["denim".to_string()],
        }];

        let record = RawRecord::new().with("x", "Denim 12oz");
        assert_eq!(
            IndustryClassifier::new(&tables).classify(&record),
            Industry::Textile
        );
    }
}
