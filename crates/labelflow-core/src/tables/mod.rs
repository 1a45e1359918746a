//! Lookup tables driving classification and normalization.
//!
//! Tables are plain data: built once (either the built-in set or a JSON
//! file) and passed by reference to the classifier, normalizers and
//! assembler. Nothing reads them through global state except
//! [`NormalizationTables::builtin`], which only hands out the default set.

mod builtin;

use std::collections::HashSet;
use std::path::Path;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, TablesError};
use crate::models::record::Industry;

lazy_static! {
    static ref BUILTIN_TABLES: NormalizationTables = NormalizationTables::from_builtin();
}

/// A raw label pattern and the canonical field it resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldAlias {
    pub pattern: String,
    pub canonical: String,
}

/// Replacement for a malformed unit token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitCorrection {
    pub from: String,
    pub to: String,
}

/// Keywords whose presence in record values hints at an industry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndustryKeywords {
    pub industry: Industry,
    pub keywords: Vec<String>,
}

/// Preferred column sequence for an industry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnOrder {
    pub industry: Industry,
    pub columns: Vec<String>,
}

/// Process-wide, read-only lookup tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizationTables {
    /// Field aliases in priority order. The first match wins.
    pub aliases: Vec<FieldAlias>,

    /// Unit corrections, applied in order.
    pub unit_corrections: Vec<UnitCorrection>,

    /// Keyword sets. Order breaks classification ties.
    pub industry_keywords: Vec<IndustryKeywords>,

    /// Preferred column order per industry.
    pub column_orders: Vec<ColumnOrder>,

    /// Recognized size tokens (upper-case).
    #[serde(default = "default_sizes")]
    pub sizes: Vec<String>,
}

fn default_sizes() -> Vec<String> {
    builtin::SIZES.iter().map(|s| s.to_string()).collect()
}

impl NormalizationTables {
    /// The built-in tables, shared process-wide.
    pub fn builtin() -> &'static NormalizationTables {
        &BUILTIN_TABLES
    }

    fn from_builtin() -> Self {
        let pairs = |table: &[(&str, &str)]| -> Vec<(String, String)> {
            table
                .iter()
                .map(|(a, b)| (a.to_string(), b.to_string()))
                .collect()
        };
        let lists = |table: &[(Industry, &[&str])]| -> Vec<(Industry, Vec<String>)> {
            table
                .iter()
                .map(|(industry, words)| {
                    (*industry, words.iter().map(|w| w.to_string()).collect())
                })
                .collect()
        };

        Self {
            aliases: pairs(builtin::FIELD_ALIASES)
                .into_iter()
                .map(|(pattern, canonical)| FieldAlias { pattern, canonical })
                .collect(),
            unit_corrections: pairs(builtin::UNIT_CORRECTIONS)
                .into_iter()
                .map(|(from, to)| UnitCorrection { from, to })
                .collect(),
            industry_keywords: lists(builtin::INDUSTRY_KEYWORDS)
                .into_iter()
                .map(|(industry, keywords)| IndustryKeywords { industry, keywords })
                .collect(),
            column_orders: lists(builtin::COLUMN_ORDERS)
                .into_iter()
                .map(|(industry, columns)| ColumnOrder { industry, columns })
                .collect(),
            sizes: default_sizes(),
        }
    }

    /// Parse and validate tables from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let tables: NormalizationTables = serde_json::from_str(json)?;
        tables.validate()?;
        Ok(tables)
    }

    /// Load and validate tables from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let tables = Self::from_json(&content)?;
        debug!(
            "Loaded {} aliases, {} unit corrections from {}",
            tables.aliases.len(),
            tables.unit_corrections.len(),
            path.display()
        );
        Ok(tables)
    }

    /// Save tables as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check structural rules a hand-edited table file may break.
    pub fn validate(&self) -> std::result::Result<(), TablesError> {
        for alias in &self.aliases {
            if alias.pattern.trim().is_empty() {
                return Err(TablesError::EmptyAlias {
                    canonical: alias.canonical.clone(),
                });
            }
        }

        let mut seen = HashSet::new();
        for entry in &self.industry_keywords {
            if entry.industry == Industry::General {
                return Err(TablesError::GeneralKeywords);
            }
            if !seen.insert(entry.industry) {
                return Err(TablesError::DuplicateIndustry(entry.industry.to_string()));
            }
        }

        let mut seen = HashSet::new();
        for entry in &self.column_orders {
            if !seen.insert(entry.industry) {
                return Err(TablesError::DuplicateIndustry(entry.industry.to_string()));
            }
        }

        Ok(())
    }

    /// Whether a name is a canonical field of the alias vocabulary.
    pub fn is_canonical(&self, name: &str) -> bool {
        self.aliases.iter().any(|alias| alias.canonical == name)
    }

    /// Distinct canonical field names, in first-alias order.
    pub fn canonical_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for alias in &self.aliases {
            if !names.contains(&alias.canonical.as_str()) {
                names.push(&alias.canonical);
            }
        }
        names
    }

    /// Preferred columns for an industry. Empty for `general`.
    pub fn column_order(&self, industry: Industry) -> &[String] {
        self.column_orders
            .iter()
            .find(|entry| entry.industry == industry)
            .map(|entry| entry.columns.as_slice())
            .unwrap_or(&[])
    }

    /// Exact-key lookup of a unit correction.
    pub fn unit_correction(&self, unit: &str) -> Option<&str> {
        self.unit_corrections
            .iter()
            .find(|entry| entry.from == unit)
            .map(|entry| entry.to.as_str())
    }

    pub fn is_known_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s == size)
    }
}

impl Default for NormalizationTables {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builtin_tables_are_valid() {
        let tables = NormalizationTables::builtin();
        assert!(tables.validate().is_ok());
        assert_eq!(tables.aliases[0].pattern, "pre$io");
        assert_eq!(tables.industry_keywords[0].industry, Industry::Fashion);
    }

    #[test]
    fn test_canonical_names_are_distinct_and_ordered() {
        let tables = NormalizationTables::builtin();
        let names = tables.canonical_names();

        assert_eq!(&names[..4], &["precio_unitario", "talla", "peso", "color"]);
        assert_eq!(names.len(), 27);
        assert!(tables.is_canonical("medida_pecho"));
        assert!(!tables.is_canonical("material"));
    }

    #[test]
    fn test_json_round_trip_keeps_priority_order() {
        let tables = NormalizationTables::builtin();
        let json = serde_json::to_string(tables).unwrap();
        let loaded = NormalizationTables::from_json(&json).unwrap();

        assert_eq!(&loaded, tables);
    }

    #[test]
    fn test_validate_rejects_empty_alias() {
        let json = r#"{
            "aliases": [{"pattern": " ", "canonical": "sku"}],
            "unit_corrections": [],
            "industry_keywords": [],
            "column_orders": []
        }"#;

        let err = NormalizationTables::from_json(json).unwrap_err();
        assert!(err.to_string().contains("empty pattern"));
    }

    #[test]
    fn test_validate_rejects_duplicate_and_general_industries() {
        let mut tables = NormalizationTables::builtin().clone();
        tables.industry_keywords.push(IndustryKeywords {
            industry: Industry::Baby,
            keywords: vec!["cuna".to_string()],
        });
        assert!(matches!(
            tables.validate(),
            Err(TablesError::DuplicateIndustry(_))
        ));

        let mut tables = NormalizationTables::builtin().clone();
        tables.industry_keywords.push(IndustryKeywords {
            industry: Industry::General,
            keywords: vec!["varios".to_string()],
        });
        assert!(matches!(tables.validate(), Err(TablesError::GeneralKeywords)));
    }

    #[test]
    fn test_missing_sizes_default_to_builtin() {
        let json = r#"{
            "aliases": [],
            "unit_corrections": [],
            "industry_keywords": [],
            "column_orders": []
        }"#;
        let tables = NormalizationTables::from_json(json).unwrap();
        assert!(tables.is_known_size("XXL"));
        assert!(tables.column_order(Industry::Fashion).is_empty());
    }
}
