//! Field-specific value cleanup: prices, weights, sizes and casing.

use tracing::trace;

use crate::models::record::Industry;
use crate::tables::NormalizationTables;

use super::patterns::{PRICE_NUMBER, QUANTITY_WITH_UNIT};

/// Kind of cleanup applied to a value, chosen from the canonical field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Price,
    Weight,
    Size,
    Color,
    Text,
}

impl ValueKind {
    /// Dispatch on substrings of the field name, first match wins.
    pub fn for_field(field: &str) -> Self {
        if field.contains("precio") || field.contains("price") {
            Self::Price
        } else if field.contains("peso") || field.contains("weight") {
            Self::Weight
        } else if field.contains("talla") || field.contains("size") {
            Self::Size
        } else if field.contains("color") {
            Self::Color
        } else {
            Self::Text
        }
    }
}

/// Normalizes raw values according to their canonical field.
#[derive(Debug, Clone, Copy)]
pub struct ValueNormalizer<'a> {
    tables: &'a NormalizationTables,
}

impl<'a> ValueNormalizer<'a> {
    pub fn new(tables: &'a NormalizationTables) -> Self {
        Self { tables }
    }

    /// Normalize a raw value for a canonical field.
    ///
    /// Missing or empty values become the empty string. Values that cannot
    /// be parsed for their field pass through trimmed (and, for weights,
    /// with whatever unit corrections applied). The industry does not change
    /// the result yet.
    pub fn normalize(&self, field: &str, raw_value: Option<&str>, industry: Industry) -> String {
        let value = match raw_value {
            Some(v) if !v.is_empty() => v.trim(),
            _ => return String::new(),
        };

        let kind = ValueKind::for_field(field);
        trace!("Normalizing {} as {:?} ({})", field, kind, industry);

        match kind {
            ValueKind::Price => normalize_price(value),
            ValueKind::Weight => self.normalize_weight(value),
            ValueKind::Size => self.normalize_size(value),
            ValueKind::Color | ValueKind::Text => capitalize(value),
        }
    }

    fn normalize_weight(&self, value: &str) -> String {
        let mut corrected = value.to_string();
        for correction in &self.tables.unit_corrections {
            let wrong = correction.from.to_lowercase();
            if wrong.is_empty() {
                continue;
            }
            let lowered = corrected.to_lowercase();
            if lowered.contains(&wrong) {
                corrected = lowered.replace(&wrong, &correction.to);
            }
        }

        match QUANTITY_WITH_UNIT.captures(&corrected) {
            Some(caps) => {
                let unit = &caps[2];
                let unit = self
                    .tables
                    .unit_correction(&unit.to_uppercase())
                    .map(str::to_string)
                    .unwrap_or_else(|| unit.to_lowercase());
                format!("{} {}", &caps[1], unit)
            }
            None => corrected,
        }
    }

    fn normalize_size(&self, value: &str) -> String {
        let upper = value.to_uppercase();
        if !self.tables.is_known_size(&upper) {
            trace!("Unrecognized size {:?} passed through", upper);
        }
        upper
    }
}

/// Format the first number of a price as `$<amount>` with two decimals.
///
/// The amount is an `f64`, so rounding follows its binary value
/// (`2.675` is stored below the midpoint and prints as `$2.67`).
pub fn normalize_price(value: &str) -> String {
    PRICE_NUMBER
        .find(value)
        .and_then(|m| m.as_str().trim_end_matches('.').parse::<f64>().ok())
        .map(|amount| format!("${:.2}", amount))
        .unwrap_or_else(|| value.to_string())
}

/// Upper-case the first character and lower-case the rest.
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
