//! Batch-level tabular assembly: majority industry, column order and rows.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use crate::models::record::{Industry, NormalizedRecord};
use crate::tables::NormalizationTables;

/// Default header of the leading image column.
pub const DEFAULT_IMAGE_COLUMN: &str = "Imagen";

/// One output row, aligned with [`AssembledBatch::columns`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    /// Reference of the image this row was read from.
    pub image_ref: String,
    /// Image column cell. Empty until an embedding step fills it.
    pub image: String,
    /// One value per column, empty when the record lacks the field.
    pub values: Vec<String>,
}

impl TableRow {
    /// Image cell followed by the column values.
    pub fn cells(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.image.as_str()).chain(self.values.iter().map(String::as_str))
    }
}

/// Rows of a batch, ready for a spreadsheet writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssembledBatch {
    /// Majority industry of the batch.
    pub industry: Industry,
    /// Header of the leading image column.
    pub image_column: String,
    /// Ordered data columns (without the image column).
    pub columns: Vec<String>,
    /// Rows in input order.
    pub rows: Vec<TableRow>,
}

impl AssembledBatch {
    /// Full header: image column, then data columns.
    pub fn header(&self) -> Vec<&str> {
        std::iter::once(self.image_column.as_str())
            .chain(self.columns.iter().map(String::as_str))
            .collect()
    }

    /// Put each row's image reference into its image cell.
    pub fn fill_image_refs(&mut self) {
        for row in &mut self.rows {
            row.image = row.image_ref.clone();
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Most frequent industry. Ties go to the one that occurs first; an empty
/// list is `general`.
pub fn batch_industry(industries: &[Industry]) -> Industry {
    let mut counts: Vec<(Industry, usize)> = Vec::new();
    for industry in industries {
        match counts.iter_mut().find(|(seen, _)| seen == industry) {
            Some(entry) => entry.1 += 1,
            None => counts.push((*industry, 1)),
        }
    }

    let mut best = (Industry::General, 0);
    for (industry, count) in counts {
        if count > best.1 {
            best = (industry, count);
        }
    }
    best.0
}

/// Reshapes normalized records into ordered rows.
#[derive(Debug, Clone)]
pub struct TabularAssembler<'a> {
    tables: &'a NormalizationTables,
    image_column: String,
}

impl<'a> TabularAssembler<'a> {
    pub fn new(tables: &'a NormalizationTables) -> Self {
        Self {
            tables,
            image_column: DEFAULT_IMAGE_COLUMN.to_string(),
        }
    }

    /// Set the header of the image column.
    pub fn with_image_column(mut self, name: impl Into<String>) -> Self {
        self.image_column = name.into();
        self
    }

    /// Preferred columns of the industry that are present, then the rest in
    /// lexicographic order.
    pub fn column_order(&self, industry: Industry, records: &[NormalizedRecord]) -> Vec<String> {
        let present: BTreeSet<&str> = records
            .iter()
            .flat_map(|record| record.field_names())
            .collect();

        let mut columns: Vec<String> = self
            .tables
            .column_order(industry)
            .iter()
            .filter(|column| present.contains(column.as_str()))
            .cloned()
            .collect();

        let rest: Vec<String> = present
            .into_iter()
            .filter(|column| !columns.iter().any(|c| c.as_str() == *column))
            .map(str::to_string)
            .collect();
        columns.extend(rest);
        columns
    }

    /// Assemble a batch.
    ///
    /// `records`, `image_refs` and `industries` are index-aligned; a missing
    /// image reference becomes the empty string.
    pub fn assemble(
        &self,
        records: &[NormalizedRecord],
        image_refs: &[String],
        industries: &[Industry],
    ) -> AssembledBatch {
        let industry = batch_industry(industries);
        let columns = self.column_order(industry, records);

        let rows = records
            .iter()
            .enumerate()
            .map(|(i, record)| TableRow {
                image_ref: image_refs.get(i).cloned().unwrap_or_default(),
                image: String::new(),
                values: columns
                    .iter()
                    .map(|column| record.get(column).unwrap_or_default().to_string())
                    .collect(),
            })
            .collect();

        debug!(
            "Assembled {} records into {} columns ({})",
            records.len(),
            columns.len(),
            industry
        );

        AssembledBatch {
            industry,
            image_column: self.image_column.clone(),
            columns,
            rows,
        }
    }

    /// Assemble using the industry and image reference recorded in each
    /// record's metadata.
    pub fn assemble_records(&self, records: &[NormalizedRecord]) -> AssembledBatch {
        let image_refs: Vec<String> = records
            .iter()
            .map(|record| record.metadata.image_ref.clone())
            .collect();
        let industries: Vec<Industry> = records
            .iter()
            .map(|record| record.metadata.industry)
            .collect();
        self.assemble(records, &image_refs, &industries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use crate::models::record::RecordMetadata;

    fn record(fields: &[(&str, &str)]) -> NormalizedRecord {
        let mut record = NormalizedRecord::new();
        for (name, value) in fields {
            record.insert(*name, *value);
        }
        record
    }

    fn assembler() -> TabularAssembler<'static> {
        TabularAssembler::new(NormalizationTables::builtin())
    }

    #[test]
    fn test_batch_industry_mode() {
        use Industry::*;
        assert_eq!(batch_industry(&[Fashion, Baby, Baby]), Baby);
        assert_eq!(batch_industry(&[]), General);
        assert_eq!(batch_industry(&[General, General, Textile]), General);
    }

    #[test]
    fn test_batch_industry_tie_goes_to_first_occurrence() {
        use Industry::*;
        assert_eq!(batch_industry(&[Footwear, Fashion, Fashion, Footwear]), Footwear);
        assert_eq!(batch_industry(&[Baby, Textile]), Baby);
    }

    #[test]
    fn test_fashion_column_order() {
        let records = vec![record(&[
            ("talla", "M"),
            ("extra_field", "x"),
            ("color", "Rojo"),
            ("sku", "A1"),
        ])];

        let columns = assembler().column_order(Industry::Fashion, &records);
        assert_eq!(columns, vec!["sku", "talla", "color", "extra_field"]);
    }

    #[test]
    fn test_general_columns_are_sorted() {
        let records = vec![record(&[("marca", "A"), ("color", "B")]), record(&[("alto", "1")])];

        let columns = assembler().column_order(Industry::General, &records);
        assert_eq!(columns, vec!["alto", "color", "marca"]);
    }

    #[test]
    fn test_assemble_rows_are_aligned() {
        let records = vec![
            record(&[("talla", "M"), ("color", "Rojo")]),
            record(&[("sku", "B2"), ("marca", "Acme")]),
        ];
        let image_refs = vec!["a.jpg".to_string(), "b.jpg".to_string()];
        let industries = vec![Industry::Fashion, Industry::General];

        let batch = assembler().assemble(&records, &image_refs, &industries);

        assert_eq!(batch.industry, Industry::Fashion);
        assert_eq!(batch.header(), vec!["Imagen", "sku", "talla", "color", "marca"]);
        assert_eq!(batch.rows[0].values, vec!["", "M", "Rojo", ""]);
        assert_eq!(batch.rows[1].values, vec!["B2", "", "", "Acme"]);
        assert_eq!(batch.rows[1].image_ref, "b.jpg");

        let cells: Vec<&str> = batch.rows[0].cells().collect();
        assert_eq!(cells, vec!["", "", "M", "Rojo", ""]);
    }

    #[test]
    fn test_fill_image_refs() {
        let records = vec![record(&[("sku", "1")])];
        let mut batch = assembler()
            .with_image_column("Foto")
            .assemble(&records, &["x.png".to_string()], &[Industry::Baby]);

        assert_eq!(batch.rows[0].image, "");
        batch.fill_image_refs();
        assert_eq!(batch.rows[0].image, "x.png");
        assert_eq!(batch.header()[0], "Foto");
    }

    #[test]
    fn test_assemble_records_uses_metadata() {
        let records = vec![
            record(&[("sku", "1")]).with_metadata(RecordMetadata {
                image_ref: "one.jpg".to_string(),
                industry: Industry::Textile,
                ..Default::default()
            }),
        ];

        let batch = assembler().assemble_records(&records);
        assert_eq!(batch.industry, Industry::Textile);
        assert_eq!(batch.rows[0].image_ref, "one.jpg");
    }

    #[test]
    fn test_empty_batch() {
        let batch = assembler().assemble(&[], &[], &[]);
        assert!(batch.is_empty());
        assert!(batch.columns.is_empty());
        assert_eq!(batch.industry, Industry::General);
    }
}
