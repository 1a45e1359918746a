//! Output formatting shared by the normalize and batch commands.

use labelflow_core::AssembledBatch;

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV table
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

/// Write an assembled batch as CSV: header row, then one row per record.
pub fn format_csv(batch: &AssembledBatch) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(batch.header())?;
    for row in &batch.rows {
        wtr.write_record(row.cells())?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

/// Human-readable rendering of an assembled batch.
pub fn format_text(batch: &AssembledBatch) -> String {
    let mut output = String::new();

    output.push_str(&format!("Industry: {}\n", batch.industry));
    output.push_str(&format!("Records: {}\n", batch.len()));

    for (i, row) in batch.rows.iter().enumerate() {
        output.push('\n');
        output.push_str(&format!("[{}] {}\n", i + 1, row.image_ref));
        for (column, value) in batch.columns.iter().zip(&row.values) {
            if !value.is_empty() {
                output.push_str(&format!("  {}: {}\n", column, value));
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use labelflow_core::{Industry, NormalizationTables, NormalizedRecord, TabularAssembler};

    fn sample_batch() -> AssembledBatch {
        let mut record = NormalizedRecord::new();
        record.insert("talla", "M");
        record.insert("marca", "Acme, Inc");
        TabularAssembler::new(NormalizationTables::builtin()).assemble(
            &[record],
            &["a.jpg".to_string()],
            &[Industry::Fashion],
        )
    }

    #[test]
    fn test_format_csv() {
        let csv = format_csv(&sample_batch()).unwrap();
        assert_eq!(csv, "Imagen,talla,marca\n,M,\"Acme, Inc\"\n");
    }

    #[test]
    fn test_format_csv_with_image_refs() {
        let mut batch = sample_batch();
        batch.fill_image_refs();
        let csv = format_csv(&batch).unwrap();
        assert!(csv.lines().nth(1).unwrap().starts_with("a.jpg,"));
    }

    #[test]
    fn test_format_text_skips_empty_values() {
        let text = format_text(&sample_batch());
        assert!(text.starts_with("Industry: fashion\n"));
        assert!(text.contains("  talla: M\n"));
        assert!(text.contains("[1] a.jpg"));
    }
}
