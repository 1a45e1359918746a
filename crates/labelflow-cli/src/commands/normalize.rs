//! Normalize command - clean the records of a single OCR output file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use labelflow_core::{BatchReport, DataNormalizer, Industry, NormalizedRecord, TabularAssembler};

use super::input::load_records;
use super::output::{format_csv, format_text, OutputFormat};

/// Arguments for the normalize command.
#[derive(Args)]
pub struct NormalizeArgs {
    /// Input file (.json record(s) or .txt OCR text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Skip classification and use this industry
    #[arg(short, long)]
    industry: Option<Industry>,

    /// Write image references into the image column
    #[arg(long)]
    image_refs: bool,
}

pub async fn run(args: NormalizeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;
    let tables = config.load_tables()?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Normalizing file: {}", args.input.display());

    let loaded = load_records(&args.input)?;
    let industry = args.industry.or(config.normalization.force_industry);
    let normalizer = DataNormalizer::new(&tables);

    let records: Vec<NormalizedRecord> = loaded
        .iter()
        .map(|item| normalizer.normalize_image(&item.record, item.image_ref.clone(), item.engine, industry))
        .collect();

    let mut batch = TabularAssembler::new(&tables)
        .with_image_column(config.export.image_column.clone())
        .assemble_records(&records);
    if args.image_refs || config.export.include_image_refs {
        batch.fill_image_refs();
    }

    let output = match args.format {
        OutputFormat::Json => {
            let report = BatchReport::new(records, &batch, config.export.sheet_name.clone());
            serde_json::to_string_pretty(&report)?
        }
        OutputFormat::Csv => format_csv(&batch)?,
        OutputFormat::Text => format_text(&batch),
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
