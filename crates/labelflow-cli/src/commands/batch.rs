//! Batch command - normalize many OCR output files into one table.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use chrono::Local;
use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use labelflow_core::{
    BatchReport, DataNormalizer, Industry, NormalizationTables, NormalizedRecord, TabularAssembler,
};

use super::input::{is_supported, load_records, LoadedRecord};
use super::output::{format_csv, format_text, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Table format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: OutputFormat,

    /// Number of parallel workers
    #[arg(short = 'j', long)]
    jobs: Option<usize>,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Skip classification and use this industry for every record
    #[arg(short, long)]
    industry: Option<Industry>,

    /// Write image references into the image column
    #[arg(long)]
    image_refs: bool,
}

/// A file that could not be read.
struct FailedFile {
    path: PathBuf,
    error: String,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;
    let tables = Arc::new(config.load_tables()?);

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| is_supported(p))
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    let output_dir = args.output_dir.clone().unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&output_dir)?;

    // Read every file first; normalization only needs the raw records.
    let continue_on_error = args.continue_on_error || config.processing.continue_on_error;
    let mut loaded: Vec<LoadedRecord> = Vec::new();
    let mut failed: Vec<FailedFile> = Vec::new();

    for path in &files {
        match load_records(path) {
            Ok(records) => loaded.extend(records),
            Err(e) => {
                let error_msg = e.to_string();
                if continue_on_error {
                    warn!("Failed to read {}: {}", path.display(), error_msg);
                    failed.push(FailedFile {
                        path: path.clone(),
                        error: error_msg,
                    });
                } else {
                    error!("Failed to read {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed: {}", error_msg);
                }
            }
        }
    }

    let pb = ProgressBar::new(loaded.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} records")?
            .progress_chars("=>-"),
    );

    let industry = args.industry.or(config.normalization.force_industry);
    let jobs = args.jobs.unwrap_or(config.processing.jobs).max(1);
    let records = normalize_parallel(loaded, Arc::clone(&tables), industry, jobs, &pb).await?;

    pb.finish_with_message("Complete");

    // Every record is normalized; assemble the batch.
    let mut batch = TabularAssembler::new(&tables)
        .with_image_column(config.export.image_column.clone())
        .assemble_records(&records);
    if args.image_refs || config.export.include_image_refs {
        batch.fill_image_refs();
    }

    let stem = format!(
        "batch_{}_{}",
        batch.industry,
        Local::now().format("%Y%m%d_%H%M%S")
    );

    let table_path = output_dir.join(format!("{}.{}", stem, args.format.extension()));
    let content = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&batch)?,
        OutputFormat::Csv => format_csv(&batch)?,
        OutputFormat::Text => format_text(&batch),
    };
    fs::write(&table_path, content)?;
    debug!("Wrote table to {}", table_path.display());

    let report_path = output_dir.join(format!("{}_report.json", stem));
    let report = BatchReport::new(records, &batch, config.export.sheet_name.clone());
    fs::write(&report_path, serde_json::to_string_pretty(&report)?)?;
    debug!("Wrote report to {}", report_path.display());

    // Print summary
    println!();
    println!(
        "{} Normalized {} records from {} files in {:?}",
        style("✓").green(),
        report.images_processed,
        files.len(),
        start.elapsed()
    );
    println!(
        "   Industry: {}, {} columns",
        style(batch.industry).cyan(),
        batch.columns.len()
    );
    println!("   Table:  {}", table_path.display());
    println!("   Report: {}", report_path.display());

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for file in &failed {
            println!("  - {}: {}", file.path.display(), file.error);
        }
    }

    Ok(())
}

/// Normalize records on at most `jobs` blocking tasks.
///
/// Chunks are contiguous and awaited in order, so the output keeps input order.
async fn normalize_parallel(
    loaded: Vec<LoadedRecord>,
    tables: Arc<NormalizationTables>,
    industry: Option<Industry>,
    jobs: usize,
    pb: &ProgressBar,
) -> anyhow::Result<Vec<NormalizedRecord>> {
    if loaded.is_empty() {
        return Ok(Vec::new());
    }

    let chunk_size = loaded.len().div_ceil(jobs);
    let chunks: Vec<Vec<LoadedRecord>> = loaded.chunks(chunk_size).map(<[_]>::to_vec).collect();

    let handles: Vec<_> = chunks
        .into_iter()
        .map(|chunk| {
            let tables = Arc::clone(&tables);
            let pb = pb.clone();
            tokio::task::spawn_blocking(move || {
                let normalizer = DataNormalizer::new(&tables);
                chunk
                    .iter()
                    .map(|item| {
                        let record = normalizer.normalize_image(
                            &item.record,
                            item.image_ref.clone(),
                            item.engine,
                            industry,
                        );
                        pb.inc(1);
                        record
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut records = Vec::new();
    for handle in handles {
        records.extend(handle.await?);
    }
    Ok(records)
}
