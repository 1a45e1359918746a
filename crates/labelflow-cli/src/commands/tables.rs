//! Tables command - inspect and export the normalization lookup tables.

use std::fs;
use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;

use labelflow_core::{FieldNormalizer, NormalizationTables};

/// Arguments for the tables command.
#[derive(Args)]
pub struct TablesArgs {
    #[command(subcommand)]
    command: TablesCommand,
}

#[derive(Subcommand)]
enum TablesCommand {
    /// Print the tables in effect
    Show,

    /// Write the built-in tables to a file for editing
    Init(InitArgs),

    /// Show the canonical field a raw label resolves to
    Check {
        /// Raw label as read by OCR
        label: String,
    },
}

#[derive(Args)]
struct InitArgs {
    /// Output path for the tables file
    #[arg(short, long, default_value = "tables.json")]
    output: PathBuf,

    /// Overwrite existing file
    #[arg(long)]
    force: bool,
}

pub async fn run(args: TablesArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    match args.command {
        TablesCommand::Show => {
            let tables = super::load_config(config_path)?.load_tables()?;
            println!("{}", serde_json::to_string_pretty(&tables)?);
            Ok(())
        }
        TablesCommand::Init(init_args) => init_tables(init_args),
        TablesCommand::Check { label } => {
            let tables = super::load_config(config_path)?.load_tables()?;
            let canonical = FieldNormalizer::new(&tables).normalize(&label);
            let status = if tables.is_canonical(&canonical) {
                style("canonical").green()
            } else {
                style("fallback").yellow()
            };
            println!("{} -> {} ({})", label, canonical, status);
            Ok(())
        }
    }
}

fn init_tables(args: InitArgs) -> anyhow::Result<()> {
    if args.output.exists() && !args.force {
        anyhow::bail!(
            "Tables file already exists at {}. Use --force to overwrite.",
            args.output.display()
        );
    }

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    NormalizationTables::builtin().save(&args.output)?;

    println!(
        "{} Wrote built-in tables to {}",
        style("✓").green(),
        args.output.display()
    );
    println!("Point normalization.tables_path at it to use an edited copy.");

    Ok(())
}
