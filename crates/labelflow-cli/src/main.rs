//! CLI application for normalizing product label OCR output.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, config, normalize, tables};

/// Product label normalization - Turn noisy OCR key/value text into clean, industry-ordered tables
#[derive(Parser)]
#[command(name = "labelflow")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize the records of a single OCR output file
    Normalize(normalize::NormalizeArgs),

    /// Normalize many OCR output files into one table
    Batch(batch::BatchArgs),

    /// Inspect and export the normalization lookup tables
    Tables(tables::TablesArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Execute command
    match cli.command {
        Commands::Normalize(args) => normalize::run(args, cli.config.as_deref()).await,
        Commands::Batch(args) => batch::run(args, cli.config.as_deref()).await,
        Commands::Tables(args) => tables::run(args, cli.config.as_deref()).await,
        Commands::Config(args) => config::run(args).await,
    }
}
