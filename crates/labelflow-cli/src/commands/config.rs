//! Config command - manage the user configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;

use labelflow_core::LabelflowConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Initialize a new configuration file
    Init {
        /// Output path for configuration file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },

    /// Get a configuration value
    Get {
        /// Dotted key (e.g., "export.image_column")
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Dotted key (e.g., "normalization.force_industry")
        key: String,
        /// New value, JSON or a bare string
        value: String,
    },

    /// Show configuration file path
    Path,
}

pub async fn run(args: ConfigArgs) -> anyhow::Result<()> {
    let path = default_config_path();
    match args.command {
        ConfigCommand::Show => {
            if !path.exists() {
                println!("{} No config file found, showing defaults.", style("ℹ").blue());
            }
            println!("{}", serde_json::to_string_pretty(&read_or_default(&path)?)?);
        }
        ConfigCommand::Init { output, force } => {
            let output = output.unwrap_or(path);
            if output.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    output.display()
                );
            }
            write_config(&output, &LabelflowConfig::default())?;
            println!("{} Created configuration file at {}", style("✓").green(), output.display());
        }
        ConfigCommand::Get { key } => {
            let json = serde_json::to_value(read_or_default(&path)?)?;
            let value = lookup(&json, &key)
                .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        ConfigCommand::Set { key, value } => {
            let parsed: Value =
                serde_json::from_str(&value).unwrap_or_else(|_| Value::String(value.clone()));

            let mut json = serde_json::to_value(read_or_default(&path)?)?;
            assign(&mut json, &key, parsed.clone())?;

            // Round-trip through the typed config so bad values are rejected here.
            let config: LabelflowConfig = serde_json::from_value(json)
                .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", key, e))?;
            write_config(&path, &config)?;

            println!("{} Set {} = {}", style("✓").green(), key, parsed);
        }
        ConfigCommand::Path => {
            println!("Configuration file: {}", path.display());
            if path.exists() {
                println!("Status: {}", style("exists").green());
            } else {
                println!("Status: {}", style("not created").yellow());
                println!();
                println!("Run 'labelflow config init' to create a configuration file.");
            }
        }
    }

    Ok(())
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("labelflow")
        .join("config.json")
}

fn read_or_default(path: &Path) -> anyhow::Result<LabelflowConfig> {
    if path.exists() {
        Ok(LabelflowConfig::from_file(path)?)
    } else {
        Ok(LabelflowConfig::default())
    }
}

fn write_config(path: &Path, config: &LabelflowConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    config.save(path)?;
    Ok(())
}

/// Follow a dotted key through nested objects.
fn lookup<'a>(json: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(json, |current, part| current.get(part))
}

/// Set a dotted key. Every parent must already exist as an object.
fn assign(json: &mut Value, key: &str, value: Value) -> anyhow::Result<()> {
    let (parents, last) = match key.rsplit_once('.') {
        Some((parents, last)) => (Some(parents), last),
        None => (None, key),
    };

    let mut current = json;
    if let Some(parents) = parents {
        for part in parents.split('.') {
            current = current
                .get_mut(part)
                .ok_or_else(|| anyhow::anyhow!("Configuration path not found: {}", key))?;
        }
    }

    let object = current
        .as_object_mut()
        .ok_or_else(|| anyhow::anyhow!("Cannot set value at non-object path"))?;
    if !object.contains_key(last) {
        anyhow::bail!("Configuration key not found: {}", key);
    }
    object.insert(last.to_string(), value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lookup_dotted_key() {
        let json = serde_json::to_value(LabelflowConfig::default()).unwrap();
        assert_eq!(lookup(&json, "export.image_column"), Some(&Value::from("Imagen")));
        assert_eq!(lookup(&json, "export.missing"), None);
    }

    #[test]
    fn test_assign_and_round_trip() {
        let mut json = serde_json::to_value(LabelflowConfig::default()).unwrap();
        assign(&mut json, "normalization.force_industry", Value::from("baby")).unwrap();
        assign(&mut json, "processing.jobs", Value::from(2)).unwrap();

        let config: LabelflowConfig = serde_json::from_value(json).unwrap();
        assert_eq!(config.processing.jobs, 2);
        assert_eq!(
            config.normalization.force_industry,
            Some(labelflow_core::Industry::Baby)
        );
    }

    #[test]
    fn test_assign_rejects_unknown_key() {
        let mut json = serde_json::to_value(LabelflowConfig::default()).unwrap();
        assert!(assign(&mut json, "export.colour", Value::from(1)).is_err());
        assert!(assign(&mut json, "nope.jobs", Value::from(1)).is_err());
    }
}
