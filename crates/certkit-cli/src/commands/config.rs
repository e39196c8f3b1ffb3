//! Config command - manage configuration.

use std::fs;
use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;

use certkit_core::models::config::CertkitConfig;

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
    Init(InitArgs),

    /// Show configuration file path
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Output path for configuration file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite existing file
    #[arg(long)]
    force: bool,
}

pub fn run(args: ConfigArgs) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(),
        ConfigCommand::Init(init_args) => init_config(init_args),
        ConfigCommand::Path => show_path(),
    }
}

fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("certkit")
        .join("config.json")
}

fn show_config() -> anyhow::Result<()> {
    let config_path = default_config_path();

    let config = if config_path.exists() {
        CertkitConfig::from_file(&config_path)?
    } else {
        println!(
            "{} No config file found, showing defaults.",
            style("ℹ").blue()
        );
        CertkitConfig::default()
    };

    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn init_config(args: InitArgs) -> anyhow::Result<()> {
    let output_path = args.output.unwrap_or_else(default_config_path);

    if output_path.exists() && !args.force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            output_path.display()
        );
    }

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    CertkitConfig::default().save(&output_path)?;
    println!(
        "{} Config written to {}",
        style("✓").green(),
        output_path.display()
    );
    Ok(())
}

fn show_path() -> anyhow::Result<()> {
    println!("{}", default_config_path().display());
    Ok(())
}
