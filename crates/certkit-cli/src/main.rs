//! CLI application for calibration-certificate extraction.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, config, process};

/// Certificate extractor - recover structured records from calibration
/// certificate PDFs
#[derive(Parser)]
#[command(name = "certkit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a single certificate PDF
    Process(process::ProcessArgs),

    /// Process multiple certificate PDFs
    Batch(batch::BatchArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
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
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Process(args) => process::run(args, cli.config.as_deref()),
        Commands::Batch(args) => batch::run(args, cli.config.as_deref()),
        Commands::Config(args) => config::run(args),
    }
}
