//! Batch processing command for multiple certificate PDFs.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error};

use certkit_core::models::record::TemplateKind;

use super::process::{OutputFormat, RecordOutput, format_records, load_config, process_file};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory for per-file results
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also write a combined summary CSV
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Directory for per-serial split pages (overrides config)
    #[arg(long)]
    split_dir: Option<PathBuf>,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct FileResult {
    path: PathBuf,
    kind: TemplateKind,
    outputs: Vec<RecordOutput>,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching PDF files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let split_dir = args
        .split_dir
        .clone()
        .unwrap_or_else(|| config.output.split_dir.clone());

    let mut results = Vec::new();
    let mut failures = 0usize;

    for path in files {
        debug!("processing {}", path.display());
        match process_file(&path, &config, config.extraction.require_complete, &split_dir) {
            Ok((kind, outputs)) => {
                results.push(FileResult {
                    path,
                    kind,
                    outputs,
                });
            }
            Err(e) => {
                failures += 1;
                error!("failed to process {}: {}", path.display(), e);
                if !args.continue_on_error {
                    pb.abandon();
                    return Err(e);
                }
            }
        }
        pb.inc(1);
    }
    pb.finish();

    // Per-file outputs
    if let Some(ref output_dir) = args.output_dir {
        for result in &results {
            let stem = result
                .path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("output");
            let extension = match args.format {
                OutputFormat::Json => "json",
                OutputFormat::Csv => "csv",
                OutputFormat::Text => "txt",
            };
            let out_path = output_dir.join(format!("{stem}.{extension}"));
            fs::write(&out_path, format_records(&result.outputs, args.format)?)?;
        }
    }

    // Combined summary CSV
    if let Some(ref summary_path) = args.summary {
        write_summary(summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let total_records: usize = results.iter().map(|r| r.outputs.len()).sum();
    println!(
        "{} Processed {} file(s), {} record(s), {} failure(s) in {:.1}s",
        style("✓").green(),
        results.len(),
        total_records,
        failures,
        start.elapsed().as_secs_f32()
    );

    for result in &results {
        println!(
            "  {} -> {} ({} record(s))",
            result.path.display(),
            result.kind.sheet_tab(),
            result.outputs.len()
        );
    }

    Ok(())
}

fn write_summary(path: &PathBuf, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "file",
        "cert",
        "model",
        "serial",
        "calibration_date",
        "expiry_date",
        "lot",
        "destination",
        "artifact",
    ])?;

    for result in results {
        let file = result.path.display().to_string();
        for output in &result.outputs {
            let row = output.record.to_row();
            let mut fields: Vec<&str> = vec![&file];
            fields.extend(row.iter().map(String::as_str));
            fields.push(output.destination);
            fields.push(&output.artifact);
            wtr.write_record(&fields)?;
        }
    }

    wtr.flush()?;
    Ok(())
}
