//! Process command - extract records from a single certificate PDF.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, info, warn};

use certkit_core::models::config::CertkitConfig;
use certkit_core::models::record::{CertificateRecord, TemplateKind};
use certkit_core::{PdfExtractor, artifact_for, extract_document, validate};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input certificate PDF
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Directory for per-serial split pages (overrides config)
    #[arg(long)]
    split_dir: Option<PathBuf>,

    /// Keep records with sentinel fields instead of dropping them
    #[arg(long)]
    keep_incomplete: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

/// One accepted record plus its routing and artifact information.
#[derive(Serialize)]
pub struct RecordOutput {
    #[serde(flatten)]
    pub record: CertificateRecord,
    /// Destination tab/collection derived from the template kind.
    pub destination: &'static str,
    /// Path of the certificate artifact (split page or original file).
    pub artifact: String,
}

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    pb.set_message("Loading PDF...");
    pb.set_position(10);

    let split_dir = args
        .split_dir
        .clone()
        .unwrap_or_else(|| config.output.split_dir.clone());
    let require_complete = config.extraction.require_complete && !args.keep_incomplete;

    pb.set_message("Extracting records...");
    pb.set_position(40);

    let (kind, outputs) = process_file(&args.input, &config, require_complete, &split_dir)?;

    pb.set_position(90);
    pb.finish_with_message("Done");

    println!(
        "{} Document kind: {} ({} record(s))",
        style("ℹ").blue(),
        kind.sheet_tab(),
        outputs.len()
    );

    let rendered = format_records(&outputs, args.format)?;
    if let Some(output_path) = &args.output {
        fs::write(output_path, &rendered)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", rendered);
    }

    debug!("Total processing time: {:?}", start.elapsed());
    Ok(())
}

pub fn load_config(config_path: Option<&str>) -> anyhow::Result<CertkitConfig> {
    Ok(match config_path {
        Some(path) => CertkitConfig::from_file(Path::new(path))?,
        None => CertkitConfig::default(),
    })
}

/// Extract, validate, and resolve artifacts for one PDF.
pub fn process_file(
    input: &Path,
    config: &CertkitConfig,
    require_complete: bool,
    split_dir: &Path,
) -> anyhow::Result<(TemplateKind, Vec<RecordOutput>)> {
    let extractor = PdfExtractor::from_file(input)?;
    debug!("PDF has {} pages", extractor.page_count());

    let mut pages = extractor.page_texts();
    if config.pdf.max_pages > 0 && pages.len() > config.pdf.max_pages {
        warn!(
            "document has {} pages, truncating to {}",
            pages.len(),
            config.pdf.max_pages
        );
        pages.truncate(config.pdf.max_pages);
    }

    let total_text: usize = pages.iter().map(|p| p.trim().len()).sum();
    if total_text < config.pdf.min_text_length {
        debug!(
            "per-page pass yielded {} chars, trying whole-document pass",
            total_text
        );
        let full = extractor.extract_text()?;
        if full.trim().len() < config.pdf.min_text_length {
            anyhow::bail!("PDF has no extractable text: {}", input.display());
        }
        pages = vec![full];
    }

    let extraction = extract_document(&pages);
    if !extraction.kind.is_known() {
        anyhow::bail!("Unsupported certificate format: {}", input.display());
    }

    let mut outputs = Vec::new();
    for record in extraction.records {
        if let Err(e) = validate(&record) {
            if require_complete {
                eprintln!("{} skipping: {}", style("⚠").yellow(), e);
                continue;
            }
            warn!("keeping incomplete record: {}", e);
        }

        let artifact = artifact_for(extractor.document(), &record, input, split_dir)?;
        outputs.push(RecordOutput {
            destination: record.template.sheet_tab(),
            artifact: artifact.display().to_string(),
            record,
        });
    }

    if outputs.is_empty() {
        anyhow::bail!(
            "no complete records extracted from {}",
            input.display()
        );
    }

    Ok((extraction.kind, outputs))
}

pub fn format_records(outputs: &[RecordOutput], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(outputs)?),
        OutputFormat::Csv => format_csv(outputs),
        OutputFormat::Text => Ok(format_text(outputs)),
    }
}

fn format_csv(outputs: &[RecordOutput]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "cert",
        "model",
        "serial",
        "calibration_date",
        "expiry_date",
        "lot",
        "destination",
        "artifact",
    ])?;

    for output in outputs {
        let row = output.record.to_row();
        let mut fields: Vec<&str> = row.iter().map(String::as_str).collect();
        fields.push(output.destination);
        fields.push(&output.artifact);
        wtr.write_record(&fields)?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(outputs: &[RecordOutput]) -> String {
    let mut out = String::new();

    for output in outputs {
        let [cert, model, serial, cal, exp, lot] = output.record.to_row();
        out.push_str(&format!("Serial:        {}\n", serial));
        out.push_str(&format!("Model:         {}\n", model));
        out.push_str(&format!("Certificate:   {}\n", cert));
        out.push_str(&format!("Service date:  {}\n", cal));
        out.push_str(&format!("Next service:  {}\n", exp));
        out.push_str(&format!("Lot/Report:    {}\n", lot));
        out.push_str(&format!("Destination:   {}\n", output.destination));
        out.push_str(&format!("Artifact:      {}\n", output.artifact));
        out.push('\n');
    }

    out
}
