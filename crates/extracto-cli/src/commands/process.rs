//! Process command - extract movements from a single statement file.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use extracto_core::{summarize, StatementTotals};

use crate::document::{load_config, parse_document, resolve_bank};
use crate::render::{format_report, summary_csv, totals_text, OutputFormat};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF or extracted text)
    #[arg(required = true)]
    input: PathBuf,

    /// Bank grammar (see `extracto banks`); defaults to the configured bank
    #[arg(short, long)]
    bank: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: OutputFormat,

    /// Also write the reference summary CSV to this file
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Print opening balance, total movements and closing balance
    #[arg(long)]
    totals: bool,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let bank = resolve_bank(args.bank.as_deref(), &config)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    pb.set_message(format!("Reading {} statement...", bank));
    pb.enable_steady_tick(Duration::from_millis(100));

    let report = parse_document(&args.input, bank, &config)?;

    pb.finish_and_clear();

    for dropped in &report.dropped_transfers {
        eprintln!(
            "{} Transfer without detail line was dropped: {} {} ({})",
            style("⚠").yellow(),
            dropped.date,
            dropped.reference,
            dropped.amount.map(|a| a.to_string()).unwrap_or_default()
        );
    }

    if report.movements.is_empty() {
        eprintln!("{} No movements detected in {}", style("ℹ").blue(), args.input.display());
        return Ok(());
    }

    let output = format_report(&report, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        print!("{}", output);
    }

    if let Some(summary_path) = &args.summary {
        let summary = summarize(&report.movements, &config.summary);
        fs::write(summary_path, summary_csv(&summary)?)?;
        eprintln!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    if args.totals {
        if let Some(totals) = StatementTotals::from_movements(&report.movements) {
            eprint!("{}", totals_text(&totals));
        }
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
