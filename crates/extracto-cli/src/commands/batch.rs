//! Batch processing command for multiple statement files.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

use extracto_core::models::config::ExtractoConfig;
use extracto_core::{summarize, Bank, ParseReport};

use crate::document::{load_config, output_path, output_stem, parse_document, resolve_bank};
use crate::render::{movements_csv, summary_csv};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Bank grammar used for every file
    #[arg(short, long)]
    bank: Option<String>,

    /// Output directory (default: current directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    report: Option<ParseReport>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = Arc::new(load_config(config_path)?);
    let bank = resolve_bank(args.bank.as_deref(), &config)?;

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }
    check_output_names(&files)?;

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    let output_dir = args.output_dir.clone().unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&output_dir)?;

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    // Each document gets its own blocking task and its own parse state.
    let permits = Arc::new(Semaphore::new(args.jobs.max(1)));
    let mut tasks = JoinSet::new();
    for (index, path) in files.iter().cloned().enumerate() {
        let permits = Arc::clone(&permits);
        let config = Arc::clone(&config);
        tasks.spawn(async move {
            let _permit = permits.acquire_owned().await;
            let file_start = Instant::now();
            let task_path = path.clone();
            let result = tokio::task::spawn_blocking(move || parse_document(&task_path, bank, &config))
                .await
                .map_err(anyhow::Error::from)
                .and_then(|r| r);
            (index, path, result, file_start.elapsed().as_millis() as u64)
        });
    }

    let mut results: Vec<(usize, ProcessResult)> = Vec::with_capacity(files.len());
    while let Some(joined) = tasks.join_next().await {
        let (index, path, result, processing_time_ms) = joined?;
        overall_pb.inc(1);

        match result {
            Ok(report) => results.push((
                index,
                ProcessResult {
                    path,
                    report: Some(report),
                    error: None,
                    processing_time_ms,
                },
            )),
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push((
                        index,
                        ProcessResult {
                            path,
                            report: None,
                            error: Some(error_msg),
                            processing_time_ms,
                        },
                    ));
                } else {
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    tasks.abort_all();
                    anyhow::bail!("Processing failed for {}: {}", path.display(), error_msg);
                }
            }
        }
    }

    overall_pb.finish_and_clear();
    results.sort_by_key(|(index, _)| *index);
    let results: Vec<ProcessResult> = results.into_iter().map(|(_, r)| r).collect();

    for result in &results {
        if let Some(report) = &result.report {
            write_outputs(result, report, &output_dir, &config)?;
        }
    }

    print_results(&results, bank, start);

    Ok(())
}

/// Outputs are named after the input stem; two inputs sharing one would
/// overwrite each other's files.
fn check_output_names(files: &[PathBuf]) -> anyhow::Result<()> {
    let mut seen: HashMap<&str, &PathBuf> = HashMap::new();
    for path in files {
        if let Some(previous) = seen.insert(output_stem(path), path) {
            anyhow::bail!(
                "{} and {} would write the same output files; process them separately",
                previous.display(),
                path.display()
            );
        }
    }
    Ok(())
}

fn write_outputs(
    result: &ProcessResult,
    report: &ParseReport,
    output_dir: &Path,
    config: &ExtractoConfig,
) -> anyhow::Result<()> {
    if report.movements.is_empty() {
        debug!("No movements in {}, nothing written", result.path.display());
        return Ok(());
    }

    let detail_path = output_path(output_dir, &result.path, &config.output.detail_suffix, &config.output);
    fs::write(&detail_path, movements_csv(&report.movements)?)?;
    debug!("Wrote detail to {}", detail_path.display());

    let summary = summarize(&report.movements, &config.summary);
    let summary_path = output_path(output_dir, &result.path, &config.output.summary_suffix, &config.output);
    fs::write(&summary_path, summary_csv(&summary)?)?;
    debug!("Wrote summary to {}", summary_path.display());

    Ok(())
}

fn print_results(results: &[ProcessResult], bank: Bank, start: Instant) {
    println!();
    println!(
        "{:<40} {:>10} {:>10} {:>8}",
        "File", "Movements", "Dropped", "ms"
    );
    for result in results {
        let name = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");
        match &result.report {
            Some(report) => println!(
                "{:<40} {:>10} {:>10} {:>8}",
                name,
                report.movements.len(),
                report.dropped_transfers.len(),
                result.processing_time_ms
            ),
            None => println!(
                "{:<40} {}",
                name,
                style(result.error.as_deref().unwrap_or("unknown error")).red()
            ),
        }
    }

    let failed = results.iter().filter(|r| r.error.is_some()).count();
    println!();
    println!(
        "{} Processed {} {} files in {:?}",
        style("✓").green(),
        results.len(),
        bank,
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(results.len() - failed).green(),
        style(failed).red()
    );
}
