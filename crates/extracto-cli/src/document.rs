//! Loading statement files and running the reconciler over them.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{debug, info};

use extracto_core::models::config::{ExtractoConfig, OutputConfig};
use extracto_core::{parse_source, Bank, LineSource, ParseReport, PdfExtractor, PlainTextSource};

use crate::commands::config::default_config_path;

/// Load the configuration from `--config`, the default location, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<ExtractoConfig> {
    if let Some(path) = config_path {
        return Ok(ExtractoConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using configuration at {}", default_path.display());
        Ok(ExtractoConfig::from_file(&default_path)?)
    } else {
        Ok(ExtractoConfig::default())
    }
}

/// Resolve the bank from the command line or the configured default.
pub fn resolve_bank(bank: Option<&str>, config: &ExtractoConfig) -> anyhow::Result<Bank> {
    Ok(bank.unwrap_or(&config.parse.default_bank).parse()?)
}

/// Open a statement file as a line source, PDF or plain text.
fn open_source(path: &Path, config: &ExtractoConfig) -> anyhow::Result<Box<dyn LineSource>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    if extension == "pdf" {
        let data = fs::read(path)?;
        let mut extractor = PdfExtractor::with_config(config.pdf.clone());
        extractor.load(&data)?;
        debug!("PDF has {} pages", extractor.page_count());
        Ok(Box::new(extractor))
    } else {
        Ok(Box::new(PlainTextSource::new(fs::read_to_string(path)?)))
    }
}

/// Parse one statement file with its own reconciler.
pub fn parse_document(path: &Path, bank: Bank, config: &ExtractoConfig) -> anyhow::Result<ParseReport> {
    info!("Processing {} as {} statement", path.display(), bank);

    let source = open_source(path, config)?;
    let grammar = bank.grammar();
    Ok(parse_source(source.as_ref(), grammar.as_ref(), &config.parse)?)
}

/// File stem that names the outputs of an input file.
pub fn output_stem(input: &Path) -> &str {
    input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("statement")
}

/// Build `<dir>/<stem>_<suffix>[_<timestamp>].csv`.
pub fn output_path(dir: &Path, input: &Path, suffix: &str, output: &OutputConfig) -> PathBuf {
    let stem = output_stem(input);

    let name = if output.timestamped_names {
        format!("{}_{}_{}.csv", stem, suffix, Local::now().format("%Y%m%d_%H%M"))
    } else {
        format!("{}_{}.csv", stem, suffix)
    };
    dir.join(name)
}
