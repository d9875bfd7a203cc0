//! Configuration structures for the extraction pipeline.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ExtractoError, Result};

/// Main configuration for the extracto pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractoConfig {
    /// Statement parsing configuration.
    pub parse: ParseConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Reference summary configuration.
    pub summary: SummaryConfig,

    /// Output file naming.
    pub output: OutputConfig,
}

/// Statement parsing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseConfig {
    /// Bank grammar used when none is given on the command line.
    pub default_bank: String,

    /// Separator placed between a transfer header and its detail line.
    pub transfer_separator: String,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            default_bank: "santander".to_string(),
            transfer_separator: " - ".to_string(),
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Maximum pages to read (0 = unlimited).
    pub max_pages: usize,

    /// Below this many characters of text the PDF is probably scanned.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            max_pages: 0,
            min_text_length: 50,
        }
    }
}

/// Reference summary configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    /// Decimal places kept in percentage columns.
    pub percentage_precision: u32,

    /// Append a `TOTAL` row with column sums.
    pub include_total_row: bool,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            percentage_precision: 4,
            include_total_row: true,
        }
    }
}

/// Output file naming configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Suffix of movement detail files.
    pub detail_suffix: String,

    /// Suffix of reference summary files.
    pub summary_suffix: String,

    /// Append a `%Y%m%d_%H%M` timestamp to generated file names.
    pub timestamped_names: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            detail_suffix: "Detalle_Movimientos".to_string(),
            summary_suffix: "Resumen_Referencias".to_string(),
            timestamped_names: true,
        }
    }
}

impl ExtractoConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| ExtractoError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ExtractoError::Config(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }
}
