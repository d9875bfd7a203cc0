//! Error types for the extracto-core library.

use thiserror::Error;

use crate::statement::rules::money::Locale;

/// Main error type for the extracto library.
#[derive(Error, Debug)]
pub enum ExtractoError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Statement parsing error.
    #[error("statement error: {0}")]
    Statement(#[from] StatementError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors raised while turning statement lines into movements.
///
/// Every variant aborts the parse of the current document. Lines that match
/// no grammar rule are not errors and never show up here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatementError {
    /// A money token captured by a grammar rule is not a valid decimal.
    #[error("malformed amount {raw:?} ({locale} locale)")]
    MalformedAmount { raw: String, locale: Locale },

    /// A movement rule matched but carried neither a debit nor a credit token.
    #[error("movement line has no debit or credit amount: {line:?}")]
    MissingAmount { line: String },

    /// The difference between consecutive balances does not fit a decimal.
    #[error("balance change out of range: {line:?}")]
    BalanceOverflow { line: String },

    /// No grammar is registered for this bank identifier.
    #[error("unknown bank: {0}")]
    UnknownBank(String),
}

/// Result type for the extracto library.
pub type Result<T> = std::result::Result<T, ExtractoError>;
