//! Core library for bank statement extraction.
//!
//! This crate provides:
//! - Line extraction from PDF and plain-text statements
//! - Bank-specific line grammars (Santander, HSBC)
//! - A balance-reconciling state machine producing movement ledgers
//! - Reference summaries and statement totals

pub mod error;
pub mod models;
pub mod pdf;
pub mod statement;

pub use error::{ExtractoError, PdfError, Result, StatementError};
pub use models::config::ExtractoConfig;
pub use models::movement::Movement;
pub use pdf::{LineSource, PageLines, PdfExtractor, PlainTextSource};
pub use statement::{
    parse, parse_source, select_grammar, AmountStrategy, Bank, LineGrammar, LineOutcome,
    ParseReport, Reconciler,
};
pub use statement::summary::{summarize, StatementTotals, Summary, SummaryRow};
