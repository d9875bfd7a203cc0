//! Statement line parsing and balance reconciliation.

mod grammar;
mod reconciler;
pub mod rules;
pub mod summary;

pub use grammar::{
    select_grammar, AmountStrategy, Bank, LineGrammar, LineOutcome, MovementFields, Rule,
    RULE_ORDER,
};
pub use reconciler::{parse, parse_source, ParseReport, Reconciler};

use crate::error::StatementError;

/// Result type for statement operations.
pub type Result<T> = std::result::Result<T, StatementError>;
