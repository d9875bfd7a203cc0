//! Balance-reconciling state machine driving a line grammar.

use rust_decimal::Decimal;
use tracing::{debug, info, trace, warn};

use crate::error::StatementError;
use crate::models::config::ParseConfig;
use crate::models::movement::Movement;
use crate::pdf::LineSource;

use super::rules::money::normalize;
use super::{AmountStrategy, LineGrammar, LineOutcome, MovementFields, Result};

/// Cross-line context of one parse.
#[derive(Debug, Default)]
struct ParseState {
    /// Last explicit date token.
    current_date: Option<String>,
    /// Balance of the last movement, emitted or withheld.
    previous_balance: Option<Decimal>,
    opening_seen: bool,
    /// Transfer header waiting for its detail line.
    pending_transfer: Option<Movement>,
}

/// Outcome of parsing one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    /// Emitted movements in document order, opening balance first.
    pub movements: Vec<Movement>,
    /// Transfer headers withheld for a detail line that never came.
    pub dropped_transfers: Vec<Movement>,
    /// Number of lines fed.
    pub lines_read: usize,
    /// Lines that produced nothing.
    pub unmatched_lines: usize,
}

/// Incremental statement parser.
///
/// Owns the parse state of a single document; create one per document.
pub struct Reconciler<'g> {
    grammar: &'g dyn LineGrammar,
    transfer_separator: String,
    state: ParseState,
    report: ParseReport,
}

impl<'g> Reconciler<'g> {
    /// Create a reconciler for the given grammar.
    pub fn new(grammar: &'g dyn LineGrammar) -> Self {
        Self {
            grammar,
            transfer_separator: " - ".to_string(),
            state: ParseState::default(),
            report: ParseReport::default(),
        }
    }

    /// Set the separator between a transfer header and its detail text.
    pub fn with_transfer_separator(mut self, separator: impl Into<String>) -> Self {
        self.transfer_separator = separator.into();
        self
    }

    /// Movements emitted so far.
    pub fn movements(&self) -> &[Movement] {
        &self.report.movements
    }

    /// Consume one statement line.
    pub fn feed(&mut self, line: &str) -> Result<()> {
        let line = line.trim();
        self.report.lines_read += 1;

        match self.grammar.classify(line, self.state.opening_seen) {
            LineOutcome::InitialBalance { balance } => self.open(&balance),
            LineOutcome::DatedMovement(fields) | LineOutcome::UndatedMovement(fields) => {
                self.movement(fields, false, line)
            }
            LineOutcome::TransferHeader(fields) => self.movement(fields, true, line),
            LineOutcome::TransferDetail { text } => {
                self.transfer_detail(&text);
                Ok(())
            }
            LineOutcome::Unmatched => {
                self.skip(line);
                Ok(())
            }
        }
    }

    /// Finish the document, dropping any transfer still waiting for detail.
    pub fn finish(mut self) -> ParseReport {
        if let Some(pending) = self.state.pending_transfer.take() {
            self.drop_transfer(pending, "end of input");
        }

        info!(
            "Parsed {} movements from {} lines ({} unmatched, {} dropped transfers)",
            self.report.movements.len(),
            self.report.lines_read,
            self.report.unmatched_lines,
            self.report.dropped_transfers.len()
        );
        self.report
    }

    fn open(&mut self, raw_balance: &str) -> Result<()> {
        let balance = normalize(raw_balance, self.grammar.locale())?;
        debug!("Opening balance {}", balance);

        self.report
            .movements
            .push(Movement::opening_balance(self.grammar.opening_label(), balance));
        self.state.previous_balance = Some(balance);
        self.state.opening_seen = true;
        Ok(())
    }

    fn movement(&mut self, fields: MovementFields, transfer_header: bool, line: &str) -> Result<()> {
        let date = match fields.date {
            Some(date) => {
                self.state.current_date = Some(date.clone());
                date
            }
            None => match self.state.current_date.clone() {
                Some(date) => date,
                None if self.grammar.requires_date() => {
                    self.skip(line);
                    return Ok(());
                }
                None => String::new(),
            },
        };

        let locale = self.grammar.locale();
        let balance = normalize(&fields.balance, locale)?;
        let previous = self.state.previous_balance;
        let delta = previous
            .map(|previous| {
                balance
                    .checked_sub(previous)
                    .ok_or_else(|| StatementError::BalanceOverflow {
                        line: line.to_string(),
                    })
            })
            .transpose()?;

        let amount = match self.grammar.strategy() {
            AmountStrategy::ExplicitFields => {
                let mut amount = match (&fields.debit, &fields.credit) {
                    (Some(debit), _) => -normalize(debit, locale)?.abs(),
                    (None, Some(credit)) => normalize(credit, locale)?,
                    (None, None) => {
                        return Err(StatementError::MissingAmount {
                            line: line.to_string(),
                        });
                    }
                };
                if delta.is_some_and(|d| d > Decimal::ZERO) {
                    debug!(
                        "Balance rose {:?} -> {}, inverting amount {} for '{}'",
                        previous, balance, amount, fields.reference
                    );
                    amount = -amount;
                }
                amount
            }
            AmountStrategy::BalanceDelta => delta.map_or(Decimal::ZERO, |d| d.round_dp(2)),
        };

        let movement = Movement::new(date, fields.reference, amount, balance);
        self.state.previous_balance = Some(balance);

        if transfer_header {
            trace!("Holding transfer '{}' for its detail line", movement.reference);
            if let Some(stale) = self.state.pending_transfer.replace(movement) {
                self.drop_transfer(stale, "superseded by another transfer");
            }
        } else {
            if let Some(stale) = self.state.pending_transfer.take() {
                self.drop_transfer(stale, "followed by a regular movement");
            }
            self.report.movements.push(movement);
        }
        Ok(())
    }

    fn transfer_detail(&mut self, text: &str) {
        match self.state.pending_transfer.take() {
            Some(mut pending) => {
                pending.reference.push_str(&self.transfer_separator);
                pending.reference.push_str(text);
                self.report.movements.push(pending);
            }
            None => self.skip(text),
        }
    }

    fn skip(&mut self, line: &str) {
        if !line.is_empty() {
            trace!("Unmatched line: {}", line);
        }
        self.report.unmatched_lines += 1;
    }

    fn drop_transfer(&mut self, movement: Movement, reason: &str) {
        warn!(
            "Dropping transfer '{}' ({} / {:?}) without detail line: {}",
            movement.reference, movement.date, movement.amount, reason
        );
        self.report.dropped_transfers.push(movement);
    }
}

/// Parse a whole document with the given grammar.
pub fn parse<I, S>(lines: I, grammar: &dyn LineGrammar) -> Result<ParseReport>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    info!("Parsing statement with {} grammar", grammar.bank());
    let mut reconciler = Reconciler::new(grammar);
    for line in lines {
        reconciler.feed(line.as_ref())?;
    }
    Ok(reconciler.finish())
}

/// Read every line of a document and parse it with the given grammar.
pub fn parse_source(
    source: &dyn LineSource,
    grammar: &dyn LineGrammar,
    config: &ParseConfig,
) -> crate::Result<ParseReport> {
    let lines = source.lines()?;
    info!(
        "Parsing {} lines with {} grammar",
        lines.len(),
        grammar.bank()
    );

    let mut reconciler =
        Reconciler::new(grammar).with_transfer_separator(config.transfer_separator.as_str());
    for line in &lines {
        reconciler.feed(line)?;
    }
    Ok(reconciler.finish())
}
