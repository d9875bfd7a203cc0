//! Line grammars: per-bank classification of statement lines.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::rules::hsbc::HsbcGrammar;
use super::rules::money::Locale;
use super::rules::santander::SantanderGrammar;
use super::Result;
use crate::error::StatementError;

/// Raw fields captured from a movement line, before normalization.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MovementFields {
    /// Explicit date token, if the line carries one.
    pub date: Option<String>,
    /// Free-text reference, trimmed.
    pub reference: String,
    /// Debit money token.
    pub debit: Option<String>,
    /// Credit money token.
    pub credit: Option<String>,
    /// Running balance money token.
    pub balance: String,
}

/// Classification of a single statement line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// The opening-balance line.
    InitialBalance { balance: String },
    /// A movement line carrying its own date.
    DatedMovement(MovementFields),
    /// A movement line that inherits the last seen date.
    UndatedMovement(MovementFields),
    /// A movement whose reference is a transfer marker; its detail may follow.
    TransferHeader(MovementFields),
    /// Continuation line completing a transfer header.
    TransferDetail { text: String },
    /// Nothing matched; the line is ignored.
    Unmatched,
}

/// Pattern rules of a grammar, in the order they are attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    InitialBalance,
    DatedMovement,
    UndatedMovement,
    TransferDetail,
}

/// Priority order of the rules; the first matching rule wins.
pub const RULE_ORDER: [Rule; 4] = [
    Rule::InitialBalance,
    Rule::DatedMovement,
    Rule::UndatedMovement,
    Rule::TransferDetail,
];

/// How a grammar derives the amount of a movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountStrategy {
    /// Amount comes from the debit/credit column, sign-corrected by the balance trend.
    ExplicitFields,
    /// Amount is the difference between consecutive running balances.
    BalanceDelta,
}

impl fmt::Display for AmountStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountStrategy::ExplicitFields => write!(f, "explicit fields"),
            AmountStrategy::BalanceDelta => write!(f, "balance delta"),
        }
    }
}

/// Bank-specific set of line classification rules.
pub trait LineGrammar: Send + Sync {
    /// Bank this grammar reads.
    fn bank(&self) -> Bank;

    /// Numeric conventions of the money tokens.
    fn locale(&self) -> Locale;

    /// Amount inference strategy.
    fn strategy(&self) -> AmountStrategy;

    /// Reference text of the opening-balance sentinel.
    fn opening_label(&self) -> &'static str;

    /// Reference texts (lowercase) that mark a transfer header.
    fn transfer_markers(&self) -> &'static [&'static str] {
        &[]
    }

    /// Whether an undated movement with no prior date is dropped instead of
    /// emitted with an empty date.
    fn requires_date(&self) -> bool {
        false
    }

    /// Apply a single rule to a line.
    fn apply(&self, rule: Rule, line: &str) -> Option<LineOutcome>;

    /// Whether a reference is one of the transfer markers.
    fn is_transfer_header(&self, reference: &str) -> bool {
        let reference = reference.to_lowercase();
        self.transfer_markers().iter().any(|m| *m == reference)
    }

    /// Classify a line by trying the rules in [`RULE_ORDER`].
    ///
    /// The opening-balance rule is skipped once the opening balance has been
    /// seen. Movement lines whose reference is a transfer marker come back as
    /// [`LineOutcome::TransferHeader`].
    fn classify(&self, line: &str, opening_seen: bool) -> LineOutcome {
        for rule in RULE_ORDER {
            if rule == Rule::InitialBalance && opening_seen {
                continue;
            }
            let Some(outcome) = self.apply(rule, line) else {
                continue;
            };
            return match outcome {
                LineOutcome::DatedMovement(fields) | LineOutcome::UndatedMovement(fields)
                    if self.is_transfer_header(&fields.reference) =>
                {
                    LineOutcome::TransferHeader(fields)
                }
                other => other,
            };
        }
        LineOutcome::Unmatched
    }
}

/// Supported banks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bank {
    Santander,
    Hsbc,
}

impl Bank {
    /// All supported banks.
    pub const ALL: [Bank; 2] = [Bank::Santander, Bank::Hsbc];

    /// Canonical identifier.
    pub fn id(&self) -> &'static str {
        match self {
            Bank::Santander => "santander",
            Bank::Hsbc => "hsbc",
        }
    }

    /// Alternative identifiers accepted by [`Bank::from_str`].
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Bank::Santander => &["stdr", "santander-rio"],
            Bank::Hsbc => &[],
        }
    }

    /// Grammar reading this bank's statements.
    pub fn grammar(&self) -> Box<dyn LineGrammar> {
        match self {
            Bank::Santander => Box::new(SantanderGrammar),
            Bank::Hsbc => Box::new(HsbcGrammar),
        }
    }
}

impl fmt::Display for Bank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Bank {
    type Err = StatementError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let id = s.trim().to_lowercase();
        Bank::ALL
            .into_iter()
            .find(|bank| bank.id() == id || bank.aliases().contains(&id.as_str()))
            .ok_or_else(|| StatementError::UnknownBank(s.to_string()))
    }
}

/// Look up the grammar for a bank identifier.
pub fn select_grammar(bank_id: &str) -> Result<Box<dyn LineGrammar>> {
    let bank: Bank = bank_id.parse()?;
    debug!("Selected {} grammar for '{}'", bank, bank_id);
    Ok(bank.grammar())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_known_banks() {
        assert_eq!(select_grammar("santander").unwrap().bank(), Bank::Santander);
        assert_eq!(select_grammar(" STDR ").unwrap().bank(), Bank::Santander);
        assert_eq!(select_grammar("HSBC").unwrap().bank(), Bank::Hsbc);
    }

    #[test]
    fn test_select_unknown_bank() {
        let err = select_grammar("galicia").err().unwrap();
        assert_eq!(err, StatementError::UnknownBank("galicia".to_string()));
    }

    #[test]
    fn test_grammar_properties() {
        let santander = Bank::Santander.grammar();
        assert_eq!(santander.locale(), Locale::Arg);
        assert_eq!(santander.strategy(), AmountStrategy::ExplicitFields);
        assert_eq!(santander.opening_label(), "Saldo Inicial");
        assert!(santander.is_transfer_header("TRANSFERENCIA RECIBIDA"));
        assert!(!santander.requires_date());

        let hsbc = Bank::Hsbc.grammar();
        assert_eq!(hsbc.locale(), Locale::Us);
        assert_eq!(hsbc.strategy(), AmountStrategy::BalanceDelta);
        assert_eq!(hsbc.opening_label(), "SALDO ANTERIOR");
        assert!(!hsbc.is_transfer_header("Transferencia Recibida"));
        assert!(hsbc.requires_date());
    }

    #[test]
    fn test_opening_rule_skipped_once_seen() {
        let grammar = Bank::Santander.grammar();
        let line = "Saldo Inicial $ 1.000,00";

        assert_eq!(
            grammar.classify(line, false),
            LineOutcome::InitialBalance {
                balance: "$ 1.000,00".to_string()
            }
        );
        assert_eq!(grammar.classify(line, true), LineOutcome::Unmatched);
    }
}
