//! Santander statement grammar.
//!
//! Layout (one movement per line, date and voucher optional):
//!
//! ```text
//! Saldo Inicial $ 125.000,00
//! 02/01/24 123456 Compra con tarjeta $ 1.500,00 $ 123.500,00
//! Transferencia Recibida $ 20.000,00 $ 143.500,00
//! De Juan Perez / transf - var /20240102
//! ```
//!
//! Each movement line has a single amount column followed by the balance.
//! The amount is read as a debit and the reconciler corrects its sign against
//! the balance trend.

use regex::Captures;

use super::money::Locale;
use super::patterns::{
    SANTANDER_DATED_MOVEMENT, SANTANDER_OPENING_BALANCE, SANTANDER_TRANSFER_DETAIL,
    SANTANDER_UNDATED_MOVEMENT,
};
use crate::statement::{AmountStrategy, Bank, LineGrammar, LineOutcome, MovementFields, Rule};

/// Santander statement grammar.
#[derive(Debug, Clone, Copy, Default)]
pub struct SantanderGrammar;

impl SantanderGrammar {
    fn fields(caps: &Captures<'_>) -> MovementFields {
        MovementFields {
            date: caps.name("date").map(|m| m.as_str().to_string()),
            reference: caps["reference"].trim().to_string(),
            debit: caps.name("debit").map(|m| m.as_str().to_string()),
            credit: None,
            balance: caps["balance"].to_string(),
        }
    }
}

impl LineGrammar for SantanderGrammar {
    fn bank(&self) -> Bank {
        Bank::Santander
    }

    fn locale(&self) -> Locale {
        Locale::Arg
    }

    fn strategy(&self) -> AmountStrategy {
        AmountStrategy::ExplicitFields
    }

    fn opening_label(&self) -> &'static str {
        "Saldo Inicial"
    }

    fn transfer_markers(&self) -> &'static [&'static str] {
        &["transferencia recibida", "transferencia realizada"]
    }

    fn apply(&self, rule: Rule, line: &str) -> Option<LineOutcome> {
        match rule {
            Rule::InitialBalance => SANTANDER_OPENING_BALANCE.captures(line).map(|caps| {
                LineOutcome::InitialBalance {
                    balance: caps[1].to_string(),
                }
            }),
            Rule::DatedMovement => SANTANDER_DATED_MOVEMENT
                .captures(line)
                .map(|caps| LineOutcome::DatedMovement(Self::fields(&caps))),
            Rule::UndatedMovement => SANTANDER_UNDATED_MOVEMENT
                .captures(line)
                .map(|caps| LineOutcome::UndatedMovement(Self::fields(&caps))),
            Rule::TransferDetail => SANTANDER_TRANSFER_DETAIL
                .is_match(line)
                .then(|| LineOutcome::TransferDetail {
                    text: line.to_string(),
                }),
        }
    }
}
