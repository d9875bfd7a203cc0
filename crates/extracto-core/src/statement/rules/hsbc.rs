//! HSBC statement grammar.
//!
//! Layout:
//!
//! ```text
//! SALDO ANTERIOR                                   10,000.00
//! 02-ENE - PAGO TARJETA VISA 12345 1,500.00          8,500.00
//!  - INTERESES GANADOS 12346 12.50                   8,512.50
//! ```
//!
//! Debit and credit columns are both optional and cannot be told apart once
//! the layout is flattened to text, so amounts come from balance deltas.

use regex::Captures;

use super::money::Locale;
use super::patterns::{HSBC_DATED_MOVEMENT, HSBC_OPENING_BALANCE, HSBC_UNDATED_MOVEMENT};
use crate::statement::{AmountStrategy, Bank, LineGrammar, LineOutcome, MovementFields, Rule};

/// HSBC statement grammar.
#[derive(Debug, Clone, Copy, Default)]
pub struct HsbcGrammar;

impl HsbcGrammar {
    fn fields(caps: &Captures<'_>) -> MovementFields {
        MovementFields {
            date: caps.name("date").map(|m| m.as_str().to_string()),
            reference: caps["reference"].trim().to_string(),
            debit: caps.name("debit").map(|m| m.as_str().to_string()),
            credit: caps.name("credit").map(|m| m.as_str().to_string()),
            balance: caps["balance"].to_string(),
        }
    }
}

impl LineGrammar for HsbcGrammar {
    fn bank(&self) -> Bank {
        Bank::Hsbc
    }

    fn locale(&self) -> Locale {
        Locale::Us
    }

    fn strategy(&self) -> AmountStrategy {
        AmountStrategy::BalanceDelta
    }

    fn opening_label(&self) -> &'static str {
        "SALDO ANTERIOR"
    }

    fn requires_date(&self) -> bool {
        true
    }

    fn apply(&self, rule: Rule, line: &str) -> Option<LineOutcome> {
        match rule {
            Rule::InitialBalance => HSBC_OPENING_BALANCE.captures(line).map(|caps| {
                LineOutcome::InitialBalance {
                    balance: caps[1].to_string(),
                }
            }),
            Rule::DatedMovement => HSBC_DATED_MOVEMENT
                .captures(line)
                .map(|caps| LineOutcome::DatedMovement(Self::fields(&caps))),
            Rule::UndatedMovement => HSBC_UNDATED_MOVEMENT
                .captures(line)
                .map(|caps| LineOutcome::UndatedMovement(Self::fields(&caps))),
            // Transfers carry no continuation line in this layout.
            Rule::TransferDetail => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn classify(line: &str) -> LineOutcome {
        HsbcGrammar.classify(line, true)
    }

    #[test]
    fn test_opening_balance() {
        assert_eq!(
            HsbcGrammar.classify("SALDO ANTERIOR 10,000.00", false),
            LineOutcome::InitialBalance {
                balance: "10,000.00".to_string()
            }
        );
        assert_eq!(
            HsbcGrammar.classify("Saldo anterior al 31-DIC 1234.56", false),
            LineOutcome::InitialBalance {
                balance: "1234.56".to_string()
            }
        );
    }

    #[test]
    fn test_dated_movement_with_debit() {
        assert_eq!(
            classify("02-ENE - PAGO TARJETA VISA 12345 1,500.00 8,500.00"),
            LineOutcome::DatedMovement(MovementFields {
                date: Some("02-ENE".to_string()),
                reference: "PAGO TARJETA VISA".to_string(),
                debit: Some("1,500.00".to_string()),
                credit: None,
                balance: "8,500.00".to_string(),
            })
        );
    }

    #[test]
    fn test_dated_movement_with_both_columns() {
        assert_eq!(
            classify("05-FEB - AJUSTE 00042 10.00 20.00 1,010.00"),
            LineOutcome::DatedMovement(MovementFields {
                date: Some("05-FEB".to_string()),
                reference: "AJUSTE".to_string(),
                debit: Some("10.00".to_string()),
                credit: Some("20.00".to_string()),
                balance: "1,010.00".to_string(),
            })
        );
    }

    #[test]
    fn test_undated_movement() {
        assert_eq!(
            classify("- INTERESES GANADOS 12346 12.50 8,512.50"),
            LineOutcome::UndatedMovement(MovementFields {
                date: None,
                reference: "INTERESES GANADOS".to_string(),
                debit: Some("12.50".to_string()),
                credit: None,
                balance: "8,512.50".to_string(),
            })
        );
    }

    #[test]
    fn test_transfers_are_plain_movements() {
        assert!(matches!(
            classify("02-ENE - Transferencia Recibida 12345 100.00 200.00"),
            LineOutcome::DatedMovement(_)
        ));
        assert_eq!(classify("De Juan Perez / transf - var /123"), LineOutcome::Unmatched);
    }

    #[test]
    fn test_unmatched_lines() {
        assert_eq!(classify("FECHA DESCRIPCION REFERENCIA CARGOS ABONOS SALDO"), LineOutcome::Unmatched);
        assert_eq!(classify("02-ene - lowercase month 12345 1.00 2.00"), LineOutcome::Unmatched);
        assert_eq!(classify("02-ENE - SIN COMPROBANTE 1.00 2.00"), LineOutcome::Unmatched);
    }
}
