//! Reconciled ledger entries.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Column headers of the movement detail export.
pub const DETAIL_HEADERS: [&str; 4] = ["Fecha", "Referencia", "Importe", "Saldo"];

/// One reconciled ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    /// Date token copied verbatim from the statement (empty for the opening balance).
    pub date: String,

    /// Free-text description of the movement.
    pub reference: String,

    /// Signed amount; `None` only for the opening-balance sentinel.
    pub amount: Option<Decimal>,

    /// Running balance after this movement.
    pub balance: Decimal,
}

impl Movement {
    /// Create a regular movement.
    pub fn new(
        date: impl Into<String>,
        reference: impl Into<String>,
        amount: Decimal,
        balance: Decimal,
    ) -> Self {
        Self {
            date: date.into(),
            reference: reference.into(),
            amount: Some(amount),
            balance,
        }
    }

    /// Create the opening-balance sentinel that starts every ledger.
    pub fn opening_balance(label: impl Into<String>, balance: Decimal) -> Self {
        Self {
            date: String::new(),
            reference: label.into(),
            amount: None,
            balance,
        }
    }

    /// Whether this is the opening-balance sentinel.
    pub fn is_opening_balance(&self) -> bool {
        self.amount.is_none()
    }

    /// Render the entry as a detail export row, in [`DETAIL_HEADERS`] order.
    pub fn to_record(&self) -> [String; 4] {
        [
            self.date.clone(),
            self.reference.clone(),
            self.amount.map(|a| a.to_string()).unwrap_or_default(),
            self.balance.to_string(),
        ]
    }
}
