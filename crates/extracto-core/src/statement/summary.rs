//! Reference summaries and statement totals.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::config::SummaryConfig;
use crate::models::movement::Movement;

/// Column headers of the summary export.
pub const SUMMARY_HEADERS: [&str; 5] = [
    "Referencia",
    "Sum_Importe",
    "Cantidad",
    "Pct_Importe",
    "Pct_Cantidad",
];

/// Label of the appended totals row.
pub const TOTAL_LABEL: &str = "TOTAL";

/// Aggregate of all movements sharing a reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub reference: String,
    /// Sum of amounts.
    pub total: Decimal,
    /// Number of movements.
    pub count: usize,
    /// Share of the absolute total, in percent.
    pub amount_share: Decimal,
    /// Share of the movement count, in percent.
    pub count_share: Decimal,
}

impl SummaryRow {
    /// Render the row as an export record, in [`SUMMARY_HEADERS`] order.
    pub fn to_record(&self) -> [String; 5] {
        [
            self.reference.clone(),
            self.total.to_string(),
            self.count.to_string(),
            self.amount_share.to_string(),
            self.count_share.to_string(),
        ]
    }
}

/// Movements grouped by reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// One row per reference, in lexical order.
    pub rows: Vec<SummaryRow>,
    /// Column sums, when requested.
    pub total: Option<SummaryRow>,
}

impl Summary {
    /// Rows followed by the totals row.
    pub fn all_rows(&self) -> impl Iterator<Item = &SummaryRow> {
        self.rows.iter().chain(self.total.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Group movements by reference, excluding the opening balance.
pub fn summarize(movements: &[Movement], config: &SummaryConfig) -> Summary {
    let mut groups: BTreeMap<&str, (Decimal, usize)> = BTreeMap::new();
    for movement in movements {
        let Some(amount) = movement.amount else {
            continue;
        };
        let entry = groups
            .entry(movement.reference.as_str())
            .or_insert((Decimal::ZERO, 0));
        entry.0 += amount;
        entry.1 += 1;
    }

    if groups.is_empty() {
        return Summary::default();
    }

    let absolute_total: Decimal = groups.values().map(|(total, _)| total.abs()).sum();
    let movement_count: usize = groups.values().map(|(_, count)| count).sum();
    let precision = config.percentage_precision;

    let rows: Vec<SummaryRow> = groups
        .into_iter()
        .map(|(reference, (total, count))| SummaryRow {
            reference: reference.to_string(),
            total,
            count,
            amount_share: percentage(total.abs(), absolute_total, precision),
            count_share: percentage(
                Decimal::from(count as u64),
                Decimal::from(movement_count as u64),
                precision,
            ),
        })
        .collect();

    let total = config.include_total_row.then(|| SummaryRow {
        reference: TOTAL_LABEL.to_string(),
        total: rows.iter().map(|r| r.total).sum(),
        count: movement_count,
        amount_share: rows.iter().map(|r| r.amount_share).sum(),
        count_share: rows.iter().map(|r| r.count_share).sum(),
    });

    Summary { rows, total }
}

fn percentage(part: Decimal, whole: Decimal, precision: u32) -> Decimal {
    let mut share = if whole.is_zero() {
        Decimal::ZERO
    } else {
        (part / whole * Decimal::ONE_HUNDRED).round_dp(precision)
    };
    share.rescale(precision);
    share
}

/// Opening balance, net movement and closing balance of a ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementTotals {
    pub opening_balance: Decimal,
    pub total_movements: Decimal,
    pub closing_balance: Decimal,
}

impl StatementTotals {
    /// Compute totals; `None` for an empty ledger.
    pub fn from_movements(movements: &[Movement]) -> Option<Self> {
        let first = movements.first()?;
        let last = movements.last()?;
        Some(Self {
            opening_balance: first.balance,
            total_movements: movements.iter().filter_map(|m| m.amount).sum(),
            closing_balance: last.balance,
        })
    }
}
