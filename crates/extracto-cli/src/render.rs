//! Output formatting for movement ledgers and summaries.

use extracto_core::models::movement::DETAIL_HEADERS;
use extracto_core::statement::summary::SUMMARY_HEADERS;
use extracto_core::{Movement, ParseReport, StatementTotals, Summary};

/// Output format of the movement detail.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// CSV with Fecha, Referencia, Importe, Saldo columns
    Csv,
    /// JSON parse report
    Json,
    /// Plain text table
    Text,
}

pub fn format_report(report: &ParseReport, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Csv => movements_csv(&report.movements),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&report.movements)?),
        OutputFormat::Text => Ok(movements_text(&report.movements)),
    }
}

pub fn movements_csv(movements: &[Movement]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(DETAIL_HEADERS)?;
    for movement in movements {
        wtr.write_record(movement.to_record())?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

pub fn summary_csv(summary: &Summary) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(SUMMARY_HEADERS)?;
    for row in summary.all_rows() {
        wtr.write_record(row.to_record())?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

pub fn movements_text(movements: &[Movement]) -> String {
    let width = movements
        .iter()
        .map(|m| m.reference.chars().count())
        .max()
        .unwrap_or(0)
        .max("Referencia".len());

    let mut output = String::new();
    output.push_str(&format!(
        "{:<10} {:<width$} {:>16} {:>16}\n",
        "Fecha", "Referencia", "Importe", "Saldo"
    ));
    for movement in movements {
        let amount = movement.amount.map(|a| format!("{:.2}", a)).unwrap_or_default();
        output.push_str(&format!(
            "{:<10} {:<width$} {:>16} {:>16.2}\n",
            movement.date, movement.reference, amount, movement.balance
        ));
    }

    if let Some(totals) = StatementTotals::from_movements(movements) {
        output.push('\n');
        output.push_str(&totals_text(&totals));
    }
    output
}

pub fn totals_text(totals: &StatementTotals) -> String {
    let rule = "=".repeat(40);
    format!(
        "{rule}\nSaldo Inicial     : {:>18.2}\nTotal Movimientos : {:>18.2}\nSaldo Final       : {:>18.2}\n{rule}\n",
        totals.opening_balance, totals.total_movements, totals.closing_balance
    )
}
