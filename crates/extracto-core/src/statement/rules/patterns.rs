//! Regex patterns for the supported statement layouts.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Santander: "$ 1.234,56" money tokens, dd/mm/yy dates, optional voucher number.
    pub static ref SANTANDER_OPENING_BALANCE: Regex = Regex::new(
        r"Saldo\s+Inicial\s+(-?\$\s*[\d.,]+)"
    ).unwrap();

    pub static ref SANTANDER_DATED_MOVEMENT: Regex = Regex::new(concat!(
        r"^(?P<date>\d{2}/\d{2}/\d{2})\s*",
        r"(?:\d+\s+)?",
        r"(?P<reference>.*?)\s+",
        r"(?P<debit>-?\$\s*[\d.,]+)\s+",
        r"(?P<balance>-?\$\s*[\d.,]+)$"
    )).unwrap();

    pub static ref SANTANDER_UNDATED_MOVEMENT: Regex = Regex::new(concat!(
        r"^(?:\d+\s+)?",
        r"(?P<reference>.*?)\s+",
        r"(?P<debit>-?\$\s*[\d.,]+)\s+",
        r"(?P<balance>-?\$\s*[\d.,]+)$"
    )).unwrap();

    pub static ref SANTANDER_TRANSFER_DETAIL: Regex = Regex::new(
        r"(?i)^(?:De|A)(?:\s+[A-Za-zÁÉÍÓÚÑáéíóúñ\s,.]+)?\s*/\s*(?:transf|varios)\s*-\s*var\s*/.*$"
    ).unwrap();

    // HSBC: "1,234.56" money tokens, dd-MMM dates behind a " - " marker, 5-digit voucher.
    pub static ref HSBC_OPENING_BALANCE: Regex = Regex::new(
        r"(?i)SALDO\s+ANTERIOR.*?((?:\d{1,3}(?:,\d{3})*|\d*)\.\d{2})$"
    ).unwrap();

    pub static ref HSBC_DATED_MOVEMENT: Regex = Regex::new(concat!(
        r"^(?P<date>\d{2}-[A-Z]{3})\s+-\s+",
        r"(?P<reference>.+?)\s+",
        r"\d{5}\s+",
        r"(?P<debit>(?:\d{1,3}(?:,\d{3})*|\d*)?\.\d{2})?\s*",
        r"(?P<credit>(?:\d{1,3}(?:,\d{3})*|\d*)?\.\d{2})?\s+",
        r"(?P<balance>(?:\d{1,3}(?:,\d{3})*|\d*)?\.\d{2})"
    )).unwrap();

    pub static ref HSBC_UNDATED_MOVEMENT: Regex = Regex::new(concat!(
        r"^\s*-\s+",
        r"(?P<reference>.+?)\s+",
        r"\d{5}\s+",
        r"(?P<debit>(?:\d{1,3}(?:,\d{3})*|\d*)?\.\d{2})?\s*",
        r"(?P<credit>(?:\d{1,3}(?:,\d{3})*|\d*)?\.\d{2})?\s+",
        r"(?P<balance>(?:\d{1,3}(?:,\d{3})*|\d*)?\.\d{2})"
    )).unwrap();
}
