//! Money token normalization for statement amounts.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::StatementError;
use crate::statement::Result;

/// Numeric conventions of a statement layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    /// `$ 1.234,56`: period thousands, comma decimal, optional currency prefix.
    Arg,
    /// `1,234.56`: comma thousands, period decimal.
    Us,
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::Arg => write!(f, "ARG"),
            Locale::Us => write!(f, "US"),
        }
    }
}

/// Dash glyphs that extraction emits in place of an ASCII minus.
const DASH_GLYPHS: [char; 9] = [
    '\u{2010}', // hyphen
    '\u{2011}', // non-breaking hyphen
    '\u{2012}', // figure dash
    '\u{2013}', // en dash
    '\u{2014}', // em dash
    '\u{2015}', // horizontal bar
    '\u{2212}', // minus sign
    '\u{FE63}', // small hyphen-minus
    '\u{FF0D}', // fullwidth hyphen-minus
];

/// Convert a locale-formatted money token into a signed decimal.
pub fn normalize(raw: &str, locale: Locale) -> Result<Decimal> {
    let malformed = || StatementError::MalformedAmount {
        raw: raw.to_string(),
        locale,
    };

    let mut cleaned = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            c if DASH_GLYPHS.contains(&c) => cleaned.push('-'),
            '$' => {}
            c if c.is_whitespace() => {}
            '.' if locale == Locale::Arg => {}
            ',' if locale == Locale::Arg => cleaned.push('.'),
            ',' if locale == Locale::Us => {}
            c => cleaned.push(c),
        }
    }

    let (negative, digits) = match cleaned.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, cleaned.as_str()),
    };

    let (integer, fraction) = digits.split_once('.').unwrap_or((digits, ""));
    let well_formed = !(integer.is_empty() && fraction.is_empty())
        && integer.chars().all(|c| c.is_ascii_digit())
        && fraction.chars().all(|c| c.is_ascii_digit());
    if !well_formed {
        return Err(malformed());
    }

    let integer = if integer.is_empty() { "0" } else { integer };
    let canonical = if fraction.is_empty() {
        integer.to_string()
    } else {
        format!("{}.{}", integer, fraction)
    };

    let value = Decimal::from_str(&canonical).map_err(|_| malformed())?;
    Ok(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_arg_amounts() {
        assert_eq!(normalize("$ 1.234,56", Locale::Arg).unwrap(), dec("1234.56"));
        assert_eq!(normalize("-$ 70.833,71", Locale::Arg).unwrap(), dec("-70833.71"));
        assert_eq!(normalize("$1.000.000,00", Locale::Arg).unwrap(), dec("1000000.00"));
        assert_eq!(normalize("$ 0,50", Locale::Arg).unwrap(), dec("0.50"));
    }

    #[test]
    fn test_us_amounts() {
        assert_eq!(normalize("1,234.56", Locale::Us).unwrap(), dec("1234.56"));
        assert_eq!(normalize("12,345,678.90", Locale::Us).unwrap(), dec("12345678.90"));
        assert_eq!(normalize(".75", Locale::Us).unwrap(), dec("0.75"));
    }

    #[test]
    fn test_dash_glyphs_become_minus() {
        assert_eq!(normalize("\u{2013}$ 10,00", Locale::Arg).unwrap(), dec("-10.00"));
        assert_eq!(normalize("\u{2212}1,000.00", Locale::Us).unwrap(), dec("-1000.00"));
        assert_eq!(normalize("\u{2014} $ 3,5", Locale::Arg).unwrap(), dec("-3.5"));
    }

    #[test]
    fn test_malformed_amounts() {
        for raw in ["", "$", "-", "--5", "abc", "1,2,3"] {
            let err = normalize(raw, Locale::Arg).unwrap_err();
            assert_eq!(
                err,
                StatementError::MalformedAmount {
                    raw: raw.to_string(),
                    locale: Locale::Arg
                }
            );
        }
        assert!(normalize("1.234.56", Locale::Us).is_err());
        assert!(normalize("12a.00", Locale::Us).is_err());
    }
}
