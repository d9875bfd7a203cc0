//! Banks command - list the supported statement grammars.

use console::style;

use extracto_core::Bank;

pub fn run() -> anyhow::Result<()> {
    println!(
        "{:<12} {:<20} {:<8} {:<16} {}",
        "Bank", "Aliases", "Locale", "Amounts", "Opening label"
    );

    for bank in Bank::ALL {
        let grammar = bank.grammar();
        let aliases = if bank.aliases().is_empty() {
            "-".to_string()
        } else {
            bank.aliases().join(", ")
        };
        println!(
            "{:<12} {:<20} {:<8} {:<16} {}",
            style(bank.id()).bold(),
            aliases,
            grammar.locale().to_string(),
            grammar.strategy().to_string(),
            grammar.opening_label()
        );
    }

    Ok(())
}
