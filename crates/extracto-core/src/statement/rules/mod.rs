//! Rule-based line grammars and money normalization.

pub mod hsbc;
pub mod money;
pub mod patterns;
pub mod santander;

pub use hsbc::HsbcGrammar;
pub use money::{normalize, Locale};
pub use santander::SantanderGrammar;
