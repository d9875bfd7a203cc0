//! Subcommand implementations.

pub mod banks;
pub mod batch;
pub mod config;
pub mod process;
