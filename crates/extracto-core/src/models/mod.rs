//! Data models shared by the engine and its consumers.

pub mod config;
pub mod movement;
