//! Outer surfaces: the scoring service client and the console commands

pub mod client;
pub mod commands;

#[cfg(test)]
pub(crate) mod mock;

pub use client::ScoringClient;
pub use commands::{error_line, execute, Command, Flow};
