//! Console logic
//!
//! This module handles:
//! - Building the scoring request from raw input and presets
//! - The bounded session history and its statistics
//! - Text rendering
//! - The session that drives scoring round-trips

pub mod builder;
pub mod ledger;
pub mod presets;
pub mod render;
pub mod session;

pub use builder::{apply_edit, parse_input, ParsedInput, RequestBuilder};
pub use ledger::{HistoryEntry, SessionLedger, SessionStatistics};
pub use presets::Preset;
pub use session::{ScoredTransaction, Session};

#[cfg(test)]
mod tests;
