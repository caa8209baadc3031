//! Data models

pub mod scoring;
pub mod transaction;

pub use scoring::*;
pub use transaction::*;
