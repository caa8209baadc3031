//! Anti-Fraud Console
//!
//! Terminal client for a transaction fraud-scoring service.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     ANTI-FRAUD CONSOLE                       │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌──────────────┐   ┌──────────────┐   ┌──────────────────┐  │
//! │  │ Request      │──▶│ Scoring      │──▶│ Session          │  │
//! │  │ Builder      │   │ Client       │   │ Ledger           │  │
//! │  │ (+ presets)  │   │ (reqwest)    │   │ (last 20, stats) │  │
//! │  └──────────────┘   └──────┬───────┘   └──────────────────┘  │
//! │                            ▼                                 │
//! │                   ┌─────────────────┐                        │
//! │                   │ Scoring service │                        │
//! │                   └─────────────────┘                        │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod logic;
pub mod models;

pub use error::{ApiError, AppError, AppResult, ValidationError};
