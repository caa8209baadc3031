//! Error handling

use thiserror::Error;

use crate::models::FeatureField;

pub type AppResult<T> = Result<T, AppError>;

/// Fallback message when an error carries no text of its own
pub const UNEXPECTED_ERROR: &str = "Unexpected error";

/// Scoring service errors
///
/// Every variant is terminal for the attempt; there is no retry.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(String),

    #[error("Network error: {0}")]
    Network(String),

    /// Non-success status. The response body is not inspected.
    #[error("API error: {0}")]
    Status(u16),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Submission-time validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("amount is required")]
    MissingAmount,

    #[error("amount must be a non-negative number, got {0}")]
    NegativeAmount(f64),

    #[error("{field}: '{raw}' is not a number")]
    Malformed { field: FeatureField, raw: String },
}

/// Console-level errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("invalid transaction: {0}")]
    Validation(#[from] ValidationError),

    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("unknown preset '{0}'")]
    UnknownPreset(String),

    #[error("unknown command '{0}' (type 'help')")]
    UnknownCommand(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("nothing to explain yet, run 'score' first")]
    NothingToExplain,
}

impl AppError {
    /// Message shown to the user, never empty
    pub fn user_message(&self) -> String {
        match self {
            AppError::Api(ApiError::Network(detail) | ApiError::Parse(detail))
                if detail.trim().is_empty() =>
            {
                UNEXPECTED_ERROR.to_string()
            }
            other => other.to_string(),
        }
    }
}
