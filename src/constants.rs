//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! To change the default scoring service, only edit this file.

/// Default scoring service URL
///
/// This is the fallback URL when no environment variable is set.
/// For development: http://localhost:8000
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Default API path prefix
pub const DEFAULT_API_PREFIX: &str = "/api/v1";

/// Default HTTP timeout (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Lower probability bound of the medium tier, as configured on the service
pub const DEFAULT_RISK_THRESHOLD_MEDIUM: f64 = 0.26;

/// Lower probability bound of the high tier
pub const DEFAULT_RISK_THRESHOLD_HIGH: f64 = 0.80;

/// Maximum number of entries kept in the session history
pub const HISTORY_CAPACITY: usize = 20;

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "X-API-Key";

// Endpoint paths, relative to base URL + prefix
pub const SCORE_PATH: &str = "/score_transaction";
pub const SCORE_BATCH_PATH: &str = "/score_batch";
pub const EXPLAIN_PATH: &str = "/explain_transaction";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Anti-Fraud Console";
