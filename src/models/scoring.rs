//! Scoring service responses

use serde::{Deserialize, Serialize};
use std::fmt;

use super::transaction::FeatureVector;

// ============================================================================
// RISK LEVEL
// ============================================================================

/// Risk tier assigned by the service.
///
/// The service contract is {low, medium, high}; anything else decodes to
/// `Unrecognized` and keeps the raw text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Unrecognized(String),
}

impl RiskLevel {
    pub fn as_str(&self) -> &str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Unrecognized(raw) => raw.as_str(),
        }
    }

    pub fn is_high(&self) -> bool {
        matches!(self, RiskLevel::High)
    }
}

impl From<String> for RiskLevel {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "low" => RiskLevel::Low,
            "medium" => RiskLevel::Medium,
            "high" => RiskLevel::High,
            _ => RiskLevel::Unrecognized(raw),
        }
    }
}

impl From<&str> for RiskLevel {
    fn from(raw: &str) -> Self {
        RiskLevel::from(raw.to_string())
    }
}

impl From<RiskLevel> for String {
    fn from(level: RiskLevel) -> Self {
        match level {
            RiskLevel::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// SCORING / EXPLAIN PAYLOADS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringOutcome {
    /// Nominally in [0, 1]; not trusted, renderers clamp
    pub fraud_probability: f64,
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub model_version: String,
}

#[derive(Debug, Deserialize)]
pub struct BatchScoringResponse {
    pub results: Vec<ScoringOutcome>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExplainRequest {
    pub transaction: FeatureVector,
    pub fraud_probability: f64,
    pub risk_level: RiskLevel,
}

impl ExplainRequest {
    pub fn new(transaction: FeatureVector, outcome: &ScoringOutcome) -> Self {
        Self {
            transaction,
            fraud_probability: outcome.fraud_probability,
            risk_level: outcome.risk_level.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExplainResponse {
    pub fraud_probability: f64,
    pub risk_level: RiskLevel,
    pub explanation: String,
}

#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_tier_does_not_fail_decoding() {
        let outcome: ScoringOutcome = serde_json::from_str(
            r#"{"fraud_probability": 0.42, "risk_level": "elevated", "model_version": "xgb_v0"}"#,
        )
        .unwrap();

        assert_eq!(outcome.risk_level, RiskLevel::Unrecognized("elevated".into()));
        assert_eq!(outcome.risk_level.to_string(), "elevated");
    }

    #[test]
    fn test_known_tiers_serialize_as_strings() {
        let request = ExplainRequest {
            transaction: FeatureVector::default(),
            fraud_probability: 0.9,
            risk_level: RiskLevel::High,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["risk_level"], "high");
        assert_eq!(json["transaction"], serde_json::json!({}));
    }

    #[test]
    fn test_missing_model_version_defaults_to_empty() {
        let outcome: ScoringOutcome =
            serde_json::from_str(r#"{"fraud_probability": 0.1, "risk_level": "low"}"#).unwrap();
        assert_eq!(outcome.risk_level, RiskLevel::Low);
        assert!(outcome.model_version.is_empty());
    }
}
