//! Scoring API Client
//!
//! HTTP client for the transaction scoring service.

use reqwest::RequestBuilder as HttpRequest;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::Config;
use crate::constants::API_KEY_HEADER;
use crate::error::ApiError;
use crate::models::{
    BatchScoringRequest, BatchScoringResponse, ExplainRequest, ExplainResponse, FeatureVector,
    HealthResponse, ScoringOutcome,
};

/// Scoring API client
#[derive(Debug, Clone)]
pub struct ScoringClient {
    config: Config,
    http_client: reqwest::Client,
}

impl ScoringClient {
    /// Create new scoring client
    pub fn new(config: Config) -> Result<Self, ApiError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| ApiError::ClientBuild(e.to_string()))?;

        Ok(Self { config, http_client })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Attach the API key, when configured. Applied to every call.
    fn authorize(&self, request: HttpRequest) -> HttpRequest {
        match &self.config.api_key {
            Some(key) => request.header(API_KEY_HEADER, key),
            None => request,
        }
    }

    /// Send, then decode a success body. Any other status is an error
    /// carrying only the code.
    async fn send<T: DeserializeOwned>(
        &self,
        request: HttpRequest,
        url: &str,
    ) -> Result<T, ApiError> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(%url, error = %e, "request failed");
                ApiError::Network(e.to_string())
            })?;

        let status = response.status();
        if status.is_success() {
            response.json().await.map_err(|e| {
                tracing::warn!(%url, error = %e, "undecodable response body");
                ApiError::Parse(e.to_string())
            })
        } else {
            tracing::warn!(%url, status = status.as_u16(), "scoring service rejected request");
            Err(ApiError::Status(status.as_u16()))
        }
    }

    /// Check service health
    pub async fn health_check(&self) -> Result<HealthResponse, ApiError> {
        let url = self.config.health_url();
        self.send(self.http_client.get(&url), &url).await
    }

    /// Score one transaction
    pub async fn score(&self, vector: &FeatureVector) -> Result<ScoringOutcome, ApiError> {
        let url = self.config.score_url();
        tracing::debug!(%url, amount = ?vector.amount, "scoring transaction");

        let outcome: ScoringOutcome =
            self.send(self.http_client.post(&url).json(vector), &url).await?;

        tracing::info!(
            probability = outcome.fraud_probability,
            risk_level = %outcome.risk_level,
            model = %outcome.model_version,
            "transaction scored"
        );
        Ok(outcome)
    }

    /// Score several transactions in one call; results keep request order
    pub async fn score_batch(
        &self,
        items: Vec<FeatureVector>,
    ) -> Result<Vec<ScoringOutcome>, ApiError> {
        let url = self.config.score_batch_url();
        tracing::debug!(%url, count = items.len(), "scoring batch");

        let request = BatchScoringRequest { items };
        let response: BatchScoringResponse =
            self.send(self.http_client.post(&url).json(&request), &url).await?;

        Ok(response.results)
    }

    /// Ask the service to explain an already computed score
    pub async fn explain(&self, request: &ExplainRequest) -> Result<ExplainResponse, ApiError> {
        let url = self.config.explain_url();
        tracing::debug!(%url, risk_level = %request.risk_level, "requesting explanation");

        self.send(self.http_client.post(&url).json(request), &url).await
    }
}
