//! Console session
//!
//! Ties the builder, the ledger and the scoring client together. One command
//! runs to completion before the next is read, so at most one request is in
//! flight.

use super::builder::RequestBuilder;
use super::ledger::SessionLedger;
use super::presets::Preset;
use crate::api::ScoringClient;
use crate::error::{AppError, AppResult};
use crate::models::{ExplainRequest, FeatureVector, ScoringOutcome};

/// Last successful score and the vector it was computed for
#[derive(Debug, Clone)]
pub struct ScoredTransaction {
    pub vector: FeatureVector,
    pub outcome: ScoringOutcome,
}

#[derive(Debug, Default)]
pub struct Session {
    pub builder: RequestBuilder,
    pub ledger: SessionLedger,
    last: Option<ScoredTransaction>,
    explanation: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            builder: RequestBuilder::with_initial_form(),
            ..Default::default()
        }
    }

    pub fn last_result(&self) -> Option<&ScoredTransaction> {
        self.last.as_ref()
    }

    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    /// Validate the draft, score it and record the round-trip.
    ///
    /// Any failure clears the previous result; nothing is retried.
    pub async fn score(&mut self, client: &ScoringClient) -> AppResult<&ScoredTransaction> {
        self.explanation = None;

        let vector = match self.builder.validate() {
            Ok(vector) => vector.clone(),
            Err(e) => {
                self.last = None;
                return Err(e.into());
            }
        };

        let outcome = match client.score(&vector).await {
            Ok(outcome) => outcome,
            Err(e) => {
                self.last = None;
                return Err(e.into());
            }
        };

        let id = self.ledger.append(&vector, &outcome);
        tracing::debug!(id, "history entry recorded");

        Ok(&*self.last.insert(ScoredTransaction { vector, outcome }))
    }

    /// Score preset vectors in one batch call and record each result in order
    pub async fn score_presets(
        &mut self,
        client: &ScoringClient,
        presets: &[Preset],
    ) -> AppResult<Vec<(Preset, ScoringOutcome)>> {
        let vectors: Vec<FeatureVector> = presets.iter().map(Preset::vector).collect();
        let outcomes = client.score_batch(vectors.clone()).await?;

        if outcomes.len() != vectors.len() {
            tracing::warn!(
                sent = vectors.len(),
                received = outcomes.len(),
                "batch result count mismatch"
            );
        }

        for (vector, outcome) in vectors.iter().zip(&outcomes) {
            self.ledger.append(vector, outcome);
        }

        Ok(presets.iter().copied().zip(outcomes).collect())
    }

    /// Ask for an explanation of the last score
    pub async fn explain(&mut self, client: &ScoringClient) -> AppResult<&str> {
        let last = self.last.as_ref().ok_or(AppError::NothingToExplain)?;

        let request = ExplainRequest::new(last.vector.clone(), &last.outcome);
        let response = client.explain(&request).await?;

        Ok(self.explanation.insert(response.explanation).as_str())
    }

    /// Drop the history and the last result
    pub fn reset(&mut self) {
        self.ledger.clear();
        self.last = None;
        self.explanation = None;
    }
}
