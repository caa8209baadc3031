//! Session Ledger - bounded history of scoring round-trips
//!
//! Flow:
//! 1. Every successful score is appended (newest first)
//! 2. Past capacity the oldest entry is evicted
//! 3. Statistics are derived from the full history on each read

use chrono::{DateTime, Local};
use std::collections::VecDeque;

use crate::constants::HISTORY_CAPACITY;
use crate::models::{FeatureVector, RiskLevel, ScoringOutcome};

// ============================================================================
// ENTRY
// ============================================================================

/// Immutable record of one completed score
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    /// Sequence id, strictly increasing within a session
    pub id: u64,
    /// Local wall-clock time of capture, `HH:MM:SS`
    pub timestamp: String,
    pub amount: f64,
    pub os_ver_cnt_30d: Option<f64>,
    pub phone_model_cnt_30d: Option<f64>,
    pub login_sessions_7d: Option<f64>,
    pub login_sessions_30d: Option<f64>,
    pub fraud_probability: f64,
    pub risk_level: RiskLevel,
    pub model_version: String,
}

/// Aggregates over the current history
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SessionStatistics {
    pub count: usize,
    pub average_probability: f64,
    pub high_risk_share: f64,
}

// ============================================================================
// LEDGER
// ============================================================================

#[derive(Debug, Clone)]
pub struct SessionLedger {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl Default for SessionLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionLedger {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    /// At least one entry is always kept
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Record a completed score, stamped with the current local time.
    /// Returns the new entry's id.
    pub fn append(&mut self, snapshot: &FeatureVector, outcome: &ScoringOutcome) -> u64 {
        self.append_at(snapshot, outcome, Local::now())
    }

    /// Record a completed score with an explicit capture time
    pub fn append_at(
        &mut self,
        snapshot: &FeatureVector,
        outcome: &ScoringOutcome,
        captured_at: DateTime<Local>,
    ) -> u64 {
        // Front holds the newest, hence the largest id
        let id = self.entries.front().map(|e| e.id + 1).unwrap_or(1);

        let entry = HistoryEntry {
            id,
            timestamp: captured_at.format("%H:%M:%S").to_string(),
            amount: snapshot.amount.unwrap_or(0.0),
            os_ver_cnt_30d: snapshot.os_ver_cnt_30d,
            phone_model_cnt_30d: snapshot.phone_model_cnt_30d,
            login_sessions_7d: snapshot.login_sessions_7d,
            login_sessions_30d: snapshot.login_sessions_30d,
            fraud_probability: outcome.fraud_probability,
            risk_level: outcome.risk_level.clone(),
            model_version: outcome.model_version.clone(),
        };

        self.entries.push_front(entry);
        if self.entries.len() > self.capacity {
            let evicted = self.entries.len() - self.capacity;
            self.entries.truncate(self.capacity);
            tracing::trace!(evicted, "history over capacity, oldest entries dropped");
        }

        id
    }

    /// Most recent entry
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    /// Count, mean probability and high-tier share over the whole history
    pub fn statistics(&self) -> SessionStatistics {
        let count = self.entries.len();
        if count == 0 {
            return SessionStatistics::default();
        }

        let n = count as f64;
        let probability_sum: f64 = self.entries.iter().map(|e| e.fraud_probability).sum();
        let high_count = self.entries.iter().filter(|e| e.risk_level.is_high()).count();

        SessionStatistics {
            count,
            average_probability: probability_sum / n,
            high_risk_share: high_count as f64 / n,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        tracing::info!("Session history cleared");
    }

    /// Entries, newest first
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================
