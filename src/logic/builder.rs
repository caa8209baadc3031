//! Request Builder
//!
//! Turns raw, field-by-field user input into a [`FeatureVector`].
//!
//! Edits go through [`apply_edit`], a pure reducer: it never mutates the
//! input vector and never fails. Text that does not parse leaves the field
//! absent; the builder remembers it so that [`RequestBuilder::validate`]
//! can block submission.

use std::collections::BTreeMap;
use validator::Validate;

use super::presets::Preset;
use crate::error::ValidationError;
use crate::models::{FeatureField, FeatureVector};

/// Result of parsing one raw input
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedInput {
    /// Empty input: the field is removed
    Absent,
    Value(f64),
    /// Not a finite decimal number
    Malformed,
}

/// Parse raw field text. Whitespace-only counts as empty.
pub fn parse_input(raw: &str) -> ParsedInput {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return ParsedInput::Absent;
    }

    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => ParsedInput::Value(value),
        _ => ParsedInput::Malformed,
    }
}

/// Pure edit: `vector` with `field` set from `raw`.
///
/// Empty and malformed input both yield an absent field; callers that need
/// to tell them apart use [`parse_input`].
pub fn apply_edit(vector: &FeatureVector, field: FeatureField, raw: &str) -> FeatureVector {
    let value = match parse_input(raw) {
        ParsedInput::Value(value) => Some(value),
        ParsedInput::Absent | ParsedInput::Malformed => None,
    };
    vector.clone().with(field, value)
}

/// Holds the vector currently being edited
#[derive(Debug, Clone, Default)]
pub struct RequestBuilder {
    vector: FeatureVector,
    /// Raw text of edits that did not parse, keyed by field
    rejected: BTreeMap<FeatureField, String>,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vector(vector: FeatureVector) -> Self {
        Self {
            vector,
            rejected: BTreeMap::new(),
        }
    }

    /// Vector shown when the console starts
    pub fn with_initial_form() -> Self {
        Self::from_vector(FeatureVector {
            amount: Some(10000.0),
            os_ver_cnt_30d: Some(1.0),
            phone_model_cnt_30d: Some(1.0),
            login_sessions_7d: Some(10.0),
            login_sessions_30d: Some(40.0),
            ..Default::default()
        })
    }

    /// Set one field from raw text. Never fails.
    pub fn set_field(&mut self, field: FeatureField, raw: &str) {
        if parse_input(raw) == ParsedInput::Malformed {
            tracing::debug!(%field, raw, "malformed input, field left absent");
            self.rejected.insert(field, raw.trim().to_string());
        } else {
            self.rejected.remove(&field);
        }
        self.vector = apply_edit(&self.vector, field, raw);
    }

    pub fn set_client_id(&mut self, client_id: Option<&str>) {
        self.vector.client_id = client_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string);
    }

    /// Replace the whole vector with a preset. Pending malformed edits are dropped.
    pub fn apply_preset(&mut self, preset: Preset) {
        self.vector = preset.vector();
        self.rejected.clear();
    }

    pub fn current_vector(&self) -> &FeatureVector {
        &self.vector
    }

    pub fn rejected_inputs(&self) -> impl Iterator<Item = (FeatureField, &str)> {
        self.rejected.iter().map(|(field, raw)| (*field, raw.as_str()))
    }

    /// Required-field check run before submission.
    ///
    /// Only the `amount` constraint and unparsed input block submission; the
    /// service stays the authority on everything else.
    pub fn validate(&self) -> Result<&FeatureVector, ValidationError> {
        if let Some((field, raw)) = self.rejected.iter().next() {
            return Err(ValidationError::Malformed {
                field: *field,
                raw: raw.clone(),
            });
        }

        if self.vector.validate().is_err() {
            return Err(match self.vector.amount {
                Some(amount) => ValidationError::NegativeAmount(amount),
                None => ValidationError::MissingAmount,
            });
        }

        Ok(&self.vector)
    }
}
