//! Session flow tests against the mock scoring service

use tokio_test::{assert_err, assert_ok};

use super::*;
use crate::api::mock::{self, MockService};
use crate::api::ScoringClient;
use crate::config::Config;
use crate::error::{AppError, ValidationError};
use crate::models::{FeatureField, RiskLevel};

async fn setup() -> (MockService, ScoringClient) {
    let service = MockService::default();
    let base = mock::spawn(service.clone()).await;
    let config = Config {
        api_base_url: base,
        api_key: Some("session-key".to_string()),
        ..Config::default()
    };
    let client = ScoringClient::new(config).unwrap();
    (service, client)
}

#[tokio::test]
async fn test_score_records_history() {
    let (_, client) = setup().await;
    let mut session = Session::new();

    session.builder.apply_preset(Preset::Fraud);
    let scored = assert_ok!(session.score(&client).await);
    assert_eq!(scored.outcome.risk_level, RiskLevel::High);

    session.builder.apply_preset(Preset::Legit);
    assert_ok!(session.score(&client).await);

    let ids: Vec<u64> = session.ledger.entries().map(|e| e.id).collect();
    assert_eq!(ids, vec![2, 1]);

    let stats = session.ledger.statistics();
    assert_eq!(stats.count, 2);
    assert_eq!(stats.high_risk_share, 0.5);
    assert!((stats.average_probability - (0.91 + 0.4) / 2.0).abs() < 1e-12);
}

#[tokio::test]
async fn test_invalid_draft_is_not_sent() {
    let (service, client) = setup().await;
    let mut session = Session::new();

    session.builder.set_field(FeatureField::Amount, "");
    let err = assert_err!(session.score(&client).await);

    assert!(matches!(err, AppError::Validation(ValidationError::MissingAmount)));
    assert!(service.last_score_body().is_none());
    assert!(session.ledger.is_empty());
}

#[tokio::test]
async fn test_failed_score_clears_last_result() {
    let (service, client) = setup().await;
    let mut session = Session::new();

    assert_ok!(session.score(&client).await);
    assert!(session.last_result().is_some());

    service.fail_with(500);
    let err = assert_err!(session.score(&client).await);

    assert_eq!(err.user_message(), "API error: 500");
    assert!(session.last_result().is_none());
    assert_eq!(session.ledger.len(), 1);
}

#[tokio::test]
async fn test_explain_uses_scored_vector() {
    let (service, client) = setup().await;
    let mut session = Session::new();

    let err = assert_err!(session.explain(&client).await);
    assert!(matches!(err, AppError::NothingToExplain));

    session.builder.apply_preset(Preset::NightMicroTransfers);
    assert_ok!(session.score(&client).await);

    // Editing after scoring does not change what gets explained
    session.builder.set_field(FeatureField::Amount, "1");

    let text = assert_ok!(session.explain(&client).await).to_string();
    assert!(text.contains("low"));
    assert_eq!(session.explanation(), Some(text.as_str()));

    let body = service.last_explain_body().unwrap();
    assert_eq!(body["transaction"]["amount"], 5000.0);
    assert_eq!(body["risk_level"], "low");
    assert_eq!(
        service.api_keys(),
        vec![Some("session-key".to_string()), Some("session-key".to_string())]
    );
}

#[tokio::test]
async fn test_failed_explain_keeps_last_result() {
    let (service, client) = setup().await;
    let mut session = Session::new();

    assert_ok!(session.score(&client).await);
    service.fail_with(503);

    let err = assert_err!(session.explain(&client).await);
    assert_eq!(err.user_message(), "API error: 503");
    assert!(session.last_result().is_some());
    assert!(session.explanation().is_none());
    assert_eq!(session.ledger.len(), 1);
}

#[tokio::test]
async fn test_new_score_drops_explanation() {
    let (_, client) = setup().await;
    let mut session = Session::new();

    assert_ok!(session.score(&client).await);
    assert_ok!(session.explain(&client).await);
    assert!(session.explanation().is_some());

    assert_ok!(session.score(&client).await);
    assert!(session.explanation().is_none());
}

#[tokio::test]
async fn test_batch_presets_append_in_order() {
    let (_, client) = setup().await;
    let mut session = Session::new();

    let results = assert_ok!(
        session
            .score_presets(&client, &[Preset::Legit, Preset::NewDeviceLargeAmount])
            .await
    );

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].0, Preset::Legit);
    assert_eq!(results[1].1.risk_level, RiskLevel::High);

    let amounts: Vec<f64> = session.ledger.entries().map(|e| e.amount).collect();
    assert_eq!(amounts, vec![500000.0, 15000.0]);
}

#[tokio::test]
async fn test_reset() {
    let (_, client) = setup().await;
    let mut session = Session::new();

    assert_ok!(session.score(&client).await);
    session.reset();

    assert!(session.ledger.is_empty());
    assert!(session.last_result().is_none());
    assert_eq!(session.ledger.statistics().count, 0);
}
