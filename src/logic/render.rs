//! Text rendering of outcomes, statistics and history
//!
//! Pure functions returning `String`; nothing here prints.

use std::fmt::Write;

use super::ledger::{HistoryEntry, SessionStatistics};
use crate::config::RiskThresholds;
use crate::models::{FeatureVector, RiskLevel, ScoringOutcome};

/// Width of the risk gauge bar, in characters
pub const GAUGE_WIDTH: usize = 30;

const ABSENT: &str = "–";

/// Probability as a percentage, clamped to [0, 100]
pub fn percent(probability: f64, decimals: usize) -> String {
    let p = if probability.is_nan() {
        0.0
    } else {
        probability.clamp(0.0, 1.0)
    };
    format!("{:.*}%", decimals, p * 100.0)
}

pub fn badge(level: &RiskLevel) -> String {
    match level {
        RiskLevel::Low => "Low risk".to_string(),
        RiskLevel::Medium => "Medium risk".to_string(),
        RiskLevel::High => "High risk".to_string(),
        RiskLevel::Unrecognized(raw) => format!("Unrecognized risk tier ({})", raw),
    }
}

/// Recommended handling for a tier
pub fn interpretation(level: &RiskLevel) -> &'static [&'static str] {
    match level {
        RiskLevel::Low => &[
            "Transaction parameters and customer behaviour look usual.",
            "The transfer can pass without additional checks.",
        ],
        RiskLevel::Medium => &[
            "Unusual activity patterns or amount.",
            "A soft check is advised: push/SMS confirmation.",
        ],
        RiskLevel::High => &[
            "Strong deviation from the customer's usual behaviour.",
            "Block, or route to manual review by the security team.",
        ],
        RiskLevel::Unrecognized(_) => &[],
    }
}

/// Three equal zones (low | medium | high) with a marker at the probability
pub fn gauge(probability: f64, width: usize) -> String {
    let width = width.max(3);
    let p = if probability.is_nan() {
        0.0
    } else {
        probability.clamp(0.0, 1.0)
    };
    let marker = ((p * width as f64).round() as usize).min(width - 1);

    let zone = width / 3;
    let bar: String = (0..width)
        .map(|i| {
            if i == marker {
                '|'
            } else if i < zone {
                '.'
            } else if i < 2 * zone {
                '~'
            } else {
                '#'
            }
        })
        .collect();

    let (left, mid, right) = ("0%", "50%", "100%");
    let gap = width.saturating_sub(left.len() + mid.len() + right.len());
    let scale = format!(
        "{}{}{}{}{}",
        left,
        " ".repeat(gap / 2),
        mid,
        " ".repeat(gap - gap / 2),
        right
    );

    format!("[{}]\n {}", bar, scale)
}

pub fn outcome(outcome: &ScoringOutcome) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}  (model: {})", badge(&outcome.risk_level), outcome.model_version);
    let _ = writeln!(out, "{}", percent(outcome.fraud_probability, 2));
    let _ = writeln!(out, "Probability of fraud for this transaction");
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", gauge(outcome.fraud_probability, GAUGE_WIDTH));

    let notes = interpretation(&outcome.risk_level);
    if !notes.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Interpretation:");
        for note in notes {
            let _ = writeln!(out, "  - {}", note);
        }
    }
    out
}

pub fn explanation(text: &str) -> String {
    format!("AI explanation:\n{}\n", text.trim_end())
}

pub fn statistics(stats: &SessionStatistics) -> String {
    format!(
        "Checked: {}   Average risk: {}   HIGH share: {}\n",
        stats.count,
        percent(stats.average_probability, 1),
        percent(stats.high_risk_share, 1),
    )
}

fn optional(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| ABSENT.to_string())
}

/// Session history table, newest first
pub fn history<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = &'a HistoryEntry>,
{
    let mut rows = entries.into_iter().peekable();
    if rows.peek().is_none() {
        return "History appears after the first checks.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>4}  {:<8}  {:>10}  {:>6}  {:>9}  {:>7}  {}",
        "#", "Time", "Amount", "OS 30d", "Logins 7d", "Risk%", "Level"
    );
    for entry in rows {
        let _ = writeln!(
            out,
            "{:>4}  {:<8}  {:>10}  {:>6}  {:>9}  {:>7}  {}",
            entry.id,
            entry.timestamp,
            entry.amount.round(),
            optional(entry.os_ver_cnt_30d),
            optional(entry.login_sessions_7d),
            percent(entry.fraud_probability, 1),
            entry.risk_level,
        );
    }
    out
}

/// Decision scenarios per tier
pub fn legend(thresholds: &RiskThresholds) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Risk decision scenarios");
    let _ = writeln!(
        out,
        "  low     p < {:.2}           auto-approve",
        thresholds.medium
    );
    let _ = writeln!(
        out,
        "  medium  {:.2} <= p < {:.2}   step-up confirmation (push/SMS)",
        thresholds.medium, thresholds.high
    );
    let _ = writeln!(
        out,
        "  high    p >= {:.2}          block or manual review",
        thresholds.high
    );
    out
}

/// Current draft, one field per line, absent fields shown as "–"
pub fn vector(vector: &FeatureVector) -> String {
    let mut out = String::new();
    if let Some(client_id) = &vector.client_id {
        let _ = writeln!(out, "  {:<28} {}", "client_id", client_id);
    }
    for field in crate::models::FeatureField::ALL {
        let marker = if field.is_required() { "*" } else { " " };
        let _ = writeln!(
            out,
            "{} {:<28} {}",
            marker,
            field.as_str(),
            optional(vector.get(field))
        );
    }
    out
}
