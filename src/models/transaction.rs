//! Transaction feature vector - the scoring request body

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use crate::error::AppError;

// ============================================================================
// FEATURE FIELDS
// ============================================================================

/// Numeric fields of a [`FeatureVector`], in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FeatureField {
    Amount,
    OsVerCnt30d,
    PhoneModelCnt30d,
    LoginSessions7d,
    LoginSessions30d,
    LoginsPerDay7d,
    LoginsPerDay30d,
    LoginFreqChange7dVs30d,
    Logins7dShareOf30d,
    AvgSessionInterval30d,
    StdSessionInterval30d,
    VarSessionInterval30d,
    EwmSessionInterval7d,
    BurstinessSessions,
    FanoFactorSessions,
    ZscoreInterval7dVs30d,
}

impl FeatureField {
    pub const ALL: [FeatureField; 16] = [
        FeatureField::Amount,
        FeatureField::OsVerCnt30d,
        FeatureField::PhoneModelCnt30d,
        FeatureField::LoginSessions7d,
        FeatureField::LoginSessions30d,
        FeatureField::LoginsPerDay7d,
        FeatureField::LoginsPerDay30d,
        FeatureField::LoginFreqChange7dVs30d,
        FeatureField::Logins7dShareOf30d,
        FeatureField::AvgSessionInterval30d,
        FeatureField::StdSessionInterval30d,
        FeatureField::VarSessionInterval30d,
        FeatureField::EwmSessionInterval7d,
        FeatureField::BurstinessSessions,
        FeatureField::FanoFactorSessions,
        FeatureField::ZscoreInterval7dVs30d,
    ];

    /// Wire name, identical to the JSON key
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureField::Amount => "amount",
            FeatureField::OsVerCnt30d => "os_ver_cnt_30d",
            FeatureField::PhoneModelCnt30d => "phone_model_cnt_30d",
            FeatureField::LoginSessions7d => "login_sessions_7d",
            FeatureField::LoginSessions30d => "login_sessions_30d",
            FeatureField::LoginsPerDay7d => "logins_per_day_7d",
            FeatureField::LoginsPerDay30d => "logins_per_day_30d",
            FeatureField::LoginFreqChange7dVs30d => "login_freq_change_7d_vs_30d",
            FeatureField::Logins7dShareOf30d => "logins_7d_share_of_30d",
            FeatureField::AvgSessionInterval30d => "avg_session_interval_30d",
            FeatureField::StdSessionInterval30d => "std_session_interval_30d",
            FeatureField::VarSessionInterval30d => "var_session_interval_30d",
            FeatureField::EwmSessionInterval7d => "ewm_session_interval_7d",
            FeatureField::BurstinessSessions => "burstiness_sessions",
            FeatureField::FanoFactorSessions => "fano_factor_sessions",
            FeatureField::ZscoreInterval7dVs30d => "zscore_interval_7d_vs_30d",
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(self, FeatureField::Amount)
    }
}

impl fmt::Display for FeatureField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FeatureField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FeatureField::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| AppError::UnknownField(s.to_string()))
    }
}

// ============================================================================
// FEATURE VECTOR
// ============================================================================

/// Transaction + customer-behaviour features sent for scoring.
///
/// Every numeric field is `None` or a finite number. `None` is omitted from
/// the JSON body so the service can impute it and flag missingness; it is
/// never sent as `null` or `0`.
///
/// `amount` is modelled as optional too: the draft may lack it, and only
/// [`Validate`] decides whether the vector can be submitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct FeatureVector {
    /// Free-form customer id, used by the service for its audit log
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    #[validate(required, range(min = 0.0))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,

    // Device diversity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_ver_cnt_30d: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_model_cnt_30d: Option<f64>,

    // Login activity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_sessions_7d: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_sessions_30d: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logins_per_day_7d: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logins_per_day_30d: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_freq_change_7d_vs_30d: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logins_7d_share_of_30d: Option<f64>,

    // Session intervals
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_session_interval_30d: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub std_session_interval_30d: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub var_session_interval_30d: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ewm_session_interval_7d: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub burstiness_sessions: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fano_factor_sessions: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zscore_interval_7d_vs_30d: Option<f64>,
}

impl FeatureVector {
    /// Get feature by field
    pub fn get(&self, field: FeatureField) -> Option<f64> {
        match field {
            FeatureField::Amount => self.amount,
            FeatureField::OsVerCnt30d => self.os_ver_cnt_30d,
            FeatureField::PhoneModelCnt30d => self.phone_model_cnt_30d,
            FeatureField::LoginSessions7d => self.login_sessions_7d,
            FeatureField::LoginSessions30d => self.login_sessions_30d,
            FeatureField::LoginsPerDay7d => self.logins_per_day_7d,
            FeatureField::LoginsPerDay30d => self.logins_per_day_30d,
            FeatureField::LoginFreqChange7dVs30d => self.login_freq_change_7d_vs_30d,
            FeatureField::Logins7dShareOf30d => self.logins_7d_share_of_30d,
            FeatureField::AvgSessionInterval30d => self.avg_session_interval_30d,
            FeatureField::StdSessionInterval30d => self.std_session_interval_30d,
            FeatureField::VarSessionInterval30d => self.var_session_interval_30d,
            FeatureField::EwmSessionInterval7d => self.ewm_session_interval_7d,
            FeatureField::BurstinessSessions => self.burstiness_sessions,
            FeatureField::FanoFactorSessions => self.fano_factor_sessions,
            FeatureField::ZscoreInterval7dVs30d => self.zscore_interval_7d_vs_30d,
        }
    }

    /// Presence check, distinguishes "absent" from an explicit 0
    pub fn is_present(&self, field: FeatureField) -> bool {
        self.get(field).is_some()
    }

    /// Copy of this vector with one field replaced
    pub fn with(mut self, field: FeatureField, value: Option<f64>) -> Self {
        *self.slot(field) = value;
        self
    }

    fn slot(&mut self, field: FeatureField) -> &mut Option<f64> {
        match field {
            FeatureField::Amount => &mut self.amount,
            FeatureField::OsVerCnt30d => &mut self.os_ver_cnt_30d,
            FeatureField::PhoneModelCnt30d => &mut self.phone_model_cnt_30d,
            FeatureField::LoginSessions7d => &mut self.login_sessions_7d,
            FeatureField::LoginSessions30d => &mut self.login_sessions_30d,
            FeatureField::LoginsPerDay7d => &mut self.logins_per_day_7d,
            FeatureField::LoginsPerDay30d => &mut self.logins_per_day_30d,
            FeatureField::LoginFreqChange7dVs30d => &mut self.login_freq_change_7d_vs_30d,
            FeatureField::Logins7dShareOf30d => &mut self.logins_7d_share_of_30d,
            FeatureField::AvgSessionInterval30d => &mut self.avg_session_interval_30d,
            FeatureField::StdSessionInterval30d => &mut self.std_session_interval_30d,
            FeatureField::VarSessionInterval30d => &mut self.var_session_interval_30d,
            FeatureField::EwmSessionInterval7d => &mut self.ewm_session_interval_7d,
            FeatureField::BurstinessSessions => &mut self.burstiness_sessions,
            FeatureField::FanoFactorSessions => &mut self.fano_factor_sessions,
            FeatureField::ZscoreInterval7dVs30d => &mut self.zscore_interval_7d_vs_30d,
        }
    }

    /// Present fields, in form order
    pub fn present_fields(&self) -> impl Iterator<Item = (FeatureField, f64)> + '_ {
        FeatureField::ALL
            .iter()
            .filter_map(move |&field| self.get(field).map(|value| (field, value)))
    }
}

// ============================================================================
// BATCH
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchScoringRequest {
    pub items: Vec<FeatureVector>,
}
