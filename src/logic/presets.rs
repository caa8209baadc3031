//! Scenario presets
//!
//! Hand-authored feature vectors, one per behavioural archetype. Each preset
//! is a constant: building it twice yields bitwise-identical vectors.

use std::fmt;
use std::str::FromStr;

use crate::error::AppError;
use crate::models::FeatureVector;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// Regular customer, familiar device, steady logins
    Legit,
    /// Many devices, login burst, large transfer
    Fraud,
    /// Second device appears together with a very large amount
    NewDeviceLargeAmount,
    /// Series of small transfers with bursty night-time sessions
    NightMicroTransfers,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::Legit,
        Preset::Fraud,
        Preset::NewDeviceLargeAmount,
        Preset::NightMicroTransfers,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Legit => "legit",
            Preset::Fraud => "fraud",
            Preset::NewDeviceLargeAmount => "new-device-large-amount",
            Preset::NightMicroTransfers => "night-micro-transfers",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Preset::Legit => "regular customer",
            Preset::Fraud => "potential fraud",
            Preset::NewDeviceLargeAmount => "new device + large amount",
            Preset::NightMicroTransfers => "series of small transfers at night",
        }
    }

    pub fn vector(&self) -> FeatureVector {
        match self {
            Preset::Legit => FeatureVector {
                amount: Some(15000.0),
                os_ver_cnt_30d: Some(1.0),
                phone_model_cnt_30d: Some(1.0),
                login_sessions_7d: Some(12.0),
                login_sessions_30d: Some(50.0),
                logins_per_day_7d: Some(12.0 / 7.0),
                logins_per_day_30d: Some(50.0 / 30.0),
                login_freq_change_7d_vs_30d: Some(0.1),
                logins_7d_share_of_30d: Some(12.0 / 50.0),
                ..Default::default()
            },
            Preset::Fraud => FeatureVector {
                amount: Some(300000.0),
                os_ver_cnt_30d: Some(3.0),
                phone_model_cnt_30d: Some(3.0),
                login_sessions_7d: Some(50.0),
                login_sessions_30d: Some(60.0),
                logins_per_day_7d: Some(50.0 / 7.0),
                logins_per_day_30d: Some(60.0 / 30.0),
                login_freq_change_7d_vs_30d: Some(1.5),
                logins_7d_share_of_30d: Some(50.0 / 60.0),
                avg_session_interval_30d: Some(60.0),
                std_session_interval_30d: Some(5.0),
                var_session_interval_30d: Some(25.0),
                ewm_session_interval_7d: Some(30.0),
                burstiness_sessions: Some(0.8),
                fano_factor_sessions: Some(2.0),
                zscore_interval_7d_vs_30d: Some(-2.0),
                ..Default::default()
            },
            Preset::NewDeviceLargeAmount => FeatureVector {
                amount: Some(500000.0),
                os_ver_cnt_30d: Some(2.0),
                phone_model_cnt_30d: Some(2.0),
                login_sessions_7d: Some(5.0),
                login_sessions_30d: Some(20.0),
                logins_per_day_7d: Some(5.0 / 7.0),
                logins_per_day_30d: Some(20.0 / 30.0),
                login_freq_change_7d_vs_30d: Some(-0.3),
                logins_7d_share_of_30d: Some(5.0 / 20.0),
                ..Default::default()
            },
            Preset::NightMicroTransfers => FeatureVector {
                amount: Some(5000.0),
                os_ver_cnt_30d: Some(1.0),
                phone_model_cnt_30d: Some(1.0),
                login_sessions_7d: Some(40.0),
                login_sessions_30d: Some(60.0),
                logins_per_day_7d: Some(40.0 / 7.0),
                logins_per_day_30d: Some(60.0 / 30.0),
                login_freq_change_7d_vs_30d: Some(0.9),
                logins_7d_share_of_30d: Some(40.0 / 60.0),
                avg_session_interval_30d: Some(120.0),
                std_session_interval_30d: Some(90.0),
                var_session_interval_30d: Some(90.0 * 90.0),
                ewm_session_interval_7d: Some(45.0),
                burstiness_sessions: Some(0.7),
                fano_factor_sessions: Some(1.5),
                zscore_interval_7d_vs_30d: Some(-1.5),
                ..Default::default()
            },
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Preset {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .iter()
            .copied()
            .find(|preset| preset.as_str() == s)
            .ok_or_else(|| AppError::UnknownPreset(s.to_string()))
    }
}
