use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::numeric::{age_days, clamp_score, saturate};
use crate::Ad;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LongevityConfig {
    /// Age in days at which the score reaches ~63.
    pub scale_days: f64,
}

impl Default for LongevityConfig {
    fn default() -> Self {
        Self { scale_days: 30.0 }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LongevityScorer {
    config: LongevityConfig,
}

impl LongevityScorer {
    pub fn new(config: LongevityConfig) -> Self {
        Self { config }
    }

    /// Driven by the oldest ad; ads without `first_seen` count as age zero.
    pub fn score(&self, ads: &[Ad], now: DateTime<Utc>) -> f64 {
        let oldest = ads
            .iter()
            .map(|ad| age_days(ad.first_seen, now))
            .fold(0.0_f64, f64::max);
        self.score_for_age(oldest)
    }

    pub fn score_for_age(&self, days: f64) -> f64 {
        clamp_score(100.0 * saturate(days, self.config.scale_days))
    }
}
