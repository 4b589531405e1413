//! Competitor change detection.
//!
//! Compares two consecutive snapshots of one competitor's active ad set and
//! emits typed, severity-tagged events. Each check runs independently, so a
//! single snapshot pair can yield several events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::{Competitor, CompetitorSnapshot, SnapshotAd};

/// Minimum run length for a disappeared ad to count as a stopped winner.
pub const WINNER_RUN_DAYS: u32 = 30;
/// New-ad count from which a campaign launch is `high` significance.
pub const NEW_CAMPAIGN_HIGH_COUNT: usize = 6;
/// Active-ad increase (percent) that must be exceeded before a spike fires.
pub const AD_SPIKE_MIN_PERCENT: f64 = 50.0;
/// Active-ad increase (percent) at which a spike is `high` significance.
pub const AD_SPIKE_HIGH_PERCENT: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    NewCampaign,
    CampaignEnded,
    AdSpike,
    // Reserved for detectors that are not implemented yet; never emitted.
    CreativeShift,
    MessagingChange,
    PricingChange,
    NewFeature,
}

impl ChangeType {
    pub fn label(self) -> &'static str {
        match self {
            ChangeType::NewCampaign => "new_campaign",
            ChangeType::CampaignEnded => "campaign_ended",
            ChangeType::AdSpike => "ad_spike",
            ChangeType::CreativeShift => "creative_shift",
            ChangeType::MessagingChange => "messaging_change",
            ChangeType::PricingChange => "pricing_change",
            ChangeType::NewFeature => "new_feature",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Significance {
    Low,
    Medium,
    High,
}

impl Significance {
    pub fn label(self) -> &'static str {
        match self {
            Significance::Low => "low",
            Significance::Medium => "medium",
            Significance::High => "high",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChangeData {
    NewCampaign {
        count: usize,
        ad_ids: Vec<String>,
    },
    CampaignEnded {
        ads: Vec<SnapshotAd>,
    },
    AdSpike {
        percent_change: f64,
        previous_count: u64,
        current_count: u64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeEvent {
    #[serde(rename = "type")]
    pub change_type: ChangeType,
    pub competitor_id: String,
    pub detected_at: DateTime<Utc>,
    pub significance: Significance,
    pub data: ChangeData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangeDetectionConfig {
    pub winner_run_days: u32,
    pub new_campaign_high_count: usize,
    pub spike_min_percent: f64,
    pub spike_high_percent: f64,
}

impl Default for ChangeDetectionConfig {
    fn default() -> Self {
        Self {
            winner_run_days: WINNER_RUN_DAYS,
            new_campaign_high_count: NEW_CAMPAIGN_HIGH_COUNT,
            spike_min_percent: AD_SPIKE_MIN_PERCENT,
            spike_high_percent: AD_SPIKE_HIGH_PERCENT,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChangeDetector {
    config: ChangeDetectionConfig,
}

impl ChangeDetector {
    pub fn new(config: ChangeDetectionConfig) -> Self {
        Self { config }
    }

    pub fn detect(
        &self,
        competitor: &Competitor,
        previous: &CompetitorSnapshot,
        current: &CompetitorSnapshot,
        now: DateTime<Utc>,
    ) -> Vec<ChangeEvent> {
        if previous.competitor_id != competitor.id || current.competitor_id != competitor.id {
            tracing::warn!(
                competitor = %competitor.id,
                previous = %previous.competitor_id,
                current = %current.competitor_id,
                "comparing snapshots recorded for a different competitor"
            );
        }

        let checks = [
            self.new_campaign(previous, current),
            self.campaign_ended(previous, current),
            self.ad_spike(previous, current),
        ];

        let events: Vec<ChangeEvent> = checks
            .into_iter()
            .flatten()
            .map(|(change_type, significance, data)| ChangeEvent {
                change_type,
                competitor_id: competitor.id.clone(),
                detected_at: now,
                significance,
                data,
            })
            .collect();

        tracing::debug!(
            competitor = %competitor.id,
            events = events.len(),
            "competitor snapshots compared"
        );
        events
    }

    fn new_campaign(
        &self,
        previous: &CompetitorSnapshot,
        current: &CompetitorSnapshot,
    ) -> Option<(ChangeType, Significance, ChangeData)> {
        let known: HashSet<&str> = previous.ads.iter().map(|ad| ad.id.as_str()).collect();
        let mut seen = HashSet::new();
        let ad_ids: Vec<String> = current
            .ads
            .iter()
            .filter(|ad| !known.contains(ad.id.as_str()) && seen.insert(ad.id.as_str()))
            .map(|ad| ad.id.clone())
            .collect();

        let count = ad_ids.len();
        if count == 0 {
            return None;
        }
        let significance = if count >= self.config.new_campaign_high_count {
            Significance::High
        } else {
            Significance::Medium
        };
        Some((
            ChangeType::NewCampaign,
            significance,
            ChangeData::NewCampaign { count, ad_ids },
        ))
    }

    fn campaign_ended(
        &self,
        previous: &CompetitorSnapshot,
        current: &CompetitorSnapshot,
    ) -> Option<(ChangeType, Significance, ChangeData)> {
        let still_running: HashSet<&str> = current.ads.iter().map(|ad| ad.id.as_str()).collect();
        let ads: Vec<SnapshotAd> = previous
            .ads
            .iter()
            .filter(|ad| !still_running.contains(ad.id.as_str()))
            .filter(|ad| ad.run_days >= self.config.winner_run_days)
            .cloned()
            .collect();

        if ads.is_empty() {
            return None;
        }
        Some((
            ChangeType::CampaignEnded,
            Significance::Medium,
            ChangeData::CampaignEnded { ads },
        ))
    }

    fn ad_spike(
        &self,
        previous: &CompetitorSnapshot,
        current: &CompetitorSnapshot,
    ) -> Option<(ChangeType, Significance, ChangeData)> {
        // Percent change is undefined from an empty baseline.
        if previous.active_ads_count == 0 {
            return None;
        }
        let previous_count = previous.active_ads_count;
        let current_count = current.active_ads_count;
        let percent_change =
            (current_count as f64 - previous_count as f64) / previous_count as f64 * 100.0;

        if percent_change <= self.config.spike_min_percent {
            return None;
        }
        let significance = if percent_change >= self.config.spike_high_percent {
            Significance::High
        } else {
            Significance::Medium
        };
        Some((
            ChangeType::AdSpike,
            significance,
            ChangeData::AdSpike {
                percent_change,
                previous_count,
                current_count,
            },
        ))
    }
}
