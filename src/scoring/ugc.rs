use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::numeric::{age_days, clamp01, clamp_score, decay, log_ratio, saturate, span_days};
use crate::{Platform, UgcAsset, UgcMetrics};

const AD_TESTED_RUN_WEIGHT: f64 = 0.45;
const AD_TESTED_ENGAGEMENT_WEIGHT: f64 = 0.35;
const AD_TESTED_REACH_WEIGHT: f64 = 0.20;

const TREND_RECENCY_WEIGHT: f64 = 0.60;
const TREND_FACTOR_WEIGHT: f64 = 0.40;

const CONNECTED_VIEWS_WEIGHT: f64 = 0.15;
const CONNECTED_LIKES_WEIGHT: f64 = 0.20;
const CONNECTED_COMMENTS_WEIGHT: f64 = 0.25;
const CONNECTED_SHARES_WEIGHT: f64 = 0.40;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UgcConfig {
    /// Days of continuous running at which the run term reaches ~63%.
    pub run_scale_days: f64,
    /// Age in days over which recency decays by a factor of e.
    pub recency_scale_days: f64,
    /// Interactions per view treated as a fully engaged asset.
    pub engagement_rate_cap: f64,
    pub views_cap: f64,
    pub likes_cap: f64,
    pub comments_cap: f64,
    pub share_caps: ShareCaps,
}

impl Default for UgcConfig {
    fn default() -> Self {
        Self {
            run_scale_days: 30.0,
            recency_scale_days: 7.0,
            engagement_rate_cap: 0.1,
            views_cap: 1_000_000.0,
            likes_cap: 100_000.0,
            comments_cap: 10_000.0,
            share_caps: ShareCaps::default(),
        }
    }
}

/// Share counts treated as the ceiling per platform; TikTok content travels by shares.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareCaps {
    pub tiktok: f64,
    pub instagram: f64,
    pub youtube: f64,
    pub meta_ad: f64,
    pub other: f64,
}

impl Default for ShareCaps {
    fn default() -> Self {
        Self {
            tiktok: 50_000.0,
            instagram: 20_000.0,
            youtube: 10_000.0,
            meta_ad: 10_000.0,
            other: 10_000.0,
        }
    }
}

impl ShareCaps {
    pub fn for_platform(&self, platform: Platform) -> f64 {
        match platform {
            Platform::Tiktok => self.tiktok,
            Platform::Instagram => self.instagram,
            Platform::Youtube => self.youtube,
            Platform::MetaAd => self.meta_ad,
            Platform::Other => self.other,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UgcScorer {
    config: UgcConfig,
}

impl UgcScorer {
    pub fn new(config: UgcConfig) -> Self {
        Self { config }
    }

    /// Run length dominates; an asset still showing runs until `now`.
    pub fn ad_tested(&self, asset: &UgcAsset, metrics: &UgcMetrics, now: DateTime<Utc>) -> f64 {
        let run_days = match (asset.first_shown, asset.last_shown) {
            (Some(first), Some(last)) => span_days(first, last),
            (Some(first), None) => span_days(first, now),
            _ => 0.0,
        };
        let run = saturate(run_days, self.config.run_scale_days);
        let engagement = self.engagement_rate(metrics);
        let reach = log_ratio(metrics.views as f64, self.config.views_cap);

        clamp_score(
            100.0
                * (AD_TESTED_RUN_WEIGHT * run
                    + AD_TESTED_ENGAGEMENT_WEIGHT * engagement
                    + AD_TESTED_REACH_WEIGHT * reach),
        )
    }

    /// Recency of `posted_at` dominates; a missing timestamp has no recency credit.
    pub fn trend(&self, asset: &UgcAsset, trend_factor: f64, now: DateTime<Utc>) -> f64 {
        let recency = match asset.posted_at {
            Some(posted_at) => decay(
                age_days(Some(posted_at), now),
                self.config.recency_scale_days,
            ),
            None => 0.0,
        };
        let factor = clamp01(trend_factor);
        clamp_score(100.0 * (TREND_RECENCY_WEIGHT * recency + TREND_FACTOR_WEIGHT * factor))
    }

    /// Engagement of a connected account's post, shares weighted highest.
    pub fn connected(&self, metrics: &UgcMetrics, asset: &UgcAsset) -> f64 {
        let share_cap = self.config.share_caps.for_platform(asset.platform);
        let views = log_ratio(metrics.views as f64, self.config.views_cap);
        let likes = log_ratio(metrics.likes as f64, self.config.likes_cap);
        let comments = log_ratio(metrics.comments as f64, self.config.comments_cap);
        let shares = log_ratio(metrics.shares as f64, share_cap);
        let composite = CONNECTED_VIEWS_WEIGHT * views
            + CONNECTED_LIKES_WEIGHT * likes
            + CONNECTED_COMMENTS_WEIGHT * comments
            + CONNECTED_SHARES_WEIGHT * shares;
        clamp_score(100.0 * composite)
    }

    fn engagement_rate(&self, metrics: &UgcMetrics) -> f64 {
        if metrics.views == 0 || self.config.engagement_rate_cap <= 0.0 {
            return 0.0;
        }
        let interactions = metrics.likes as f64 + metrics.comments as f64 + metrics.shares as f64;
        clamp01(interactions / metrics.views as f64 / self.config.engagement_rate_cap)
    }
}
