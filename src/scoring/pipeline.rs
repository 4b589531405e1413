use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::RadarConfig;
use crate::numeric::{clamp01, clamp_score};
use crate::scoring::{
    opportunity_score, ConfidenceScorer, DissatisfactionScorer, LongevityScorer,
    MisalignmentScorer, SaturationScorer, UgcScorer,
};
use crate::{Ad, Cluster, Gap, Mention, UgcAsset, UgcMetrics};

/// Score set attached to a report. Always recomputed wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreSet {
    pub saturation: f64,
    pub longevity: f64,
    pub dissatisfaction: f64,
    pub misalignment: f64,
    pub opportunity: f64,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UgcScores {
    pub ad_tested: f64,
    pub trend: f64,
    pub connected: f64,
}

#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    saturation_scorer: SaturationScorer,
    longevity_scorer: LongevityScorer,
    dissatisfaction_scorer: DissatisfactionScorer,
    misalignment_scorer: MisalignmentScorer,
    confidence_scorer: ConfidenceScorer,
    ugc_scorer: UgcScorer,
}

impl ScoringEngine {
    pub fn new(
        saturation_scorer: SaturationScorer,
        longevity_scorer: LongevityScorer,
        dissatisfaction_scorer: DissatisfactionScorer,
        misalignment_scorer: MisalignmentScorer,
        confidence_scorer: ConfidenceScorer,
        ugc_scorer: UgcScorer,
    ) -> Self {
        Self {
            saturation_scorer,
            longevity_scorer,
            dissatisfaction_scorer,
            misalignment_scorer,
            confidence_scorer,
            ugc_scorer,
        }
    }

    pub fn from_config(config: &RadarConfig) -> Self {
        Self::new(
            SaturationScorer::new(config.saturation.clone()),
            LongevityScorer::new(config.longevity.clone()),
            DissatisfactionScorer::new(config.dissatisfaction.clone()),
            MisalignmentScorer::new(config.misalignment.clone()),
            ConfidenceScorer::new(config.confidence.clone()),
            UgcScorer::new(config.ugc.clone()),
        )
    }

    pub fn saturation(&self, ads: &[Ad], clusters: &[Cluster]) -> f64 {
        self.saturation_scorer.score(ads, clusters)
    }

    pub fn longevity(&self, ads: &[Ad], now: DateTime<Utc>) -> f64 {
        self.longevity_scorer.score(ads, now)
    }

    pub fn dissatisfaction(&self, mentions: &[Mention], clusters: &[Cluster]) -> f64 {
        self.dissatisfaction_scorer.score(mentions, clusters)
    }

    pub fn misalignment(&self, ads: &[Ad], clusters: &[Cluster]) -> f64 {
        self.misalignment_scorer.score(ads, clusters)
    }

    pub fn confidence(&self, ads: &[Ad], mentions: &[Mention], gaps: &[Gap]) -> f64 {
        self.confidence_scorer.score(ads, mentions, gaps)
    }

    /// Computes every component against the single `now` supplied by the caller.
    pub fn score(
        &self,
        ads: &[Ad],
        mentions: &[Mention],
        clusters: &[Cluster],
        gaps: &[Gap],
        now: DateTime<Utc>,
    ) -> ScoreSet {
        let saturation = self.saturation(ads, clusters);
        let longevity = self.longevity(ads, now);
        let dissatisfaction = self.dissatisfaction(mentions, clusters);
        let misalignment = self.misalignment(ads, clusters);
        let opportunity = opportunity_score(longevity, dissatisfaction, misalignment, saturation);
        let confidence = self.confidence(ads, mentions, gaps);

        let scores = ScoreSet {
            saturation: clamp_score(saturation),
            longevity: clamp_score(longevity),
            dissatisfaction: clamp_score(dissatisfaction),
            misalignment: clamp_score(misalignment),
            opportunity: clamp_score(opportunity),
            confidence: clamp01(confidence),
        };
        tracing::debug!(
            ads = ads.len(),
            mentions = mentions.len(),
            clusters = clusters.len(),
            gaps = gaps.len(),
            opportunity = scores.opportunity,
            confidence = scores.confidence,
            "computed score set"
        );
        scores
    }

    pub fn ugc_ad_tested(&self, asset: &UgcAsset, metrics: &UgcMetrics, now: DateTime<Utc>) -> f64 {
        self.ugc_scorer.ad_tested(asset, metrics, now)
    }

    pub fn ugc_trend(&self, asset: &UgcAsset, trend_factor: f64, now: DateTime<Utc>) -> f64 {
        self.ugc_scorer.trend(asset, trend_factor, now)
    }

    pub fn ugc_connected(&self, metrics: &UgcMetrics, asset: &UgcAsset) -> f64 {
        self.ugc_scorer.connected(metrics, asset)
    }

    pub fn ugc(
        &self,
        asset: &UgcAsset,
        metrics: &UgcMetrics,
        trend_factor: f64,
        now: DateTime<Utc>,
    ) -> UgcScores {
        UgcScores {
            ad_tested: self.ugc_ad_tested(asset, metrics, now),
            trend: self.ugc_trend(asset, trend_factor, now),
            connected: self.ugc_connected(metrics, asset),
        }
    }
}
