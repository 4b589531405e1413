pub mod changes;
pub mod config;
pub mod error;
pub mod intent;
pub mod numeric;
pub mod scoring;
pub mod sources;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use crate::changes::{
    ChangeData, ChangeDetector, ChangeEvent, ChangeType, Significance, AD_SPIKE_HIGH_PERCENT,
    AD_SPIKE_MIN_PERCENT, NEW_CAMPAIGN_HIGH_COUNT, WINNER_RUN_DAYS,
};
pub use crate::config::RadarConfig;
pub use crate::error::RadarError;
pub use crate::scoring::{ScoreSet, ScoringEngine};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    #[default]
    Text,
    Image,
    Video,
    Carousel,
}

impl MediaType {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "none" | "text" => Some(MediaType::Text),
            "image" | "photo" | "static" => Some(MediaType::Image),
            "video" | "vid" | "reel" => Some(MediaType::Video),
            "carousel" | "dco" | "multi" => Some(MediaType::Carousel),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MediaType::Text => "text",
            MediaType::Image => "image",
            MediaType::Video => "video",
            MediaType::Carousel => "carousel",
        }
    }
}

/// One paid-channel creative observation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ad {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub advertiser_name: String,
    #[serde(default)]
    pub creative_text: String,
    #[serde(default)]
    pub first_seen: Option<DateTime<Utc>>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub media_type: MediaType,
}

impl Ad {
    pub fn new(advertiser_name: impl Into<String>, creative_text: impl Into<String>) -> Self {
        Self {
            id: None,
            source: "meta".to_string(),
            advertiser_name: advertiser_name.into(),
            creative_text: creative_text.into(),
            first_seen: None,
            is_active: true,
            media_type: MediaType::Text,
        }
    }

    pub fn first_seen(mut self, first_seen: DateTime<Utc>) -> Self {
        self.first_seen = Some(first_seen);
        self
    }

    /// Collector id when present, otherwise a stable content hash.
    pub fn effective_id(&self) -> String {
        self.id.clone().unwrap_or_else(|| {
            let payload = format!(
                "{}:{}:{}",
                self.source, self.advertiser_name, self.creative_text
            );
            format!("ad_{:x}", stable_hash64(&payload))
        })
    }
}

/// One organic discussion item (forum post or comment).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mention {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub subreddit: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub num_comments: i64,
    #[serde(default)]
    pub posted_at: Option<DateTime<Utc>>,
}

impl Mention {
    pub fn new(title: impl Into<String>, body: impl Into<String>, score: i64) -> Self {
        Self {
            id: None,
            subreddit: String::new(),
            title: title.into(),
            body: body.into(),
            score,
            num_comments: 0,
            posted_at: None,
        }
    }

    pub fn effective_id(&self) -> String {
        self.id.clone().unwrap_or_else(|| {
            let payload = format!("{}:{}:{}", self.subreddit, self.title, self.body);
            format!("mention_{:x}", stable_hash64(&payload))
        })
    }

    /// Upvotes with malformed negative values treated as zero.
    pub fn upvotes(&self) -> f64 {
        self.score.max(0) as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterType {
    Angle,
    Objection,
    Feature,
    Offer,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterExample {
    pub id: String,
    pub snippet: String,
}

/// A group of related snippets produced by upstream extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cluster {
    pub cluster_type: ClusterType,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub examples: Vec<ClusterExample>,
    #[serde(default)]
    pub frequency: i64,
    #[serde(default)]
    pub intensity: Option<f64>,
}

impl Cluster {
    pub fn new(
        cluster_type: ClusterType,
        label: impl Into<String>,
        frequency: i64,
        intensity: f64,
    ) -> Self {
        Self {
            cluster_type,
            label: label.into(),
            examples: Vec::new(),
            frequency,
            intensity: Some(intensity),
        }
    }

    /// Frequency with negative values clamped to zero.
    pub fn frequency(&self) -> f64 {
        self.frequency.max(0) as f64
    }

    /// Intensity in [0,1]; missing or non-finite values count as zero.
    pub fn intensity(&self) -> f64 {
        numeric::clamp01(self.intensity.unwrap_or(0.0))
    }

    /// Combined strength (`frequency` x `intensity`), never negative.
    pub fn strength(&self) -> f64 {
        self.frequency() * self.intensity()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapType {
    Product,
    Offer,
    Positioning,
    Trust,
    Pricing,
}

/// A previously identified product/market misalignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gap {
    #[serde(default)]
    pub id: String,
    pub gap_type: GapType,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub problem: String,
    #[serde(default)]
    pub evidence_ads: Vec<String>,
    #[serde(default)]
    pub evidence_reddit: Vec<String>,
    #[serde(default)]
    pub recommendation: String,
    #[serde(default)]
    pub opportunity_score: f64,
    #[serde(default)]
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Tiktok,
    Instagram,
    Youtube,
    MetaAd,
    #[default]
    #[serde(other)]
    Other,
}

/// One piece of user-generated or ad-tested creative content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UgcAsset {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub platform: Platform,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub first_shown: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_shown: Option<DateTime<Utc>>,
    #[serde(default)]
    pub posted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct UgcMetrics {
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub shares: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Competitor {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

impl Competitor {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotAd {
    pub id: String,
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub run_days: u32,
}

impl SnapshotAd {
    pub fn new(id: impl Into<String>, headline: impl Into<String>, run_days: u32) -> Self {
        Self {
            id: id.into(),
            headline: headline.into(),
            run_days,
        }
    }
}

/// Point-in-time capture of one competitor's active ad set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitorSnapshot {
    pub competitor_id: String,
    #[serde(default)]
    pub active_ads_count: u64,
    #[serde(default)]
    pub ads: Vec<SnapshotAd>,
}

pub fn calculate_saturation_score(ads: &[Ad], clusters: &[Cluster]) -> f64 {
    ScoringEngine::default().saturation(ads, clusters)
}

pub fn calculate_longevity_score(ads: &[Ad]) -> f64 {
    ScoringEngine::default().longevity(ads, Utc::now())
}

pub fn calculate_dissatisfaction_score(mentions: &[Mention], clusters: &[Cluster]) -> f64 {
    ScoringEngine::default().dissatisfaction(mentions, clusters)
}

pub fn calculate_misalignment_score(ads: &[Ad], clusters: &[Cluster]) -> f64 {
    ScoringEngine::default().misalignment(ads, clusters)
}

pub fn calculate_opportunity_score(
    longevity: f64,
    dissatisfaction: f64,
    misalignment: f64,
    saturation: f64,
) -> f64 {
    scoring::opportunity::opportunity_score(longevity, dissatisfaction, misalignment, saturation)
}

pub fn calculate_confidence_score(ads: &[Ad], mentions: &[Mention], gaps: &[Gap]) -> f64 {
    ScoringEngine::default().confidence(ads, mentions, gaps)
}

pub fn calculate_scores(
    ads: &[Ad],
    mentions: &[Mention],
    clusters: &[Cluster],
    gaps: &[Gap],
) -> ScoreSet {
    ScoringEngine::default().score(ads, mentions, clusters, gaps, Utc::now())
}

pub fn calculate_ugc_ad_tested_score(asset: &UgcAsset, metrics: &UgcMetrics) -> f64 {
    ScoringEngine::default().ugc_ad_tested(asset, metrics, Utc::now())
}

pub fn calculate_ugc_trend_score(asset: &UgcAsset, trend_factor: f64) -> f64 {
    ScoringEngine::default().ugc_trend(asset, trend_factor, Utc::now())
}

pub fn calculate_ugc_connected_score(metrics: &UgcMetrics, asset: &UgcAsset) -> f64 {
    ScoringEngine::default().ugc_connected(metrics, asset)
}

pub fn detect_competitor_changes(
    competitor: &Competitor,
    previous: &CompetitorSnapshot,
    current: &CompetitorSnapshot,
) -> Vec<ChangeEvent> {
    ChangeDetector::default().detect(competitor, previous, current, Utc::now())
}

fn default_true() -> bool {
    true
}

fn stable_hash64(value: &str) -> u64 {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}

pub fn format_score(value: f64) -> String {
    format!("{:.1}", value)
}

pub fn format_percent(value: f64) -> String {
    format!("{:.0}%", value * 100.0)
}
