use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use demand_radar::intent::{intent_breakdown, IntentBreakdown};
use demand_radar::scoring::UgcScores;
use demand_radar::sources::SignalBundle;
use demand_radar::{
    ChangeEvent, Competitor, CompetitorSnapshot, ScoreSet, ScoringEngine, UgcAsset, UgcMetrics,
};

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub scores: ScoreSet,
    pub intents: IntentBreakdown,
    pub computed_at: DateTime<Utc>,
}

impl ScoreResponse {
    pub fn compute(engine: &ScoringEngine, bundle: &SignalBundle, now: DateTime<Utc>) -> Self {
        let scores = engine.score(
            &bundle.ads,
            &bundle.mentions,
            &bundle.clusters,
            &bundle.gaps,
            now,
        );
        Self {
            scores,
            intents: intent_breakdown(&bundle.mentions),
            computed_at: now,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChangesRequest {
    pub competitor: Competitor,
    pub previous: CompetitorSnapshot,
    pub current: CompetitorSnapshot,
}

#[derive(Debug, Serialize)]
pub struct ChangesResponse {
    pub competitor_id: String,
    pub events: Vec<ChangeEvent>,
}

#[derive(Debug, Deserialize)]
pub struct UgcRequest {
    pub asset: UgcAsset,
    #[serde(default)]
    pub metrics: UgcMetrics,
    #[serde(default)]
    pub trend_factor: Option<f64>,
}

impl UgcRequest {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(trend_factor) = self.trend_factor {
            if !trend_factor.is_finite() {
                return Err("trend_factor must be a finite number".to_string());
            }
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct UgcResponse {
    pub asset_id: String,
    pub scores: UgcScores,
}
