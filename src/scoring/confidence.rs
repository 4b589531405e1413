use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::numeric::{clamp01, mean, saturate};
use crate::{Ad, Gap, Mention};

/// Evidence ids per source at which a gap's source term is fully credited.
const EVIDENCE_CAP: f64 = 5.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceConfig {
    /// Combined ad + mention count at which the volume term reaches ~63%.
    pub volume_scale: f64,
    pub volume_weight: f64,
    pub evidence_weight: f64,
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            volume_scale: 50.0,
            volume_weight: 0.6,
            evidence_weight: 0.4,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfidenceScorer {
    config: ConfidenceConfig,
}

impl ConfidenceScorer {
    pub fn new(config: ConfidenceConfig) -> Self {
        Self { config }
    }

    pub fn score(&self, ads: &[Ad], mentions: &[Mention], gaps: &[Gap]) -> f64 {
        let volume = saturate((ads.len() + mentions.len()) as f64, self.config.volume_scale);

        let known_ads: HashSet<String> = ads.iter().map(Ad::effective_id).collect();
        let known_mentions: HashSet<String> = mentions.iter().map(Mention::effective_id).collect();
        let evidence: Vec<f64> = gaps
            .iter()
            .map(|gap| gap_evidence(gap, &known_ads, &known_mentions))
            .collect();

        let weights = self.config.volume_weight.max(0.0) + self.config.evidence_weight.max(0.0);
        if weights <= 0.0 {
            return 0.0;
        }
        let raw = self.config.volume_weight.max(0.0) * volume
            + self.config.evidence_weight.max(0.0) * mean(&evidence);
        clamp01(raw / weights)
    }
}

/// Per-gap evidence strength in [0,1]: each source up to 0.35, a 0.2 bonus
/// when both sources back the gap and 0.1 when the ids resolve to inputs.
fn gap_evidence(gap: &Gap, known_ads: &HashSet<String>, known_mentions: &HashSet<String>) -> f64 {
    let ad_count = gap.evidence_ads.len() as f64;
    let reddit_count = gap.evidence_reddit.len() as f64;

    let ad_term = 0.35 * (ad_count / EVIDENCE_CAP).min(1.0);
    let reddit_term = 0.35 * (reddit_count / EVIDENCE_CAP).min(1.0);
    let cross_source = if ad_count > 0.0 && reddit_count > 0.0 {
        0.2
    } else {
        0.0
    };

    let cited = ad_count + reddit_count;
    let resolved = gap
        .evidence_ads
        .iter()
        .filter(|id| known_ads.contains(*id))
        .count()
        + gap
            .evidence_reddit
            .iter()
            .filter(|id| known_mentions.contains(*id))
            .count();
    let resolved_term = if cited > 0.0 {
        0.1 * resolved as f64 / cited
    } else {
        0.0
    };

    clamp01(ad_term + reddit_term + cross_source + resolved_term)
}
