use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::numeric::{clamp01, clamp_score, saturate};
use crate::{Ad, Cluster, ClusterType};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SaturationConfig {
    /// Unique advertisers at which the advertiser term reaches ~63%.
    pub advertiser_scale: f64,
    /// Summed angle strength at which the repetition term reaches ~63%.
    pub repetition_scale: f64,
    pub advertiser_weight: f64,
    pub repetition_weight: f64,
}

impl Default for SaturationConfig {
    fn default() -> Self {
        Self {
            advertiser_scale: 8.0,
            repetition_scale: 20.0,
            advertiser_weight: 0.7,
            repetition_weight: 0.3,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SaturationScorer {
    config: SaturationConfig,
}

impl SaturationScorer {
    pub fn new(config: SaturationConfig) -> Self {
        Self { config }
    }

    pub fn score(&self, ads: &[Ad], clusters: &[Cluster]) -> f64 {
        if ads.is_empty() {
            return 0.0;
        }

        let advertisers = unique_advertisers(ads) as f64;
        let repetition: f64 = clusters
            .iter()
            .filter(|cluster| cluster.cluster_type == ClusterType::Angle)
            .map(Cluster::strength)
            .sum();

        let advertiser_term = saturate(advertisers, self.config.advertiser_scale);
        let repetition_term = saturate(repetition, self.config.repetition_scale);

        let combined = self.config.advertiser_weight.max(0.0) * advertiser_term
            + self.config.repetition_weight.max(0.0) * repetition_term;
        clamp_score(100.0 * clamp01(combined))
    }
}

/// Distinct advertiser names, compared case-insensitively; blank names are ignored.
pub fn unique_advertisers(ads: &[Ad]) -> usize {
    ads.iter()
        .map(|ad| ad.advertiser_name.trim().to_lowercase())
        .filter(|name| !name.is_empty())
        .collect::<HashSet<_>>()
        .len()
}
