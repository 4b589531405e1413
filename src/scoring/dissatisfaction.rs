use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::numeric::{clamp_score, log_ratio, mean, saturate};
use crate::{Cluster, ClusterType, Mention};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DissatisfactionConfig {
    /// Summed objection strength at which the base term reaches ~63%.
    pub strength_scale: f64,
    /// Largest multiplier applied for highly upvoted discussions.
    pub max_engagement_boost: f64,
    /// Average upvotes at which the boost is fully applied.
    pub upvote_cap: f64,
}

impl Default for DissatisfactionConfig {
    fn default() -> Self {
        Self {
            strength_scale: 25.0,
            max_engagement_boost: 0.5,
            upvote_cap: 1_000.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DissatisfactionScorer {
    config: DissatisfactionConfig,
}

impl DissatisfactionScorer {
    pub fn new(config: DissatisfactionConfig) -> Self {
        Self { config }
    }

    pub fn score(&self, mentions: &[Mention], clusters: &[Cluster]) -> f64 {
        let objections: Vec<&Cluster> = clusters
            .iter()
            .filter(|cluster| cluster.cluster_type == ClusterType::Objection)
            .collect();
        if objections.is_empty() {
            return 0.0;
        }

        let upvotes_by_id: HashMap<String, f64> = mentions
            .iter()
            .map(|mention| (mention.effective_id(), mention.upvotes()))
            .collect();
        let all_upvotes: Vec<f64> = mentions.iter().map(Mention::upvotes).collect();
        let overall = mean(&all_upvotes);

        let weighted: f64 = objections
            .iter()
            .map(|cluster| {
                let linked: Vec<f64> = cluster
                    .examples
                    .iter()
                    .filter_map(|example| upvotes_by_id.get(&example.id).copied())
                    .collect();
                // Clusters without resolvable examples fall back to the whole discussion.
                let upvotes = if linked.is_empty() { overall } else { mean(&linked) };
                cluster.strength() * self.engagement_multiplier(upvotes)
            })
            .sum();
        clamp_score(100.0 * saturate(weighted, self.config.strength_scale))
    }

    /// 1.0 with no upvotes, rising towards `1 + max_engagement_boost` at `upvote_cap`.
    pub fn engagement_multiplier(&self, mean_upvotes: f64) -> f64 {
        let boost = self.config.max_engagement_boost.max(0.0);
        1.0 + boost * log_ratio(mean_upvotes, self.config.upvote_cap)
    }
}
