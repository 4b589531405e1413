use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::numeric::{clamp01, clamp_score};
use crate::{Ad, Cluster, ClusterType};

const STOPWORDS: &[&str] = &[
    "about", "after", "again", "also", "been", "being", "could", "does", "doesn", "from",
    "have", "into", "just", "like", "more", "most", "much", "only", "other", "over", "really",
    "same", "should", "some", "such", "than", "that", "their", "them", "then", "there", "these",
    "they", "this", "those", "very", "want", "were", "what", "when", "where", "which", "while",
    "will", "with", "would", "your",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MisalignmentConfig {
    pub min_keyword_len: usize,
    /// Share of a cluster's label keywords that ad copy must mention to count as addressed.
    pub coverage_ratio: f64,
}

impl Default for MisalignmentConfig {
    fn default() -> Self {
        Self {
            min_keyword_len: 4,
            coverage_ratio: 0.5,
        }
    }
}

/// Weighs the `feature`/`objection` demand that no ad creative speaks to.
#[derive(Debug, Clone, Default)]
pub struct MisalignmentScorer {
    config: MisalignmentConfig,
}

impl MisalignmentScorer {
    pub fn new(config: MisalignmentConfig) -> Self {
        Self { config }
    }

    pub fn score(&self, ads: &[Ad], clusters: &[Cluster]) -> f64 {
        let ad_vocabulary: HashSet<String> = ads
            .iter()
            .flat_map(|ad| self.keywords(&ad.creative_text))
            .collect();

        let mut total = 0.0;
        let mut unaddressed = 0.0;
        for cluster in clusters.iter().filter(|cluster| {
            matches!(cluster.cluster_type, ClusterType::Feature | ClusterType::Objection)
        }) {
            let keywords = self.keywords(&cluster.label);
            if keywords.is_empty() {
                continue;
            }
            // Low-intensity clusters still count for half their frequency.
            let weight = cluster.frequency() * (0.5 + 0.5 * cluster.intensity());
            if weight <= 0.0 {
                continue;
            }

            let covered = keywords
                .iter()
                .filter(|keyword| ad_vocabulary.contains(*keyword))
                .count() as f64;
            let coverage = covered / keywords.len() as f64;

            total += weight;
            if coverage < clamp01(self.config.coverage_ratio) {
                unaddressed += weight;
            }
        }

        if total <= 0.0 {
            return 0.0;
        }
        clamp_score(100.0 * clamp01(unaddressed / total))
    }

    fn keywords(&self, text: &str) -> HashSet<String> {
        text.split(|ch: char| !ch.is_alphanumeric())
            .map(|word| word.to_lowercase())
            .filter(|word| word.chars().count() >= self.config.min_keyword_len)
            .filter(|word| !STOPWORDS.contains(&word.as_str()))
            .map(|word| stem(&word))
            .collect()
    }
}

/// Folds simple plurals so "invoices" in a complaint matches "invoice" in ad copy.
fn stem(word: &str) -> String {
    if word.len() > 4 {
        if let Some(stripped) = word.strip_suffix("es") {
            if stripped.ends_with('s') || stripped.ends_with('x') || stripped.ends_with("ch") {
                return stripped.to_string();
            }
        }
        if let Some(stripped) = word.strip_suffix('s') {
            if !stripped.ends_with('s') {
                return stripped.to_string();
            }
        }
    }
    word.to_string()
}
