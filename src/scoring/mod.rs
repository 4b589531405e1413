pub mod confidence;
pub mod dissatisfaction;
pub mod longevity;
pub mod misalignment;
pub mod opportunity;
pub mod pipeline;
pub mod saturation;
pub mod ugc;

pub use confidence::{ConfidenceConfig, ConfidenceScorer};
pub use dissatisfaction::{DissatisfactionConfig, DissatisfactionScorer};
pub use longevity::{LongevityConfig, LongevityScorer};
pub use misalignment::{MisalignmentConfig, MisalignmentScorer};
pub use opportunity::opportunity_score;
pub use pipeline::{ScoreSet, ScoringEngine, UgcScores};
pub use saturation::{unique_advertisers, SaturationConfig, SaturationScorer};
pub use ugc::{ShareCaps, UgcConfig, UgcScorer};
