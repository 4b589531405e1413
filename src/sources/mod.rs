pub mod file;
pub mod fixture;

use serde::{Deserialize, Serialize};

use crate::error::RadarError;
use crate::{Ad, Cluster, Gap, Mention};

pub use file::FileSource;
pub use fixture::FixtureSource;

/// Everything the scoring engine consumes for one report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignalBundle {
    #[serde(default)]
    pub ads: Vec<Ad>,
    #[serde(default)]
    pub mentions: Vec<Mention>,
    #[serde(default)]
    pub clusters: Vec<Cluster>,
    #[serde(default)]
    pub gaps: Vec<Gap>,
}

impl SignalBundle {
    pub fn is_empty(&self) -> bool {
        self.ads.is_empty()
            && self.mentions.is_empty()
            && self.clusters.is_empty()
            && self.gaps.is_empty()
    }
}

/// Where a report's signals come from. Chosen explicitly by the caller; a
/// failing source surfaces its error instead of falling back to fixtures.
pub trait SignalSource {
    fn label(&self) -> String;
    fn load(&self) -> Result<SignalBundle, RadarError>;
}
