use std::path::PathBuf;

use crate::error::RadarError;
use crate::sources::{SignalBundle, SignalSource};

/// Reads a JSON `SignalBundle` written by the collectors.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SignalSource for FileSource {
    fn label(&self) -> String {
        format!("file:{}", self.path.display())
    }

    fn load(&self) -> Result<SignalBundle, RadarError> {
        let data =
            std::fs::read_to_string(&self.path).map_err(|err| RadarError::io(&self.path, err))?;
        if data.trim().is_empty() {
            return Err(RadarError::InvalidInput(format!(
                "{} is empty",
                self.path.display()
            )));
        }
        let bundle: SignalBundle = serde_json::from_str(&data)?;
        tracing::debug!(
            source = %self.label(),
            ads = bundle.ads.len(),
            mentions = bundle.mentions.len(),
            clusters = bundle.clusters.len(),
            gaps = bundle.gaps.len(),
            "loaded signal bundle"
        );
        Ok(bundle)
    }
}
