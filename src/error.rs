use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RadarError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("server error: {0}")]
    Server(String),
}

impl RadarError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RadarError::Io {
            path: path.into(),
            source,
        }
    }
}
