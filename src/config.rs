use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::changes::ChangeDetectionConfig;
use crate::error::RadarError;
use crate::scoring::{
    ConfidenceConfig, DissatisfactionConfig, LongevityConfig, MisalignmentConfig,
    SaturationConfig, UgcConfig,
};

/// Spike thresholds at or below this percent would flag routine growth.
const SPIKE_FLOOR_PERCENT: f64 = 20.0;
/// A doubling of active ads must always be reported as `high`.
const SPIKE_CEILING_PERCENT: f64 = 100.0;
/// One or two new ads are never a `high` launch.
const MIN_NEW_CAMPAIGN_HIGH_COUNT: usize = 3;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RadarConfig {
    pub saturation: SaturationConfig,
    pub longevity: LongevityConfig,
    pub dissatisfaction: DissatisfactionConfig,
    pub misalignment: MisalignmentConfig,
    pub confidence: ConfidenceConfig,
    pub ugc: UgcConfig,
    pub changes: ChangeDetectionConfig,
}

impl RadarConfig {
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>), RadarError> {
        let config_path = path.or_else(default_config_path);
        let mut config = if let Some(path) = config_path.as_ref() {
            if path.exists() {
                let contents =
                    std::fs::read_to_string(path).map_err(|err| RadarError::io(path, err))?;
                toml::from_str(&contents)?
            } else {
                tracing::debug!(path = %path.display(), "config file not found, using defaults");
                RadarConfig::default()
            }
        } else {
            RadarConfig::default()
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok((config, config_path))
    }

    pub fn write(&self, path: &Path) -> Result<(), RadarError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|err| RadarError::io(parent, err))?;
        }
        let payload = toml::to_string_pretty(self)?;
        std::fs::write(path, payload).map_err(|err| RadarError::io(path, err))?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, RadarError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), RadarError> {
        let changes = &self.changes;
        for (name, value) in [
            ("changes.spike_min_percent", changes.spike_min_percent),
            ("changes.spike_high_percent", changes.spike_high_percent),
        ] {
            if !value.is_finite() {
                return Err(RadarError::InvalidConfig(format!(
                    "{} must be a finite number, got {}",
                    name, value
                )));
            }
        }
        if changes.spike_min_percent <= SPIKE_FLOOR_PERCENT {
            return Err(RadarError::InvalidConfig(format!(
                "changes.spike_min_percent must be above {}, got {}",
                SPIKE_FLOOR_PERCENT, changes.spike_min_percent
            )));
        }
        if changes.spike_min_percent > changes.spike_high_percent {
            return Err(RadarError::InvalidConfig(format!(
                "changes.spike_min_percent ({}) exceeds spike_high_percent ({})",
                changes.spike_min_percent, changes.spike_high_percent
            )));
        }
        if changes.spike_high_percent > SPIKE_CEILING_PERCENT {
            return Err(RadarError::InvalidConfig(format!(
                "changes.spike_high_percent must be at most {}, got {}",
                SPIKE_CEILING_PERCENT, changes.spike_high_percent
            )));
        }
        if changes.new_campaign_high_count < MIN_NEW_CAMPAIGN_HIGH_COUNT {
            return Err(RadarError::InvalidConfig(format!(
                "changes.new_campaign_high_count must be at least {}, got {}",
                MIN_NEW_CAMPAIGN_HIGH_COUNT, changes.new_campaign_high_count
            )));
        }

        let scales = [
            ("saturation.advertiser_scale", self.saturation.advertiser_scale),
            ("saturation.repetition_scale", self.saturation.repetition_scale),
            ("longevity.scale_days", self.longevity.scale_days),
            ("dissatisfaction.strength_scale", self.dissatisfaction.strength_scale),
            ("confidence.volume_scale", self.confidence.volume_scale),
            ("ugc.run_scale_days", self.ugc.run_scale_days),
            ("ugc.recency_scale_days", self.ugc.recency_scale_days),
        ];
        for (name, value) in scales {
            if !value.is_finite() || value <= 0.0 {
                return Err(RadarError::InvalidConfig(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Some(value) = env_parse::<f64>("RADAR_LONGEVITY_SCALE_DAYS") {
            self.longevity.scale_days = value;
        }
        if let Some(value) = env_parse::<u32>("RADAR_WINNER_RUN_DAYS") {
            self.changes.winner_run_days = value;
        }
        if let Some(value) = env_parse::<f64>("RADAR_SPIKE_MIN_PERCENT") {
            self.changes.spike_min_percent = value;
        }
        if let Some(value) = env_parse::<f64>("RADAR_SPIKE_HIGH_PERCENT") {
            self.changes.spike_high_percent = value;
        }
        if let Some(value) = env_parse::<usize>("RADAR_NEW_CAMPAIGN_HIGH_COUNT") {
            self.changes.new_campaign_high_count = value;
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = env::var(name).ok()?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(variable = name, value = %raw, "ignoring unparsable override");
            None
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    env::var("RADAR_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/radar.toml")))
}
