use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const CONFIG_FILE: &str = "dazzler.json";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Hit window must be a positive number of beats, got {0}")]
    InvalidHitWindow(f64),

    #[error("Tier bounds must be non-negative and ascending (excellent {excellent}, great {great}, good {good})")]
    InvalidTierBounds { excellent: f64, great: f64, good: f64 },

    #[error("Excellent points must be positive, got {0}")]
    InvalidExcellentPoints(i32),

    #[error("Look-ahead and look-behind must be non-negative")]
    InvalidLookRange,
}

/// One rung of the accuracy ladder: an inclusive bound on |timing| in beats
/// and the points it awards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierRule {
    pub bound: f64,
    pub points: i32,
}

/// Accuracy ladder. Bad has no bound; it catches everything past Good and
/// every explicit miss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreConfig {
    pub excellent: TierRule,
    pub great: TierRule,
    pub good: TierRule,
    pub bad_points: i32,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            excellent: TierRule {
                bound: 0.10,
                points: 10,
            },
            great: TierRule {
                bound: 0.25,
                points: 5,
            },
            good: TierRule {
                bound: 0.50,
                points: 2,
            },
            bad_points: -10,
        }
    }
}

impl ScoreConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (e, g, d) = (self.excellent.bound, self.great.bound, self.good.bound);
        let ordered = e >= 0.0 && e <= g && g <= d && d.is_finite();
        if !ordered {
            return Err(ConfigError::InvalidTierBounds {
                excellent: e,
                great: g,
                good: d,
            });
        }
        if self.excellent.points <= 0 {
            return Err(ConfigError::InvalidExcellentPoints(self.excellent.points));
        }
        Ok(())
    }
}

/// Gameplay tuning, loaded from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayConfig {
    /// Half-width of the judgment window in beats. Governs activation,
    /// expiry, and hold release alike.
    pub hit_window: f64,
    /// Beats ahead of the hit line a renderer should show.
    pub look_ahead_beats: f64,
    /// Beats behind the hit line a renderer should keep showing.
    pub look_behind_beats: f64,
    pub score: ScoreConfig,
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            hit_window: 0.5,
            look_ahead_beats: 4.0,
            look_behind_beats: 0.5,
            score: ScoreConfig::default(),
        }
    }
}

impl PlayConfig {
    /// Loads config from the default config file.
    /// Returns default config if file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(CONFIG_FILE)
    }

    /// Loads config from a specified path.
    /// Returns default config if file doesn't exist.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Saves config to a specified path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.hit_window.is_finite() && self.hit_window > 0.0) {
            return Err(ConfigError::InvalidHitWindow(self.hit_window));
        }
        if !(self.look_ahead_beats >= 0.0 && self.look_behind_beats >= 0.0) {
            return Err(ConfigError::InvalidLookRange);
        }
        self.score.validate()
    }
}
