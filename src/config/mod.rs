mod play_config;

pub use play_config::{ConfigError, PlayConfig, ScoreConfig, TierRule};
