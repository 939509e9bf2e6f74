//! Configuration structs for playback and story creation.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::StoryResult;

/// Time each scene stays on screen in the shorts viewer.
pub const DEFAULT_SCENE_INTERVAL_MS: u64 = 4000;

/// Simulated generation time of the mock story studio.
pub const DEFAULT_GENERATION_LATENCY_MS: u64 = 3000;

/// Shorts viewer timing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Fixed interval before auto-advancing to the next scene.
    pub scene_interval_ms: u64,
    /// Whether the end of a story rolls over into the next story.
    pub auto_advance_stories: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            scene_interval_ms: DEFAULT_SCENE_INTERVAL_MS,
            auto_advance_stories: true,
        }
    }
}

impl PlaybackConfig {
    pub fn scene_interval(&self) -> Duration {
        Duration::from_millis(self.scene_interval_ms)
    }
}

/// Story studio (creation) settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    /// How long the mock generator pretends to work.
    pub simulated_latency_ms: u64,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            simulated_latency_ms: DEFAULT_GENERATION_LATENCY_MS,
        }
    }
}

impl StudioConfig {
    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }
}

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub playback: PlaybackConfig,
    pub studio: StudioConfig,
}

impl AppConfig {
    /// Parse configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> StoryResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load configuration from a JSON file.
    pub fn load(path: &Path) -> StoryResult<Self> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        info!(
            path = %path.display(),
            scene_interval_ms = config.playback.scene_interval_ms,
            "Configuration loaded"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = AppConfig::default();
        assert_eq!(config.playback.scene_interval(), Duration::from_millis(4000));
        assert!(config.playback.auto_advance_stories);
        assert_eq!(config.studio.simulated_latency(), Duration::from_secs(3));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config = AppConfig::from_json_str(r#"{ "playback": { "scene_interval_ms": 250 } }"#)
            .unwrap();
        assert_eq!(config.playback.scene_interval_ms, 250);
        assert!(config.playback.auto_advance_stories);
        assert_eq!(config.studio, StudioConfig::default());
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(AppConfig::from_json_str("{}").unwrap(), AppConfig::default());
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = AppConfig::load(Path::new("/nonexistent/storytime.json")).unwrap_err();
        assert!(matches!(err, crate::StoryError::Io(_)));
    }
}
