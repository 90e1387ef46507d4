//! Wall configuration
//!
//! The set of players is static: it is read once at startup, each entry becomes
//! an independent player tile, and nothing is added or removed afterwards.

use crate::{sampler::DEFAULT_FFT_SIZE, Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use url::Url;

/// Selector of the `<video>` inside a player element
pub const VIDEO_SELECTOR: &str = ".player__video";
/// Selector of the settings panel host inside a player element
pub const CONTROLS_SELECTOR: &str = ".player__controls";
/// Selector of the equalizer `<canvas>` inside a player element
pub const BARS_SELECTOR: &str = ".player__bars";

/// One player tile: container element id and the manifest it plays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub element_id: String,
    pub manifest_url: Url,
}

impl PlayerConfig {
    pub fn new(element_id: impl Into<String>, manifest_url: &str) -> Result<Self> {
        Ok(Self {
            element_id: element_id.into(),
            manifest_url: Url::parse(manifest_url)?,
        })
    }
}

/// Equalizer bar geometry and colour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarChartConfig {
    /// Bar width in pixels
    pub bar_width: f64,
    /// Gap between bars in pixels
    pub bar_gap: f64,
    /// CSS fill colour
    pub color: String,
}

impl Default for BarChartConfig {
    fn default() -> Self {
        Self {
            bar_width: 2.0,
            bar_gap: 1.0,
            color: "#2FA1D6".to_string(),
        }
    }
}

impl BarChartConfig {
    /// Horizontal distance between the left edges of two neighbouring bars
    pub fn stride(&self) -> f64 {
        self.bar_width + self.bar_gap
    }
}

/// Fullscreen animation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FullscreenConfig {
    /// Transition duration in milliseconds
    pub duration_ms: u32,
    /// CSS timing function
    pub easing: String,
    /// z-index used while the tile animates above its siblings
    pub z_index: i32,
    /// Class applied once the tile is committed to fullscreen
    pub class_name: String,
}

impl Default for FullscreenConfig {
    fn default() -> Self {
        Self {
            duration_ms: 300,
            easing: "ease-in-out".to_string(),
            z_index: 10,
            class_name: "player--fullscreen".to_string(),
        }
    }
}

impl FullscreenConfig {
    /// CSS `transition` value for the transform animation
    pub fn transition_css(&self) -> String {
        format!("transform {}ms {}", self.duration_ms, self.easing)
    }
}

/// Configuration of the whole wall
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallConfig {
    pub players: Vec<PlayerConfig>,
    pub bars: BarChartConfig,
    /// Analyser FFT window; snapshots carry half as many bins
    pub fft_size: u32,
    pub fullscreen: FullscreenConfig,
}

impl Default for WallConfig {
    fn default() -> Self {
        let demo = [
            ("video-1", "http://localhost:9191/master?url=http%3A%2F%2Flocalhost%3A3102%2Fstreams%2Fsosed%2Fmaster.m3u8"),
            ("video-2", "http://localhost:9191/live?url=http%3A%2F%2Flocalhost%3A3102%2Fstreams%2Fstairs%2Fmaster.m3u8"),
            ("video-3", "http://localhost:9191/master?url=http%3A%2F%2Flocalhost%3A3102%2Fstreams%2Fdog%2Fmaster.m3u8"),
            ("video-4", "http://localhost:9191/live?url=http%3A%2F%2Flocalhost%3A3102%2Fstreams%2Fstreet%2Fmaster.m3u8"),
        ];

        Self {
            players: demo
                .iter()
                .filter_map(|(id, url)| PlayerConfig::new(*id, url).ok())
                .collect(),
            bars: BarChartConfig::default(),
            fft_size: DEFAULT_FFT_SIZE,
            fullscreen: FullscreenConfig::default(),
        }
    }
}

impl WallConfig {
    /// Wider bars and a coarser FFT, for many small tiles
    pub fn low_power() -> Self {
        Self {
            bars: BarChartConfig {
                bar_width: 4.0,
                bar_gap: 2.0,
                ..BarChartConfig::default()
            },
            fft_size: 256,
            ..Self::default()
        }
    }

    /// Thin bars over a fine FFT and a slower fullscreen animation
    pub fn showcase() -> Self {
        Self {
            bars: BarChartConfig {
                bar_width: 1.0,
                bar_gap: 1.0,
                ..BarChartConfig::default()
            },
            fft_size: 4096,
            fullscreen: FullscreenConfig {
                duration_ms: 500,
                ..FullscreenConfig::default()
            },
            ..Self::default()
        }
    }

    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Number of frequency bins an analyser with this FFT size produces
    pub fn bin_count(&self) -> usize {
        (self.fft_size / 2) as usize
    }

    /// Check invariants the players rely on
    pub fn validate(&self) -> Result<()> {
        if self.players.is_empty() {
            return Err(Error::config("at least one player is required"));
        }

        let mut seen = HashSet::new();
        for player in &self.players {
            if player.element_id.trim().is_empty() {
                return Err(Error::config("player element id must not be empty"));
            }
            if !seen.insert(player.element_id.as_str()) {
                return Err(Error::config(format!(
                    "duplicate player element id: {}",
                    player.element_id
                )));
            }
        }

        if !(self.bars.bar_width.is_finite() && self.bars.bar_width > 0.0) {
            return Err(Error::config("bar_width must be positive"));
        }
        if !(self.bars.bar_gap.is_finite() && self.bars.bar_gap >= 0.0) {
            return Err(Error::config("bar_gap must not be negative"));
        }

        // Web Audio only accepts powers of two in this range
        if !self.fft_size.is_power_of_two() || !(32..=32768).contains(&self.fft_size) {
            return Err(Error::config(format!(
                "fft_size must be a power of two in 32..=32768, got {}",
                self.fft_size
            )));
        }

        if self.fullscreen.duration_ms == 0 {
            return Err(Error::config("fullscreen duration_ms must be positive"));
        }
        // classList rejects empty tokens and tokens containing whitespace
        let class_name = &self.fullscreen.class_name;
        if class_name.is_empty() || class_name.chars().any(char::is_whitespace) {
            return Err(Error::config(format!(
                "fullscreen class_name must be a single class token, got {class_name:?}"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WallConfig::default();
        assert_eq!(config.players.len(), 4);
        assert_eq!(config.players[0].element_id, "video-1");
        assert_eq!(config.fft_size, 1024);
        assert_eq!(config.bin_count(), 512);
        assert_eq!(config.bars.stride(), 3.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_applies_defaults() {
        let json = r#"{
            "players": [
                { "element_id": "tile", "manifest_url": "https://cdn.example.com/live/master.m3u8" }
            ]
        }"#;
        let config = WallConfig::from_json(json).unwrap();
        assert_eq!(config.players.len(), 1);
        assert_eq!(config.bars, BarChartConfig::default());
        assert_eq!(config.fullscreen.duration_ms, 300);
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let mut config = WallConfig::default();
        config.players[1].element_id = "video-1".to_string();
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_bad_fft_size() {
        let mut config = WallConfig::default();
        config.fft_size = 1000;
        assert!(config.validate().is_err());
        config.fft_size = 16;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_url() {
        let json = r#"{ "players": [ { "element_id": "a", "manifest_url": "not a url" } ] }"#;
        assert!(matches!(WallConfig::from_json(json), Err(Error::Json(_))));
        assert!(matches!(
            PlayerConfig::new("a", "::"),
            Err(Error::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_transition_css() {
        assert_eq!(
            FullscreenConfig::default().transition_css(),
            "transform 300ms ease-in-out"
        );
    }

    #[test]
    fn test_presets_are_valid() {
        let low = WallConfig::low_power();
        assert!(low.validate().is_ok());
        assert_eq!(low.bin_count(), 128);
        assert_eq!(low.bars.stride(), 6.0);

        let showcase = WallConfig::showcase();
        assert!(showcase.validate().is_ok());
        assert_eq!(showcase.bin_count(), 2048);
        assert_eq!(showcase.fullscreen.transition_css(), "transform 500ms ease-in-out");
        assert_eq!(showcase.players, WallConfig::default().players);
    }

    #[test]
    fn test_rejects_bad_fullscreen_class() {
        for class_name in ["", "   ", "player full"] {
            let mut config = WallConfig::default();
            config.fullscreen.class_name = class_name.to_string();
            assert!(
                matches!(config.validate(), Err(Error::InvalidConfig(_))),
                "accepted {class_name:?}"
            );
        }
    }
}
