//! Per-player state
//!
//! Everything a tile mutates from its event handlers lives here and is only
//! changed through these methods, each of which returns whatever must be
//! re-applied to the page (filter CSS, fullscreen state). The equalizer side
//! is kept separate in [`Visualizer`] so settings can never reach it.

use crate::{
    bars::{BarRenderer, RasterSurface},
    fullscreen::{FullscreenController, FullscreenState, StyleTarget},
    playback::{PlaybackGate, PlaybackStrategy},
    sampler::{FrequencySampler, FrequencySource},
    settings::{SettingsAction, SettingsPanel},
    PlayerConfig, PlayerId, Result, WallConfig,
};
use tracing::{debug, info, warn};
use url::Url;

/// Mutable state of one player tile
#[derive(Debug, Clone)]
pub struct PlayerState {
    id: PlayerId,
    manifest_url: Url,
    settings: SettingsPanel,
    fullscreen: FullscreenController,
    playback: PlaybackGate,
    strategy: Option<PlaybackStrategy>,
    audio_requested: bool,
}

impl PlayerState {
    pub fn new(player: &PlayerConfig, wall: &WallConfig) -> Self {
        Self {
            id: PlayerId::new(player.element_id.clone()),
            manifest_url: player.manifest_url.clone(),
            settings: SettingsPanel::new(),
            fullscreen: FullscreenController::new(wall.fullscreen.clone()),
            playback: PlaybackGate::new(),
            strategy: None,
            audio_requested: false,
        }
    }

    pub fn id(&self) -> &PlayerId {
        &self.id
    }

    pub fn manifest_url(&self) -> &Url {
        &self.manifest_url
    }

    pub fn settings(&self) -> &SettingsPanel {
        &self.settings
    }

    pub fn strategy(&self) -> Option<PlaybackStrategy> {
        self.strategy
    }

    /// Decide and remember how this player streams
    pub fn select_playback(&mut self, hls_supported: bool, can_play_type: &str) -> PlaybackStrategy {
        let strategy = PlaybackStrategy::select(hls_supported, can_play_type);
        match strategy {
            PlaybackStrategy::Unsupported => {
                warn!(player = %self.id, "No HLS playback available, player stays idle");
            }
            _ => info!(player = %self.id, url = %self.manifest_url, %strategy, "Playback selected"),
        }
        self.strategy = Some(strategy);
        strategy
    }

    /// Stream is ready; true when `play()` should be called now
    pub fn on_ready(&mut self) -> bool {
        let start = self.playback.on_ready();
        if start {
            debug!(player = %self.id, "Stream ready, starting playback");
        }
        start
    }

    /// Volume changed; true when the audio graph must be built now
    pub fn on_volume_change(&mut self) -> bool {
        if self.audio_requested {
            return false;
        }
        self.audio_requested = true;
        debug!(player = %self.id, "Initializing audio graph");
        true
    }

    pub fn audio_requested(&self) -> bool {
        self.audio_requested
    }

    /// Change a slider; returns the CSS filter to apply
    pub fn set_setting(&mut self, name: &str, value: f64) -> Result<String> {
        self.settings.set(name, value)?;
        Ok(self.settings.filter_css())
    }

    pub fn trigger(&mut self, name: &str) -> Result<SettingsAction> {
        self.settings.trigger(name)
    }

    pub fn filter_css(&self) -> String {
        self.settings.filter_css()
    }

    pub fn fullscreen_state(&self) -> FullscreenState {
        self.fullscreen.state()
    }

    pub fn toggle_fullscreen<T: StyleTarget + ?Sized>(&mut self, target: &mut T) -> Result<FullscreenState> {
        self.fullscreen.toggle(target)
    }

    pub fn on_transition_end<T: StyleTarget + ?Sized>(&mut self, target: &mut T, property: &str) -> bool {
        self.fullscreen.on_transition_end(target, property)
    }

    pub fn on_transition_cancel<T: StyleTarget + ?Sized>(&mut self, target: &mut T, property: &str) -> bool {
        self.fullscreen.on_transition_cancel(target, property)
    }

    /// Undo page-visible state before the player goes away
    pub fn teardown<T: StyleTarget + ?Sized>(&mut self, target: &mut T) {
        self.fullscreen.reset(target);
        info!(player = %self.id, "Player torn down");
    }
}

/// Equalizer pipeline: sample, then paint
pub struct Visualizer<S> {
    sampler: FrequencySampler<S>,
    renderer: BarRenderer,
}

impl<S: FrequencySource> Visualizer<S> {
    pub fn new(renderer: BarRenderer) -> Self {
        Self {
            sampler: FrequencySampler::new(),
            renderer,
        }
    }

    pub fn attach(&mut self, source: S) {
        self.sampler.attach(source);
    }

    pub fn detach(&mut self) -> Option<S> {
        self.sampler.detach()
    }

    pub fn is_active(&self) -> bool {
        self.sampler.is_attached()
    }

    /// Run one frame against a container of `width` x `height`
    pub fn tick<R: RasterSurface + ?Sized>(&mut self, surface: &mut R, width: f64, height: f64) -> Result<usize> {
        let snapshot = self.sampler.sample()?;
        Ok(self.renderer.render(surface, snapshot, width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn state() -> PlayerState {
        let wall = WallConfig::default();
        PlayerState::new(&wall.players[0], &wall)
    }

    #[test]
    fn test_lazy_audio_init_once() {
        let mut player = state();
        assert!(!player.audio_requested());
        assert!(player.on_volume_change());
        assert!(!player.on_volume_change());
        assert!(player.audio_requested());
    }

    #[test]
    fn test_play_once() {
        let mut player = state();
        assert_eq!(player.select_playback(false, "maybe"), PlaybackStrategy::Native);
        assert!(player.on_ready());
        assert!(!player.on_ready());
    }

    #[test]
    fn test_settings_produce_filter() {
        let mut player = state();
        assert_eq!(player.filter_css(), "brightness(100%) contrast(100%)");
        assert_eq!(
            player.set_setting("contrast", 200.0).unwrap(),
            "brightness(100%) contrast(200%)"
        );
        assert!(matches!(player.set_setting("hue", 1.0), Err(Error::UnknownSetting(_))));
    }

    #[test]
    fn test_visualizer_requires_audio() {
        struct Silent;
        impl FrequencySource for Silent {
            fn bin_count(&self) -> usize {
                512
            }
            fn fill(&self, bins: &mut [u8]) {
                bins.fill(0);
            }
        }
        struct Null;
        impl RasterSurface for Null {
            fn resize(&mut self, _: u32, _: u32) {}
            fn clear(&mut self, _: f64, _: f64) {}
            fn set_fill_style(&mut self, _: &str) {}
            fn fill_rect(&mut self, _: f64, _: f64, _: f64, _: f64) {}
        }

        let mut visualizer: Visualizer<Silent> = Visualizer::new(BarRenderer::default());
        assert!(matches!(
            visualizer.tick(&mut Null, 300.0, 50.0),
            Err(Error::AudioGraphNotInitialized)
        ));

        visualizer.attach(Silent);
        assert_eq!(visualizer.tick(&mut Null, 300.0, 50.0).unwrap(), 100);
    }
}
