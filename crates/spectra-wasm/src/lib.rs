//! Spectra WASM - browser video wall
//!
//! Mounts one independent player per configured tile:
//! - HLS playback through hls.js, or natively where the browser supports it
//! - A frequency-bar equalizer drawn on the tile's canvas every frame
//! - A settings panel with brightness/contrast sliders and a fullscreen action
//! - An animated fullscreen transition
//!
//! ## Usage
//!
//! ```javascript
//! import init, { SpectraWall } from '@spectra/wasm';
//!
//! await init();
//! const wall = new SpectraWall();            // built-in demo tiles
//! const custom = SpectraWall.fromJson(json); // or your own configuration
//! ```
//!
//! The page must load hls.js (global `Hls`) and provide, for each tile, an
//! element containing `.player__video`, `.player__controls` and `.player__bars`.

use wasm_bindgen::prelude::*;

mod audio;
mod canvas;
mod dom;
mod frame_loop;
mod logging;
mod player;
mod settings;
mod stream;
mod style;

use dom::to_js;
use player::{describe, VideoPlayer};
use spectra_core::WallConfig;
use tracing::{info, warn};

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    logging::init(tracing::Level::INFO);
    spectra_core::init();
}

/// Library version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Default wall configuration as JSON, handy as a starting point
#[wasm_bindgen(js_name = defaultConfigJson)]
pub fn default_config_json() -> String {
    WallConfig::default().to_json()
}

/// All players on the page
#[wasm_bindgen]
pub struct SpectraWall {
    players: Vec<VideoPlayer>,
}

#[wasm_bindgen]
impl SpectraWall {
    /// Mount every tile; `config` is an optional plain JS object
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<SpectraWall, JsValue> {
        let config = if config.is_undefined() || config.is_null() {
            WallConfig::default()
        } else {
            let config: WallConfig = serde_wasm_bindgen::from_value(config).map_err(to_js)?;
            config.validate().map_err(to_js)?;
            config
        };
        Ok(Self::mount(&config))
    }

    /// Mount from a JSON configuration string
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str) -> Result<SpectraWall, JsValue> {
        let config = WallConfig::from_json(json).map_err(to_js)?;
        Ok(Self::mount(&config))
    }

    /// Demo tiles with wide bars and a small FFT
    #[wasm_bindgen(js_name = lowPower)]
    pub fn low_power() -> SpectraWall {
        Self::mount(&WallConfig::low_power())
    }

    /// Demo tiles with thin bars, a large FFT and a slower zoom
    #[wasm_bindgen]
    pub fn showcase() -> SpectraWall {
        Self::mount(&WallConfig::showcase())
    }

    fn mount(config: &WallConfig) -> SpectraWall {
        // A broken tile must not take the others down
        let players: Vec<VideoPlayer> = config
            .players
            .iter()
            .filter_map(|player| match VideoPlayer::mount(player, config) {
                Ok(mounted) => Some(mounted),
                Err(e) => {
                    warn!(player = %player.element_id, error = %describe(&e), "Player not mounted");
                    None
                }
            })
            .collect();

        info!(mounted = players.len(), configured = config.players.len(), "Wall ready");
        SpectraWall { players }
    }

    /// Number of mounted players
    #[wasm_bindgen(getter)]
    pub fn size(&self) -> usize {
        self.players.len()
    }

    /// Ids of the mounted players
    #[wasm_bindgen]
    pub fn ids(&self) -> Vec<String> {
        self.players.iter().map(|p| p.id().to_string()).collect()
    }

    fn player(&self, id: &str) -> Result<&VideoPlayer, JsValue> {
        self.players
            .iter()
            .find(|p| p.id() == id)
            .ok_or_else(|| JsValue::from_str(&format!("no player {id}")))
    }

    #[wasm_bindgen]
    pub fn play(&self, id: &str) -> Result<(), JsValue> {
        self.player(id)?.play();
        Ok(())
    }

    #[wasm_bindgen(js_name = toggleFullscreen)]
    pub fn toggle_fullscreen(&self, id: &str) -> Result<(), JsValue> {
        self.player(id)?.toggle_fullscreen();
        Ok(())
    }

    /// Set "brightness" or "contrast"; returns the value applied after snapping
    #[wasm_bindgen(js_name = setSetting)]
    pub fn set_setting(&self, id: &str, name: &str, value: f64) -> Result<f64, JsValue> {
        self.player(id)?.set_setting(name, value).map_err(to_js)
    }

    #[wasm_bindgen(js_name = filterCss)]
    pub fn filter_css(&self, id: &str) -> Result<String, JsValue> {
        Ok(self.player(id)?.filter_css())
    }

    #[wasm_bindgen(js_name = fullscreenState)]
    pub fn fullscreen_state(&self, id: &str) -> Result<String, JsValue> {
        Ok(self.player(id)?.fullscreen_state())
    }

    /// Equalizer frames drawn by a player
    #[wasm_bindgen]
    pub fn frames(&self, id: &str) -> Result<u64, JsValue> {
        Ok(self.player(id)?.frames())
    }

    /// Tear down every player
    #[wasm_bindgen]
    pub fn destroy(&mut self) {
        for player in &mut self.players {
            player.destroy();
        }
        self.players.clear();
        info!("Wall destroyed");
    }
}
