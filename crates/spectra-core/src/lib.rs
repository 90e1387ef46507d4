//! Spectra Core - platform-independent logic for the Spectra video wall
//!
//! This crate provides everything a player tile needs that does not touch the
//! browser directly:
//! - Frequency sampling from an audio analysis source
//! - Equalizer bar layout and rendering onto a raster surface
//! - Fullscreen geometry (expand / collapse transforms)
//! - Fullscreen transition state machine
//! - Video filters and the settings panel bindings
//! - Render loop control and per-player state
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        Spectra Core                             │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐           │
//! │  │  Frequency   │  │     Bar      │  │   Geometry   │           │
//! │  │   Sampler    │─▶│   Renderer   │  │  Transform   │           │
//! │  └──────────────┘  └──────┬───────┘  └──────┬───────┘           │
//! │                           │                 │                   │
//! │                    ┌──────┴──────┐   ┌──────┴───────┐           │
//! │                    │ Frame Loop  │   │  Fullscreen  │           │
//! │                    │   Control   │   │ State Machine│           │
//! │                    └──────┬──────┘   └──────┬───────┘           │
//! │                           └────────┬────────┘                   │
//! │                             ┌──────┴──────┐  ┌──────────────┐   │
//! │                             │   Player    │──│   Settings   │   │
//! │                             │   State     │  │    Panel     │   │
//! │                             └─────────────┘  └──────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Browser bindings live in `spectra-wasm`, which implements the traits in this
//! crate ([`RasterSurface`], [`FrequencySource`], [`StyleTarget`]) on top of
//! `web-sys`.

pub mod error;
pub mod types;
pub mod config;
pub mod sampler;
pub mod bars;
pub mod geometry;
pub mod fullscreen;
pub mod filters;
pub mod settings;
pub mod frame_loop;
pub mod playback;
pub mod player;

pub use error::{Error, Result};
pub use types::*;
pub use config::{BarChartConfig, FullscreenConfig, PlayerConfig, WallConfig};
pub use sampler::{FrequencySampler, FrequencySource, DEFAULT_FFT_SIZE};
pub use bars::{Bar, BarLayout, BarRenderer, RasterSurface};
pub use geometry::{compute_collapse_transform, compute_expand_transform, Transform};
pub use fullscreen::{FullscreenController, FullscreenState, StyleOp, StyleTarget};
pub use filters::VideoFilters;
pub use settings::{SettingsAction, SettingsPanel, SliderBinding, SliderSpec};
pub use frame_loop::FrameLoopControl;
pub use playback::{PlaybackGate, PlaybackStrategy, HLS_MIME_TYPE};
pub use player::{PlayerState, Visualizer};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log library initialization
pub fn init() {
    tracing::info!(version = VERSION, "Spectra Core initialized");
}
