//! Integration tests for Spectra Core

use spectra_core::{
    bars::{bar_height, sample_index},
    compute_collapse_transform, compute_expand_transform, BarChartConfig, BarRenderer,
    FrequencySource, FullscreenState, PlaybackStrategy, PlayerState, RasterSurface, Rect,
    SettingsAction,
    StyleOp, StyleTarget, Viewport, Visualizer, WallConfig,
};
use std::cell::RefCell;
use std::rc::Rc;

// =============================================================================
// Test doubles
// =============================================================================

/// Analyser stand-in returning a fixed spectrum
#[derive(Clone)]
struct FixedSpectrum(Vec<u8>);

impl FrequencySource for FixedSpectrum {
    fn bin_count(&self) -> usize {
        self.0.len()
    }

    fn fill(&self, bins: &mut [u8]) {
        bins.copy_from_slice(&self.0);
    }
}

/// Canvas stand-in recording filled rectangles
#[derive(Default)]
struct RecordingCanvas {
    size: (u32, u32),
    clears: usize,
    rects: Vec<(f64, f64, f64, f64)>,
}

impl RasterSurface for RecordingCanvas {
    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        self.rects.clear();
    }

    fn clear(&mut self, _width: f64, _height: f64) {
        self.clears += 1;
        self.rects.clear();
    }

    fn set_fill_style(&mut self, _color: &str) {}

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.rects.push((x, y, width, height));
    }
}

/// Tile stand-in with a fixed layout slot
struct Tile {
    layout: Rect,
    viewport: Viewport,
    ops: Rc<RefCell<Vec<StyleOp>>>,
}

impl StyleTarget for Tile {
    fn bounding_rect(&self) -> Rect {
        self.layout
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn apply(&mut self, op: &StyleOp) {
        self.ops.borrow_mut().push(op.clone());
    }
}

fn ramp(bins: usize) -> Vec<u8> {
    (0..bins).map(|i| (i * 255 / bins.max(1)) as u8).collect()
}

// =============================================================================
// Bar rendering
// =============================================================================

#[test]
fn test_bins_sampled_per_bar() {
    let bins = 512;
    let spectrum = ramp(bins);
    let mut visualizer = Visualizer::new(BarRenderer::default());
    visualizer.attach(FixedSpectrum(spectrum.clone()));

    let mut canvas = RecordingCanvas::default();
    let drawn = visualizer.tick(&mut canvas, 640.0, 90.0).unwrap();
    assert_eq!(drawn, 213);
    assert_eq!(canvas.size, (640, 90));

    for (i, rect) in canvas.rects.iter().enumerate() {
        let bin = sample_index(i, bins, drawn);
        assert_eq!(bin, i * bins / drawn);
        let expected = bar_height(spectrum[bin], 90.0);
        assert!((rect.3 - expected).abs() < 1e-9);
        assert!((rect.1 + rect.3 - 90.0).abs() < 1e-9, "bar must touch the bottom edge");
        assert_eq!(rect.0, i as f64 * 3.0);
        assert_eq!(rect.2, 2.0);
    }
}

#[test]
fn test_full_scale_and_silence() {
    let mut visualizer = Visualizer::new(BarRenderer::default());
    visualizer.attach(FixedSpectrum(vec![255, 0]));

    let mut canvas = RecordingCanvas::default();
    visualizer.tick(&mut canvas, 6.0, 40.0).unwrap();
    assert_eq!(canvas.rects, vec![(0.0, 0.0, 2.0, 40.0), (3.0, 40.0, 2.0, 0.0)]);
}

#[test]
fn test_narrow_container_draws_nothing() {
    let mut visualizer = Visualizer::new(BarRenderer::new(BarChartConfig {
        bar_width: 4.0,
        bar_gap: 2.0,
        ..Default::default()
    }));
    visualizer.attach(FixedSpectrum(vec![200; 512]));

    let mut canvas = RecordingCanvas::default();
    assert_eq!(visualizer.tick(&mut canvas, 5.9, 40.0).unwrap(), 0);
    assert!(canvas.rects.is_empty());
    assert_eq!(canvas.clears, 1);
}

#[test]
fn test_resize_between_frames() {
    let mut visualizer = Visualizer::new(BarRenderer::default());
    visualizer.attach(FixedSpectrum(vec![128; 512]));

    let mut canvas = RecordingCanvas::default();
    assert_eq!(visualizer.tick(&mut canvas, 300.0, 50.0).unwrap(), 100);
    assert_eq!(visualizer.tick(&mut canvas, 150.0, 50.0).unwrap(), 50);
    assert_eq!(canvas.rects.len(), 50);
    assert_eq!(canvas.size, (150, 50));
}

// =============================================================================
// Geometry
// =============================================================================

#[test]
fn test_expand_transform_scenario() {
    let rect = Rect::new(100.0, 50.0, 200.0, 100.0);
    let t = compute_expand_transform(&rect, &Viewport::new(800.0, 600.0)).unwrap();
    assert_eq!((t.scale_x, t.scale_y), (4.0, 6.0));
    assert!((t.translate_x - 50.0).abs() < 1e-9);
    assert!((t.translate_y - 33.333_333_333).abs() < 1e-6);
}

#[test]
fn test_expand_then_collapse() {
    let rect = Rect::new(12.0, 400.0, 320.0, 180.0);
    let viewport = Viewport::new(1440.0, 900.0);
    let expand = compute_expand_transform(&rect, &viewport).unwrap();

    assert!(expand.is_finite());
    assert!(expand.scale_x * expand.scale_y != 0.0);

    let screen = expand.project(&rect);
    assert!(screen.x.abs() < 1e-9 && screen.y.abs() < 1e-9);

    let collapsed = compute_collapse_transform().project(&rect);
    assert_eq!(collapsed, rect);
}

// =============================================================================
// Player
// =============================================================================

#[test]
fn test_player_fullscreen_cycle() {
    let wall = WallConfig::default();
    let mut player = PlayerState::new(&wall.players[1], &wall);
    let ops = Rc::new(RefCell::new(Vec::new()));
    let mut tile = Tile {
        layout: Rect::new(400.0, 0.0, 400.0, 300.0),
        viewport: Viewport::new(800.0, 600.0),
        ops: Rc::clone(&ops),
    };

    assert_eq!(player.toggle_fullscreen(&mut tile).unwrap(), FullscreenState::Expanding);
    assert!(player.toggle_fullscreen(&mut tile).is_err());
    assert!(!player.on_transition_end(&mut tile, "filter"));
    assert!(player.on_transition_end(&mut tile, "transform"));
    assert_eq!(player.fullscreen_state(), FullscreenState::Expanded);

    assert_eq!(player.toggle_fullscreen(&mut tile).unwrap(), FullscreenState::Collapsing);
    assert!(player.on_transition_end(&mut tile, "transform"));
    assert_eq!(player.fullscreen_state(), FullscreenState::Idle);
    assert!(ops.borrow().contains(&StyleOp::AddClass("player--fullscreen".into())));
}

#[test]
fn test_single_tile_wall_never_locks_fullscreen() {
    let wall = WallConfig::default();
    let mut player = PlayerState::new(&wall.players[0], &wall);
    let mut tile = Tile {
        layout: Rect::new(0.0, 0.0, 800.0, 600.0),
        viewport: Viewport::new(800.0, 600.0),
        ops: Rc::new(RefCell::new(Vec::new())),
    };

    // No transform change means no transitionend will ever arrive
    for _ in 0..3 {
        assert_eq!(player.toggle_fullscreen(&mut tile).unwrap(), FullscreenState::Expanded);
        assert_eq!(player.toggle_fullscreen(&mut tile).unwrap(), FullscreenState::Idle);
    }
}

#[test]
fn test_cancelled_transition_unblocks_toggle() {
    let wall = WallConfig::default();
    let mut player = PlayerState::new(&wall.players[2], &wall);
    let mut tile = Tile {
        layout: Rect::new(0.0, 300.0, 400.0, 300.0),
        viewport: Viewport::new(800.0, 600.0),
        ops: Rc::new(RefCell::new(Vec::new())),
    };

    player.toggle_fullscreen(&mut tile).unwrap();
    assert!(player.on_transition_cancel(&mut tile, "transform"));
    assert_eq!(player.fullscreen_state(), FullscreenState::Expanded);
    assert_eq!(player.toggle_fullscreen(&mut tile).unwrap(), FullscreenState::Collapsing);
}

#[test]
fn test_reset_action_restores_neutral_filters() {
    let wall = WallConfig::default();
    let mut player = PlayerState::new(&wall.players[3], &wall);

    player.set_setting("brightness", 250.0).unwrap();
    player.set_setting("contrast", 20.0).unwrap();
    assert_eq!(
        player.trigger("reset").unwrap(),
        SettingsAction::ApplyFilter("brightness(100%) contrast(100%)".into())
    );
    assert_eq!(player.filter_css(), "brightness(100%) contrast(100%)");
}

#[test]
fn test_settings_do_not_touch_rendering_or_playback() {
    let wall = WallConfig::default();
    let mut player = PlayerState::new(&wall.players[0], &wall);
    player.select_playback(true, "");
    assert!(player.on_ready());

    let spectrum = ramp(512);
    let mut visualizer = Visualizer::new(BarRenderer::new(wall.bars.clone()));
    visualizer.attach(FixedSpectrum(spectrum));

    let mut before = RecordingCanvas::default();
    visualizer.tick(&mut before, 200.0, 60.0).unwrap();

    player.set_setting("brightness", 250.0).unwrap();
    player.set_setting("contrast", 30.0).unwrap();

    let mut after = RecordingCanvas::default();
    visualizer.tick(&mut after, 200.0, 60.0).unwrap();

    assert_eq!(before.rects, after.rects);
    assert_eq!(player.strategy(), Some(PlaybackStrategy::Adaptive));
    assert!(!player.on_ready());
    assert_eq!(player.fullscreen_state(), FullscreenState::Idle);
    assert_eq!(player.filter_css(), "brightness(250%) contrast(30%)");
}

#[test]
fn test_config_round_trip_through_json() {
    let config = WallConfig::default();
    let parsed = WallConfig::from_json(&config.to_json()).unwrap();
    assert_eq!(parsed, config);
}
