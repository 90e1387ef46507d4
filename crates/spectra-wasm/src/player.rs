//! One video tile wired to the browser
//!
//! Event handlers hold a `Weak` to the shared player state, so dropping the
//! [`VideoPlayer`] releases everything even while callbacks are registered.

use crate::{
    audio::{AnalyserSource, AudioGraph},
    canvas::CanvasSurface,
    dom::{self, query, EventListener},
    frame_loop::FrameLoop,
    settings::{ActionHandler, ChangeHandler, SettingsView},
    stream::{hls_supported, StreamSession},
    style::ElementStyle,
};
use anyhow::{anyhow, Context};
use spectra_core::{
    config::{BARS_SELECTOR, CONTROLS_SELECTOR, VIDEO_SELECTOR},
    BarRenderer, Error, PlayerConfig, PlayerState, SettingsAction, VideoFilters, Visualizer,
    WallConfig,
};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::{debug, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Element, EventTarget, HtmlElement, HtmlVideoElement, TransitionEvent, Window};

struct Inner {
    state: PlayerState,
    window: Window,
    style: ElementStyle,
    video: HtmlVideoElement,
    canvas: CanvasSurface,
    visualizer: Visualizer<AnalyserSource>,
    audio: Option<AudioGraph>,
    frame_loop: Option<FrameLoop>,
    fft_size: u32,
}

impl Inner {
    fn id(&self) -> &str {
        self.state.id().as_str()
    }

    fn on_ready(&mut self) {
        if self.state.on_ready() {
            self.play();
        }
    }

    fn play(&self) {
        let player = self.id().to_string();
        match self.video.play() {
            Ok(promise) => wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = JsFuture::from(promise).await {
                    // Autoplay policies reject unmuted playback without a gesture
                    warn!(player = %player, error = ?e, "Playback was rejected");
                }
            }),
            Err(e) => warn!(player = %player, error = ?e, "play() failed"),
        }
    }

    /// First volume change builds the audio graph and starts the equalizer
    fn on_volume_change(&mut self, this: Weak<RefCell<Inner>>) {
        if !self.state.on_volume_change() {
            return;
        }

        let graph = match AudioGraph::connect(&self.video, self.fft_size) {
            Ok(graph) => graph,
            Err(e) => {
                warn!(player = %self.id(), error = %e, "Audio graph unavailable, equalizer disabled");
                return;
            }
        };
        self.visualizer.attach(graph.frequency_source());
        self.audio = Some(graph);

        let tick = move || {
            if let Some(inner) = this.upgrade() {
                inner.borrow_mut().render_frame();
            }
        };
        match FrameLoop::start(self.window.clone(), tick) {
            Ok(frame_loop) => self.frame_loop = Some(frame_loop),
            Err(e) => warn!(player = %self.id(), error = %e, "Equalizer loop failed to start"),
        }
    }

    fn render_frame(&mut self) {
        let (width, height) = self.canvas.container_size();
        if let Err(e) = self.visualizer.tick(&mut self.canvas, width, height) {
            debug!(player = %self.id(), error = %e, "Skipped equalizer frame");
        }
    }

    /// Apply a slider change; returns the normalized value
    fn set_setting(&mut self, name: &str, value: f64) -> Option<f64> {
        let css = match self.state.set_setting(name, value) {
            Ok(css) => css,
            Err(e) => {
                warn!(player = %self.id(), error = %e, "Setting rejected");
                return None;
            }
        };
        self.apply_filter(&css);
        self.state.settings().value(name).ok()
    }

    fn apply_filter(&self, css: &str) {
        if let Err(e) = self.video.style().set_property("filter", css) {
            warn!(player = %self.id(), error = ?e, "Failed to apply filter");
        }
    }

    /// Run a panel action; returns the filters the panel should show
    fn trigger(&mut self, name: &str) -> Option<VideoFilters> {
        match self.state.trigger(name) {
            Ok(SettingsAction::ToggleFullscreen) => self.toggle_fullscreen(),
            Ok(SettingsAction::ApplyFilter(css)) => self.apply_filter(&css),
            Err(e) => {
                warn!(player = %self.id(), error = %e, "Unknown action");
                return None;
            }
        }
        Some(*self.state.settings().filters())
    }

    fn toggle_fullscreen(&mut self) {
        let Inner { state, style, .. } = self;
        match state.toggle_fullscreen(style) {
            Ok(next) => debug!(player = %state.id(), state = %next, "Fullscreen toggled"),
            Err(e @ Error::TransitionInProgress { .. }) => {
                debug!(player = %state.id(), error = %e, "Fullscreen toggle ignored")
            }
            Err(e) => warn!(player = %state.id(), error = %e, "Fullscreen unavailable"),
        }
    }

    fn on_transition_end(&mut self, property: &str) {
        let Inner { state, style, .. } = self;
        state.on_transition_end(style, property);
    }

    fn on_transition_cancel(&mut self, property: &str) {
        let Inner { state, style, .. } = self;
        state.on_transition_cancel(style, property);
    }

    fn teardown(&mut self) {
        if let Some(mut frame_loop) = self.frame_loop.take() {
            frame_loop.stop();
        }
        self.visualizer.detach();
        if let Some(audio) = self.audio.take() {
            audio.close();
        }
        let Inner { state, style, .. } = self;
        state.teardown(style);
    }
}

/// A mounted player tile
pub struct VideoPlayer {
    id: String,
    inner: Rc<RefCell<Inner>>,
    stream: Option<StreamSession>,
    settings: Option<SettingsView>,
    listeners: Vec<EventListener>,
    destroyed: bool,
}

impl VideoPlayer {
    /// Build a player inside the element `player.element_id`
    pub fn mount(player: &PlayerConfig, wall: &WallConfig) -> anyhow::Result<Self> {
        let window = dom::window()?;
        let document = dom::document()?;

        let element = document
            .get_element_by_id(&player.element_id)
            .with_context(|| format!("no element #{}", player.element_id))?;
        let video: HtmlVideoElement = query(&element, VIDEO_SELECTOR)?;
        let controls: Element = query(&element, CONTROLS_SELECTOR)?;
        let canvas = CanvasSurface::new(query(&element, BARS_SELECTOR)?)?;
        let tile: HtmlElement = element
            .dyn_into()
            .map_err(|_| anyhow!("#{} is not an HTML element", player.element_id))?;

        let state = PlayerState::new(player, wall);
        let inner = Rc::new(RefCell::new(Inner {
            state,
            window: window.clone(),
            style: ElementStyle::new(tile.clone(), window),
            video: video.clone(),
            canvas,
            visualizer: Visualizer::new(BarRenderer::new(wall.bars.clone())),
            audio: None,
            frame_loop: None,
            fft_size: wall.fft_size,
        }));

        {
            let inner = inner.borrow();
            inner.apply_filter(&inner.state.filter_css());
        }

        let mut listeners = Vec::new();

        let weak = Rc::downgrade(&inner);
        listeners.push(EventListener::new(&video, "volumechange", move |_| {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().on_volume_change(Rc::downgrade(&inner));
            }
        })?);

        let transition_handlers: [(&'static str, fn(&mut Inner, &str)); 2] = [
            ("transitionend", Inner::on_transition_end),
            ("transitioncancel", Inner::on_transition_cancel),
        ];
        for (event_name, handler) in transition_handlers {
            let weak = Rc::downgrade(&inner);
            let tile_target: EventTarget = tile.clone().into();
            listeners.push(EventListener::new(&tile, event_name, move |event| {
                // Transitions of children bubble up too
                if event.target().as_ref() != Some(&tile_target) {
                    return;
                }
                let Some(event) = event.dyn_ref::<TransitionEvent>() else {
                    return;
                };
                if let Some(inner) = weak.upgrade() {
                    handler(&mut inner.borrow_mut(), &event.property_name());
                }
            })?);
        }

        let weak = Rc::downgrade(&inner);
        let on_change: ChangeHandler = Rc::new(move |name, value| {
            let inner = weak.upgrade()?;
            let applied = inner.borrow_mut().set_setting(name, value);
            applied
        });
        let weak = Rc::downgrade(&inner);
        let on_action: ActionHandler = Rc::new(move |name| {
            let inner = weak.upgrade()?;
            let filters = inner.borrow_mut().trigger(name);
            filters
        });
        // Playback and the equalizer still work without a panel
        let settings = match SettingsView::mount(
            &controls,
            inner.borrow().state.settings(),
            on_change,
            on_action,
        ) {
            Ok(view) => Some(view),
            Err(e) => {
                warn!(player = %player.element_id, error = %describe(&e), "Settings panel unavailable");
                None
            }
        };

        let strategy = inner
            .borrow_mut()
            .state
            .select_playback(hls_supported(), &StreamSession::probe_native(&video));
        let weak = Rc::downgrade(&inner);
        let stream = StreamSession::open(
            strategy,
            &video,
            player.manifest_url.as_str(),
            player.element_id.clone(),
            move || {
                if let Some(inner) = weak.upgrade() {
                    inner.borrow_mut().on_ready();
                }
            },
        )?;

        info!(player = %player.element_id, %strategy, "Player mounted");

        Ok(Self {
            id: player.element_id.clone(),
            inner,
            stream: Some(stream),
            settings,
            listeners,
            destroyed: false,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn play(&self) {
        self.inner.borrow().play();
    }

    pub fn toggle_fullscreen(&self) {
        self.inner.borrow_mut().toggle_fullscreen();
    }

    /// Change a setting from code, as if its slider moved
    pub fn set_setting(&self, name: &str, value: f64) -> anyhow::Result<f64> {
        self.inner
            .borrow_mut()
            .set_setting(name, value)
            .ok_or_else(|| anyhow!("setting {name} was rejected"))
    }

    pub fn filter_css(&self) -> String {
        self.inner.borrow().state.filter_css()
    }

    pub fn fullscreen_state(&self) -> String {
        self.inner.borrow().state.fullscreen_state().to_string()
    }

    /// Number of equalizer frames drawn so far
    pub fn frames(&self) -> u64 {
        self.inner
            .borrow()
            .frame_loop
            .as_ref()
            .map(FrameLoop::ticks)
            .unwrap_or(0)
    }

    /// Stop rendering, release audio and streaming, and remove the panel
    pub fn destroy(&mut self) {
        if std::mem::replace(&mut self.destroyed, true) {
            return;
        }
        self.listeners.clear();
        self.settings.take();
        if let Some(mut stream) = self.stream.take() {
            stream.close();
        }
        self.inner.borrow_mut().teardown();
    }
}

impl Drop for VideoPlayer {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Convert a mount failure into a loggable string with its causes
pub(crate) fn describe(err: &anyhow::Error) -> String {
    format!("{err:#}")
}
