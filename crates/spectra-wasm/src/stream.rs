//! Streaming source: hls.js when available, native HLS otherwise
//!
//! hls.js is loaded by the host page as the global `Hls`. If the script is
//! missing, the bindings report "unsupported" instead of throwing.

use crate::dom::EventListener;
use js_sys::{Function, Reflect};
use spectra_core::{
    playback::{LOADED_METADATA_EVENT, MANIFEST_PARSED_EVENT},
    PlaybackStrategy, HLS_MIME_TYPE,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlVideoElement;

/// hls.js error event
const ERROR_EVENT: &str = "hlsError";

#[wasm_bindgen]
extern "C" {
    /// hls.js client instance
    pub type Hls;

    #[wasm_bindgen(static_method_of = Hls, js_name = isSupported, catch)]
    fn is_supported() -> Result<bool, JsValue>;

    #[wasm_bindgen(constructor, catch)]
    fn new() -> Result<Hls, JsValue>;

    #[wasm_bindgen(method, js_name = loadSource)]
    fn load_source(this: &Hls, url: &str);

    #[wasm_bindgen(method, js_name = attachMedia)]
    fn attach_media(this: &Hls, media: &HtmlVideoElement);

    #[wasm_bindgen(method)]
    fn on(this: &Hls, event: &str, callback: &Function);

    #[wasm_bindgen(method)]
    fn off(this: &Hls, event: &str, callback: &Function);

    #[wasm_bindgen(method)]
    fn destroy(this: &Hls);
}

/// Whether the global hls.js is present and supported here
pub fn hls_supported() -> bool {
    Hls::is_supported().unwrap_or(false)
}

enum StreamKind {
    Adaptive {
        hls: Hls,
        on_ready: Closure<dyn FnMut()>,
        on_error: Closure<dyn FnMut(JsValue, JsValue)>,
    },
    Native {
        _on_ready: EventListener,
    },
    Idle,
}

/// The running stream of one player
pub struct StreamSession {
    kind: StreamKind,
}

impl StreamSession {
    /// Attach `url` to `video` using `strategy`; `on_ready` fires when playback may start
    pub fn open<F>(
        strategy: PlaybackStrategy,
        video: &HtmlVideoElement,
        url: &str,
        player: String,
        on_ready: F,
    ) -> anyhow::Result<Self>
    where
        F: FnMut() + 'static,
    {
        let kind = match strategy {
            PlaybackStrategy::Adaptive => {
                let hls = Hls::new().map_err(crate::dom::js_error)?;
                let on_ready = Closure::wrap(Box::new(on_ready) as Box<dyn FnMut()>);
                let on_error = Closure::wrap(Box::new(move |_event: JsValue, data: JsValue| {
                    let fatal = Reflect::get(&data, &"fatal".into())
                        .ok()
                        .and_then(|v| v.as_bool())
                        .unwrap_or(false);
                    let details = Reflect::get(&data, &"details".into())
                        .ok()
                        .and_then(|v| v.as_string())
                        .unwrap_or_default();
                    if fatal {
                        tracing::error!(player = %player, details = %details, "Fatal stream error");
                    } else {
                        tracing::warn!(player = %player, details = %details, "Stream error");
                    }
                }) as Box<dyn FnMut(JsValue, JsValue)>);

                hls.on(MANIFEST_PARSED_EVENT, on_ready.as_ref().unchecked_ref());
                hls.on(ERROR_EVENT, on_error.as_ref().unchecked_ref());
                hls.load_source(url);
                hls.attach_media(video);

                StreamKind::Adaptive { hls, on_ready, on_error }
            }
            PlaybackStrategy::Native => {
                video.set_src(url);
                let mut on_ready = on_ready;
                let listener = EventListener::new(video, LOADED_METADATA_EVENT, move |_| on_ready())?;
                StreamKind::Native { _on_ready: listener }
            }
            PlaybackStrategy::Unsupported => StreamKind::Idle,
        };

        Ok(Self { kind })
    }

    /// MIME type to probe with `canPlayType`
    pub fn probe_native(video: &HtmlVideoElement) -> String {
        video.can_play_type(HLS_MIME_TYPE)
    }

    /// Stop streaming and release the hls.js instance
    pub fn close(&mut self) {
        if let StreamKind::Adaptive { hls, on_ready, on_error } =
            std::mem::replace(&mut self.kind, StreamKind::Idle)
        {
            hls.off(MANIFEST_PARSED_EVENT, on_ready.as_ref().unchecked_ref());
            hls.off(ERROR_EVENT, on_error.as_ref().unchecked_ref());
            hls.destroy();
        }
    }
}

impl Drop for StreamSession {
    fn drop(&mut self) {
        self.close();
    }
}
