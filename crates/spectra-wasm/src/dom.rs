//! Small DOM helpers shared by the player pieces

use anyhow::{anyhow, Context};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, Window};

/// Turn a thrown `JsValue` into an `anyhow` error
pub fn js_error(value: JsValue) -> anyhow::Error {
    match value.as_string() {
        Some(message) => anyhow!(message),
        None => anyhow!("{:?}", value),
    }
}

/// Turn an error into something `wasm-bindgen` can throw
pub fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

pub fn window() -> anyhow::Result<Window> {
    web_sys::window().ok_or_else(|| anyhow!("no window"))
}

pub fn document() -> anyhow::Result<Document> {
    window()?.document().ok_or_else(|| anyhow!("no document"))
}

/// First descendant of `parent` matching `selector`, cast to `T`
pub fn query<T: JsCast>(parent: &Element, selector: &str) -> anyhow::Result<T> {
    parent
        .query_selector(selector)
        .map_err(js_error)?
        .with_context(|| format!("missing {selector}"))?
        .dyn_into::<T>()
        .map_err(|_| anyhow!("{selector} has the wrong element type"))
}

/// Event listener removed again when dropped
pub struct EventListener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl EventListener {
    pub fn new<F>(target: &EventTarget, event: &'static str, callback: F) -> anyhow::Result<Self>
    where
        F: FnMut(Event) + 'static,
    {
        let closure = Closure::wrap(Box::new(callback) as Box<dyn FnMut(Event)>);
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(js_error)
            .with_context(|| format!("failed to listen for {event}"))?;

        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}
