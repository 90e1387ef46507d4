//! Settings panel on dat.GUI
//!
//! dat.GUI edits plain properties of a JS object, so each panel owns a model
//! object holding one number per slider and one function per action. The
//! sliders are driven from the [`SliderBinding`] getters; changes go back
//! through the player, whose normalized answer is written into the model.

use crate::dom::js_error;
use anyhow::Context;
use js_sys::{Object, Reflect};
use spectra_core::{settings::ACTIONS, SettingsPanel, SliderBinding, VideoFilters};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Element;

#[wasm_bindgen]
extern "C" {
    /// dat.GUI panel, loaded by the host page as `dat.GUI`
    #[wasm_bindgen(js_namespace = dat, js_name = GUI)]
    pub type Gui;

    #[wasm_bindgen(constructor, js_namespace = dat, js_class = "GUI", catch)]
    fn new(options: &Object) -> Result<Gui, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn add(this: &Gui, object: &Object, property: &str) -> Result<Controller, JsValue>;

    #[wasm_bindgen(method, getter, js_name = domElement)]
    fn dom_element(this: &Gui) -> Element;

    #[wasm_bindgen(method)]
    fn destroy(this: &Gui);

    /// One row of a dat.GUI panel
    #[derive(Clone)]
    pub type Controller;

    #[wasm_bindgen(method)]
    fn min(this: &Controller, value: f64) -> Controller;

    #[wasm_bindgen(method)]
    fn max(this: &Controller, value: f64) -> Controller;

    #[wasm_bindgen(method)]
    fn step(this: &Controller, value: f64) -> Controller;

    #[wasm_bindgen(method, js_name = onChange)]
    fn on_change(this: &Controller, callback: &js_sys::Function) -> Controller;

    #[wasm_bindgen(method, js_name = updateDisplay)]
    fn update_display(this: &Controller) -> Controller;
}

/// Called with (setting, raw value); returns the value actually applied
pub type ChangeHandler = Rc<dyn Fn(&'static str, f64) -> Option<f64>>;
/// Called with the action name; returns the filters after the action
pub type ActionHandler = Rc<dyn Fn(&'static str) -> Option<VideoFilters>>;

/// Slider values to show for `filters`
pub fn slider_values(sliders: &[SliderBinding], filters: &VideoFilters) -> Vec<(&'static str, f64)> {
    sliders.iter().map(|s| (s.name, (s.get)(filters))).collect()
}

/// Writes model values and refreshes the matching rows
struct PanelModel {
    model: Object,
    sliders: Vec<(SliderBinding, Controller)>,
}

impl PanelModel {
    fn set(&self, name: &str, value: f64) {
        if let Err(e) = Reflect::set(&self.model, &name.into(), &value.into()) {
            tracing::warn!(setting = name, error = ?e, "Failed to update panel value");
        }
    }

    fn show(&self, filters: &VideoFilters) {
        let bindings: Vec<SliderBinding> = self.sliders.iter().map(|(b, _)| *b).collect();
        for (name, value) in slider_values(&bindings, filters) {
            self.set(name, value);
        }
        for (_, controller) in &self.sliders {
            controller.update_display();
        }
    }
}

pub struct SettingsView {
    gui: Gui,
    _on_change: Vec<Closure<dyn FnMut(JsValue)>>,
    _on_action: Vec<Closure<dyn FnMut()>>,
}

impl SettingsView {
    /// Build the panel and append it to `host`
    pub fn mount(
        host: &Element,
        panel: &SettingsPanel,
        on_change: ChangeHandler,
        on_action: ActionHandler,
    ) -> anyhow::Result<Self> {
        let options = Object::new();
        Reflect::set(&options, &"autoPlace".into(), &JsValue::FALSE).map_err(js_error)?;
        let gui = Gui::new(&options).map_err(js_error).context("dat.GUI is not loaded")?;

        let model = Object::new();
        for (name, value) in slider_values(panel.sliders(), panel.filters()) {
            Reflect::set(&model, &name.into(), &value.into()).map_err(js_error)?;
        }

        let mut sliders = Vec::new();
        for binding in panel.sliders() {
            let controller = gui
                .add(&model, binding.name)
                .map_err(js_error)?
                .min(binding.spec.min)
                .max(binding.spec.max)
                .step(binding.spec.step);
            sliders.push((*binding, controller));
        }
        let display = Rc::new(PanelModel { model, sliders });

        let mut change_closures = Vec::new();
        for (binding, controller) in &display.sliders {
            let name = binding.name;
            let on_change = Rc::clone(&on_change);
            let display_cb = Rc::clone(&display);
            let controller_cb = controller.clone();
            let closure = Closure::wrap(Box::new(move |value: JsValue| {
                let Some(raw) = value.as_f64() else {
                    return;
                };
                // Snap the row to the value the player kept
                if let Some(applied) = on_change(name, raw) {
                    if applied != raw {
                        display_cb.set(name, applied);
                        controller_cb.update_display();
                    }
                }
            }) as Box<dyn FnMut(JsValue)>);
            controller.on_change(closure.as_ref().unchecked_ref());
            change_closures.push(closure);
        }

        // dat.GUI renders function properties as buttons
        let mut action_closures = Vec::new();
        for action in ACTIONS {
            let on_action = Rc::clone(&on_action);
            let display_cb = Rc::clone(&display);
            let closure = Closure::wrap(Box::new(move || {
                if let Some(filters) = on_action(action) {
                    display_cb.show(&filters);
                }
            }) as Box<dyn FnMut()>);
            Reflect::set(&display.model, &action.into(), closure.as_ref()).map_err(js_error)?;
            gui.add(&display.model, action).map_err(js_error)?;
            action_closures.push(closure);
        }

        host.append_child(&gui.dom_element()).map_err(js_error)?;

        Ok(Self {
            gui,
            _on_change: change_closures,
            _on_action: action_closures,
        })
    }
}

impl Drop for SettingsView {
    fn drop(&mut self) {
        self.gui.dom_element().remove();
        self.gui.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slider_values_follow_bindings() {
        let mut panel = SettingsPanel::new();
        panel.set("brightness", 210.0).unwrap();

        let values = slider_values(panel.sliders(), panel.filters());
        assert_eq!(values, vec![("brightness", 210.0), ("contrast", 100.0)]);
    }

    #[test]
    fn test_slider_values_after_reset() {
        let mut panel = SettingsPanel::new();
        panel.set("contrast", 30.0).unwrap();
        panel.trigger("reset").unwrap();

        let values = slider_values(panel.sliders(), panel.filters());
        assert!(values.iter().all(|(_, v)| *v == 100.0));
    }
}
