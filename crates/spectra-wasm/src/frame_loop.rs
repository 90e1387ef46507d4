//! `requestAnimationFrame` loop with an explicit stop handle

use crate::dom::js_error;
use spectra_core::FrameLoopControl;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Runs `tick` once per display refresh until stopped or dropped
pub struct FrameLoop {
    window: Window,
    control: Rc<RefCell<FrameLoopControl>>,
    callback: FrameCallback,
}

fn request_frame(window: &Window, callback: &Closure<dyn FnMut()>) -> Result<i32, JsValue> {
    window.request_animation_frame(callback.as_ref().unchecked_ref())
}

impl FrameLoop {
    pub fn start<F>(window: Window, mut tick: F) -> anyhow::Result<Self>
    where
        F: FnMut() + 'static,
    {
        let control = Rc::new(RefCell::new(FrameLoopControl::new()));
        let callback: FrameCallback = Rc::new(RefCell::new(None));

        let control_cb = Rc::clone(&control);
        let callback_cb: Weak<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::downgrade(&callback);
        let window_cb = window.clone();

        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if !control_cb.borrow_mut().begin_tick() {
                return;
            }

            // Schedule the next frame before drawing this one
            if let Some(callback) = callback_cb.upgrade() {
                if let Some(closure) = callback.borrow().as_ref() {
                    match request_frame(&window_cb, closure) {
                        Ok(id) => control_cb.borrow_mut().scheduled(id),
                        Err(e) => {
                            tracing::warn!(error = ?e, "requestAnimationFrame failed, stopping loop");
                            control_cb.borrow_mut().stop();
                        }
                    }
                }
            }

            tick();
        }) as Box<dyn FnMut()>));

        control.borrow_mut().start();
        let first = match callback.borrow().as_ref() {
            Some(closure) => request_frame(&window, closure).map_err(js_error)?,
            None => anyhow::bail!("frame callback missing"),
        };
        control.borrow_mut().scheduled(first);

        Ok(Self {
            window,
            control,
            callback,
        })
    }

    pub fn ticks(&self) -> u64 {
        self.control.borrow().ticks()
    }

    /// Cancel the pending frame and release the callback
    pub fn stop(&mut self) {
        if let Some(id) = self.control.borrow_mut().stop() {
            let _ = self.window.cancel_animation_frame(id);
        }
        self.callback.borrow_mut().take();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
