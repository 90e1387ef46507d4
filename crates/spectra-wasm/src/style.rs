//! Fullscreen style target backed by the player's container element

use spectra_core::{Rect, StyleOp, StyleTarget, Viewport};
use web_sys::{HtmlElement, Window};

pub struct ElementStyle {
    element: HtmlElement,
    window: Window,
}

impl ElementStyle {
    pub fn new(element: HtmlElement, window: Window) -> Self {
        Self { element, window }
    }

    fn set(&self, property: &str, value: &str) {
        if let Err(e) = self.element.style().set_property(property, value) {
            tracing::warn!(property, error = ?e, "Failed to set style");
        }
    }

    fn remove(&self, property: &str) {
        if let Err(e) = self.element.style().remove_property(property) {
            tracing::warn!(property, error = ?e, "Failed to remove style");
        }
    }
}

impl StyleTarget for ElementStyle {
    fn bounding_rect(&self) -> Rect {
        let rect = self.element.get_bounding_client_rect();
        Rect::new(rect.x(), rect.y(), rect.width(), rect.height())
    }

    fn viewport(&self) -> Viewport {
        let width = self.window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let height = self.window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        Viewport::new(width, height)
    }

    fn apply(&mut self, op: &StyleOp) {
        match op {
            StyleOp::SetZIndex(Some(z)) => self.set("z-index", &z.to_string()),
            StyleOp::SetZIndex(None) => self.remove("z-index"),
            StyleOp::SetTransition(Some(transition)) => self.set("transition", transition),
            StyleOp::SetTransition(None) => self.set("transition", "none"),
            StyleOp::SetTransform(transform) => self.set("transform", &transform.to_css()),
            StyleOp::ClearTransform => self.remove("transform"),
            StyleOp::AddClass(class) => {
                if let Err(e) = self.element.class_list().add_1(class) {
                    tracing::warn!(class = %class, error = ?e, "Failed to add class");
                }
            }
            StyleOp::RemoveClass(class) => {
                if let Err(e) = self.element.class_list().remove_1(class) {
                    tracing::warn!(class = %class, error = ?e, "Failed to remove class");
                }
            }
            StyleOp::Reflow => {
                // Reading layout flushes pending style changes
                let _ = self.element.offset_width();
            }
        }
    }
}
