//! Fullscreen geometry
//!
//! The fullscreen effect is an illusion: the tile keeps its place in the layout
//! and a CSS `scale(..) translate(..)` stretches it over the viewport. The
//! translation is expressed in the post-scale coordinate space (pre-divided by
//! the scale), so a single `scale(sx, sy) translate(tx, ty)` list lands the
//! tile exactly on the viewport with the default centre transform origin.

use crate::{Error, Rect, Result, Viewport};
use serde::{Deserialize, Serialize};

const EPSILON: f64 = 1e-9;

/// 2D scale followed by a translation in the scaled space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub scale_x: f64,
    pub scale_y: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub const fn identity() -> Self {
        Self {
            scale_x: 1.0,
            scale_y: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
        }
    }

    pub fn is_identity(&self) -> bool {
        (self.scale_x - 1.0).abs() < EPSILON
            && (self.scale_y - 1.0).abs() < EPSILON
            && self.translate_x.abs() < EPSILON
            && self.translate_y.abs() < EPSILON
    }

    pub fn is_finite(&self) -> bool {
        self.scale_x.is_finite()
            && self.scale_y.is_finite()
            && self.translate_x.is_finite()
            && self.translate_y.is_finite()
    }

    /// CSS `transform` value
    pub fn to_css(&self) -> String {
        format!(
            "scale({}, {}) translate({}px, {}px)",
            self.scale_x, self.scale_y, self.translate_x, self.translate_y
        )
    }

    /// `self` applied after `inner`, kept in scale-then-translate form
    pub fn compose(&self, inner: &Transform) -> Transform {
        Transform {
            scale_x: self.scale_x * inner.scale_x,
            scale_y: self.scale_y * inner.scale_y,
            translate_x: self.translate_x / inner.scale_x + inner.translate_x,
            translate_y: self.translate_y / inner.scale_y + inner.translate_y,
        }
    }

    /// Transform undoing `self`
    pub fn inverse(&self) -> Transform {
        Transform {
            scale_x: 1.0 / self.scale_x,
            scale_y: 1.0 / self.scale_y,
            translate_x: -self.translate_x * self.scale_x,
            translate_y: -self.translate_y * self.scale_y,
        }
    }

    /// Where `rect` ends up on screen with this transform and a centre origin
    pub fn project(&self, rect: &Rect) -> Rect {
        let (cx, cy) = rect.center();
        Rect {
            x: cx + self.scale_x * (rect.x - cx + self.translate_x),
            y: cy + self.scale_y * (rect.y - cy + self.translate_y),
            width: rect.width * self.scale_x,
            height: rect.height * self.scale_y,
        }
    }
}

/// Transform stretching `rect` over the whole `viewport`.
///
/// Fails with [`Error::DegenerateRect`] when the rect has no usable area.
pub fn compute_expand_transform(rect: &Rect, viewport: &Viewport) -> Result<Transform> {
    if !rect.has_area() {
        return Err(Error::DegenerateRect {
            width: rect.width,
            height: rect.height,
        });
    }

    let scale_x = viewport.width / rect.width;
    let scale_y = viewport.height / rect.height;

    let transform = Transform {
        scale_x,
        scale_y,
        translate_x: ((rect.width * scale_x - rect.width) * 0.5 - rect.x) / scale_x,
        translate_y: ((rect.height * scale_y - rect.height) * 0.5 - rect.y) / scale_y,
    };

    // A zero-sized viewport would divide by zero above
    if !transform.is_finite() || scale_x == 0.0 || scale_y == 0.0 {
        return Err(Error::DegenerateRect {
            width: viewport.width,
            height: viewport.height,
        });
    }

    Ok(transform)
}

/// Transform returning the tile to its layout position
pub fn compute_collapse_transform() -> Transform {
    Transform::identity()
}
