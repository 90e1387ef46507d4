//! CSS filters applied to the video surface

use serde::{Deserialize, Serialize};

/// Brightness and contrast, in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VideoFilters {
    pub brightness: f64,
    pub contrast: f64,
}

impl Default for VideoFilters {
    fn default() -> Self {
        Self {
            brightness: 100.0,
            contrast: 100.0,
        }
    }
}

impl VideoFilters {
    /// CSS `filter` value
    pub fn to_css(&self) -> String {
        format!("brightness({}%) contrast({}%)", self.brightness, self.contrast)
    }

    pub fn is_neutral(&self) -> bool {
        *self == Self::default()
    }
}
