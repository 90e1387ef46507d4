//! Settings panel model
//!
//! Each slider is an explicit getter/setter pair over [`VideoFilters`]; the
//! panel owns the filters and hands back the recomputed CSS after every change.

use crate::{Error, Result, VideoFilters};
use serde::{Deserialize, Serialize};

/// Name of the fullscreen action
pub const FULLSCREEN_ACTION: &str = "fullscreen";
/// Name of the action restoring slider defaults
pub const RESET_ACTION: &str = "reset";
/// Action buttons shown under the sliders, in order
pub const ACTIONS: [&str; 2] = [FULLSCREEN_ACTION, RESET_ACTION];

/// Range and step of a numeric slider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderSpec {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

impl SliderSpec {
    /// 0..=300 % in steps of 10, defaulting to 100 %
    pub const PERCENT: SliderSpec = SliderSpec {
        min: 0.0,
        max: 300.0,
        step: 10.0,
        default: 100.0,
    };

    /// Clamp into range and snap to the nearest step
    pub fn normalize(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return self.default;
        }
        let clamped = value.clamp(self.min, self.max);
        if self.step <= 0.0 {
            return clamped;
        }
        let snapped = self.min + ((clamped - self.min) / self.step).round() * self.step;
        snapped.clamp(self.min, self.max)
    }
}

/// A slider bound to one filter field
#[derive(Clone, Copy)]
pub struct SliderBinding {
    pub name: &'static str,
    pub spec: SliderSpec,
    pub get: fn(&VideoFilters) -> f64,
    pub set: fn(&mut VideoFilters, f64),
}

impl std::fmt::Debug for SliderBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SliderBinding")
            .field("name", &self.name)
            .field("spec", &self.spec)
            .finish()
    }
}

/// What the player must do after a panel interaction
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsAction {
    /// Apply this CSS filter to the video
    ApplyFilter(String),
    ToggleFullscreen,
}

/// Settings panel state: filters plus their slider bindings
#[derive(Debug, Clone)]
pub struct SettingsPanel {
    filters: VideoFilters,
    sliders: Vec<SliderBinding>,
}

impl SettingsPanel {
    pub fn new() -> Self {
        Self {
            filters: VideoFilters::default(),
            sliders: vec![
                SliderBinding {
                    name: "brightness",
                    spec: SliderSpec::PERCENT,
                    get: |f| f.brightness,
                    set: |f, v| f.brightness = v,
                },
                SliderBinding {
                    name: "contrast",
                    spec: SliderSpec::PERCENT,
                    get: |f| f.contrast,
                    set: |f, v| f.contrast = v,
                },
            ],
        }
    }

    pub fn sliders(&self) -> &[SliderBinding] {
        &self.sliders
    }

    pub fn filters(&self) -> &VideoFilters {
        &self.filters
    }

    pub fn filter_css(&self) -> String {
        self.filters.to_css()
    }

    fn slider(&self, name: &str) -> Result<&SliderBinding> {
        self.sliders
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| Error::UnknownSetting(name.to_string()))
    }

    /// Current value of slider `name`
    pub fn value(&self, name: &str) -> Result<f64> {
        let slider = self.slider(name)?;
        Ok((slider.get)(&self.filters))
    }

    /// Set slider `name`, normalized to its spec
    pub fn set(&mut self, name: &str, value: f64) -> Result<SettingsAction> {
        let slider = *self.slider(name)?;
        let value = slider.spec.normalize(value);
        (slider.set)(&mut self.filters, value);

        tracing::debug!(setting = name, value, "Setting changed");
        Ok(SettingsAction::ApplyFilter(self.filters.to_css()))
    }

    /// Fire a named action button
    pub fn trigger(&mut self, name: &str) -> Result<SettingsAction> {
        match name {
            FULLSCREEN_ACTION => Ok(SettingsAction::ToggleFullscreen),
            RESET_ACTION => Ok(self.reset()),
            _ => Err(Error::UnknownSetting(name.to_string())),
        }
    }

    /// Restore every slider default
    pub fn reset(&mut self) -> SettingsAction {
        for slider in &self.sliders {
            (slider.set)(&mut self.filters, slider.spec.default);
        }
        SettingsAction::ApplyFilter(self.filters.to_css())
    }
}

impl Default for SettingsPanel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        let spec = SliderSpec::PERCENT;
        assert_eq!(spec.normalize(104.0), 100.0);
        assert_eq!(spec.normalize(105.0), 110.0);
        assert_eq!(spec.normalize(-20.0), 0.0);
        assert_eq!(spec.normalize(1000.0), 300.0);
        assert_eq!(spec.normalize(f64::NAN), 100.0);
    }

    #[test]
    fn test_set_recomputes_filter() {
        let mut panel = SettingsPanel::new();
        let action = panel.set("brightness", 150.0).unwrap();
        assert_eq!(
            action,
            SettingsAction::ApplyFilter("brightness(150%) contrast(100%)".into())
        );
        assert_eq!(panel.value("brightness").unwrap(), 150.0);

        panel.set("contrast", 42.0).unwrap();
        assert_eq!(panel.filter_css(), "brightness(150%) contrast(40%)");
    }

    #[test]
    fn test_unknown_setting() {
        let mut panel = SettingsPanel::new();
        assert!(matches!(panel.set("saturation", 10.0), Err(Error::UnknownSetting(_))));
        assert!(panel.trigger("pip").is_err());
        assert_eq!(panel.trigger("fullscreen").unwrap(), SettingsAction::ToggleFullscreen);
    }

    #[test]
    fn test_reset() {
        let mut panel = SettingsPanel::new();
        panel.set("brightness", 300.0).unwrap();
        panel.reset();
        assert!(panel.filters().is_neutral());
    }

    #[test]
    fn test_reset_action() {
        let mut panel = SettingsPanel::new();
        panel.set("contrast", 0.0).unwrap();
        assert_eq!(
            panel.trigger(RESET_ACTION).unwrap(),
            SettingsAction::ApplyFilter("brightness(100%) contrast(100%)".into())
        );
        assert_eq!(panel.value("contrast").unwrap(), 100.0);
    }
}
