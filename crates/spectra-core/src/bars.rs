//! Equalizer bar layout and rendering
//!
//! A frame is drawn by resizing the surface to its container, clearing it, and
//! painting `floor(width / (bar_width + gap))` bars. Bar `i` reads bin
//! `floor(i * N / bars)` of an N-bin snapshot and is scaled linearly from the
//! 0..=255 byte range into the surface height, anchored at the bottom edge.

use crate::{BarChartConfig, FrequencySnapshot};

/// Minimal 2D raster surface the renderer draws into
pub trait RasterSurface {
    /// Resize the backing store (this may also clear it)
    fn resize(&mut self, width: u32, height: u32);

    /// Clear the given area to transparent
    fn clear(&mut self, width: f64, height: f64);

    fn set_fill_style(&mut self, color: &str);

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
}

/// One bar ready to paint, in surface coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub index: usize,
    /// Snapshot bin this bar samples
    pub bin: usize,
    pub x: f64,
    /// Top edge of the bar
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Number of bars that fit in `width`
pub fn bars_count(width: f64, config: &BarChartConfig) -> usize {
    let stride = config.stride();
    if !(width.is_finite() && width > 0.0 && stride > 0.0) {
        return 0;
    }
    (width / stride).floor() as usize
}

/// Bin sampled by bar `index` out of `bars`, for a snapshot of `bins` bins
pub fn sample_index(index: usize, bins: usize, bars: usize) -> usize {
    if bars == 0 {
        return 0;
    }
    index * bins / bars
}

/// Pixel height of a bar for a byte magnitude
pub fn bar_height(magnitude: u8, height: f64) -> f64 {
    f64::from(magnitude) * height / 255.0
}

/// Bar geometry for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct BarLayout {
    pub count: usize,
    pub stride: f64,
    pub bar_width: f64,
    pub width: f64,
    pub height: f64,
}

impl BarLayout {
    pub fn new(config: &BarChartConfig, width: f64, height: f64) -> Self {
        let count = if height > 0.0 { bars_count(width, config) } else { 0 };
        Self {
            count,
            stride: config.stride(),
            bar_width: config.bar_width,
            width,
            height,
        }
    }

    /// Bars for `snapshot`, left to right
    pub fn bars<'a>(&'a self, snapshot: &'a FrequencySnapshot) -> impl Iterator<Item = Bar> + 'a {
        let bins = snapshot.len();
        (0..self.count).map(move |index| {
            let bin = sample_index(index, bins, self.count);
            let height = bar_height(snapshot.get(bin).unwrap_or(0), self.height);
            Bar {
                index,
                bin,
                x: index as f64 * self.stride,
                y: self.height - height,
                width: self.bar_width,
                height,
            }
        })
    }
}

/// Paints snapshots as vertical bars
#[derive(Debug, Clone, Default)]
pub struct BarRenderer {
    config: BarChartConfig,
}

impl BarRenderer {
    pub fn new(config: BarChartConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BarChartConfig {
        &self.config
    }

    /// Draw one frame into `surface` sized to the container's `width` x `height`.
    ///
    /// Returns the number of bars drawn. A container too narrow for a single bar,
    /// or with no area, only gets cleared.
    pub fn render<R: RasterSurface + ?Sized>(
        &self,
        surface: &mut R,
        snapshot: &FrequencySnapshot,
        width: f64,
        height: f64,
    ) -> usize {
        let width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        let height = if height.is_finite() { height.max(0.0) } else { 0.0 };

        surface.resize(width as u32, height as u32);
        surface.clear(width, height);

        let layout = BarLayout::new(&self.config, width, height);
        if layout.count == 0 || snapshot.is_empty() {
            return 0;
        }

        surface.set_fill_style(&self.config.color);
        for bar in layout.bars(snapshot) {
            surface.fill_rect(bar.x, bar.y, bar.width, bar.height);
        }

        tracing::trace!(bars = layout.count, bins = snapshot.len(), "Bars rendered");
        layout.count
    }
}
