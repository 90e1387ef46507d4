//! Benchmark tests for spectra-core operations
//!
//! Run with: cargo bench -p spectra-core

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use spectra_core::{
    compute_expand_transform, BarChartConfig, BarLayout, BarRenderer, FrequencySnapshot,
    RasterSurface, Rect, Viewport,
};

// ============================================================================
// Helpers
// ============================================================================

/// Surface that only counts calls
#[derive(Default)]
struct CountingSurface {
    fills: usize,
}

impl RasterSurface for CountingSurface {
    fn resize(&mut self, _width: u32, _height: u32) {}
    fn clear(&mut self, _width: f64, _height: f64) {}
    fn set_fill_style(&mut self, _color: &str) {}
    fn fill_rect(&mut self, _x: f64, _y: f64, _width: f64, _height: f64) {
        self.fills += 1;
    }
}

fn create_snapshot(bins: usize) -> FrequencySnapshot {
    FrequencySnapshot::from_bins((0..bins).map(|i| (i % 256) as u8).collect())
}

// ============================================================================
// Bars
// ============================================================================

fn bench_bar_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("bar_layout");
    let snapshot = create_snapshot(512);
    let config = BarChartConfig::default();

    for width in [320.0, 1280.0, 3840.0] {
        group.bench_with_input(BenchmarkId::from_parameter(width), &width, |b, &width| {
            b.iter(|| {
                let layout = BarLayout::new(&config, black_box(width), 120.0);
                layout.bars(&snapshot).map(|bar| bar.height).sum::<f64>()
            })
        });
    }

    group.finish();
}

fn bench_render_frame(c: &mut Criterion) {
    let renderer = BarRenderer::default();
    let snapshot = create_snapshot(512);

    c.bench_function("render_frame_1080p", |b| {
        b.iter(|| {
            let mut surface = CountingSurface::default();
            renderer.render(&mut surface, black_box(&snapshot), 1920.0, 200.0);
            surface.fills
        })
    });
}

// ============================================================================
// Geometry
// ============================================================================

fn bench_expand_transform(c: &mut Criterion) {
    let rect = Rect::new(100.0, 50.0, 200.0, 100.0);
    let viewport = Viewport::new(1920.0, 1080.0);

    c.bench_function("expand_transform", |b| {
        b.iter(|| compute_expand_transform(black_box(&rect), black_box(&viewport)))
    });
}

criterion_group!(
    benches,
    bench_bar_layout,
    bench_render_frame,
    bench_expand_transform,
);
criterion_main!(benches);
