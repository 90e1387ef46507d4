//! Browser console logging
//!
//! `tracing` events go through a `tracing-wasm` layer, which routes each level
//! to the matching `console` method.

use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tracing_wasm::{WASMLayer, WASMLayerConfigBuilder};

/// Install the console subscriber; later calls are no-ops
pub fn init(max_level: Level) {
    let config = WASMLayerConfigBuilder::new()
        .set_max_level(max_level)
        .set_report_logs_in_timings(false)
        .build();

    let installed = tracing_subscriber::registry()
        .with(WASMLayer::new(config))
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(%max_level, "Console logging installed");
    }
}
