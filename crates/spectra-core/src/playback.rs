//! Playback source selection
//!
//! Adaptive streaming through hls.js is preferred; browsers that play HLS
//! natively get the manifest as the video `src`; everything else plays nothing.

use serde::{Deserialize, Serialize};

/// MIME type probed for native HLS support
pub const HLS_MIME_TYPE: &str = "application/vnd.apple.mpegurl";

/// Event hls.js fires once the manifest is parsed
pub const MANIFEST_PARSED_EVENT: &str = "hlsManifestParsed";

/// Media event fired once native playback knows the stream metadata
pub const LOADED_METADATA_EVENT: &str = "loadedmetadata";

/// How a player gets its stream into the video element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackStrategy {
    /// hls.js over Media Source Extensions
    Adaptive,
    /// The browser plays the manifest itself
    Native,
    Unsupported,
}

impl PlaybackStrategy {
    /// Pick a strategy from hls.js support and `canPlayType(HLS_MIME_TYPE)`
    pub fn select(hls_supported: bool, can_play_type: &str) -> Self {
        if hls_supported {
            PlaybackStrategy::Adaptive
        } else if !can_play_type.is_empty() {
            // "maybe" and "probably" both count
            PlaybackStrategy::Native
        } else {
            PlaybackStrategy::Unsupported
        }
    }

    /// Event after which playback may start
    pub fn ready_event(&self) -> Option<&'static str> {
        match self {
            PlaybackStrategy::Adaptive => Some(MANIFEST_PARSED_EVENT),
            PlaybackStrategy::Native => Some(LOADED_METADATA_EVENT),
            PlaybackStrategy::Unsupported => None,
        }
    }
}

impl std::fmt::Display for PlaybackStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaybackStrategy::Adaptive => write!(f, "adaptive"),
            PlaybackStrategy::Native => write!(f, "native"),
            PlaybackStrategy::Unsupported => write!(f, "unsupported"),
        }
    }
}

/// Lets the first "ready" event start playback and swallows the rest
#[derive(Debug, Clone, Default)]
pub struct PlaybackGate {
    started: bool,
}

impl PlaybackGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// True exactly once: on the first ready event
    pub fn on_ready(&mut self) -> bool {
        !std::mem::replace(&mut self.started, true)
    }

    pub fn has_started(&self) -> bool {
        self.started
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select() {
        assert_eq!(PlaybackStrategy::select(true, ""), PlaybackStrategy::Adaptive);
        assert_eq!(PlaybackStrategy::select(true, "probably"), PlaybackStrategy::Adaptive);
        assert_eq!(PlaybackStrategy::select(false, "maybe"), PlaybackStrategy::Native);
        assert_eq!(PlaybackStrategy::select(false, ""), PlaybackStrategy::Unsupported);
    }

    #[test]
    fn test_ready_event() {
        assert_eq!(PlaybackStrategy::Adaptive.ready_event(), Some("hlsManifestParsed"));
        assert_eq!(PlaybackStrategy::Native.ready_event(), Some("loadedmetadata"));
        assert_eq!(PlaybackStrategy::Unsupported.ready_event(), None);
    }

    #[test]
    fn test_gate_fires_once() {
        let mut gate = PlaybackGate::new();
        assert!(gate.on_ready());
        assert!(!gate.on_ready());
        assert!(gate.has_started());
    }
}
