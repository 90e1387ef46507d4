//! Error types for Spectra Core

use thiserror::Error;

/// Result type alias for Spectra operations
pub type Result<T> = std::result::Result<T, Error>;

/// Spectra error types
#[derive(Error, Debug)]
pub enum Error {
    // Geometry errors
    #[error("Degenerate rect: {width}x{height} has no usable area")]
    DegenerateRect { width: f64, height: f64 },

    // Audio errors
    #[error("Audio graph not initialized")]
    AudioGraphNotInitialized,

    // Fullscreen errors
    #[error("Fullscreen transition already in progress ({state})")]
    TransitionInProgress { state: String },

    // Settings errors
    #[error("Unknown setting: {0}")]
    UnknownSetting(String),

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid manifest URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Error::InvalidConfig(msg.into())
    }

    /// Returns true if the caller can simply retry later (the player stays usable)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::TransitionInProgress { .. }
                | Error::AudioGraphNotInitialized
                | Error::UnknownSetting(_)
        )
    }

    /// Returns the error code for logs
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::DegenerateRect { .. } => "DEGENERATE_RECT",
            Error::AudioGraphNotInitialized => "AUDIO_NOT_READY",
            Error::TransitionInProgress { .. } => "TRANSITION_BUSY",
            Error::UnknownSetting(_) => "UNKNOWN_SETTING",
            Error::InvalidConfig(_) => "INVALID_CONFIG",
            Error::InvalidUrl(_) => "INVALID_URL",
            Error::Json(_) => "JSON",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(Error::AudioGraphNotInitialized.error_code(), "AUDIO_NOT_READY");
        assert_eq!(
            Error::DegenerateRect { width: 0.0, height: 10.0 }.error_code(),
            "DEGENERATE_RECT"
        );
        assert_eq!(Error::config("x").error_code(), "INVALID_CONFIG");
    }

    #[test]
    fn test_recoverable() {
        let busy = Error::TransitionInProgress { state: "expanding".into() };
        assert!(busy.is_recoverable());
        assert!(!Error::DegenerateRect { width: 0.0, height: 0.0 }.is_recoverable());
    }

    #[test]
    fn test_display() {
        let err = Error::DegenerateRect { width: 0.0, height: 12.0 };
        assert_eq!(err.to_string(), "Degenerate rect: 0x12 has no usable area");
    }
}
