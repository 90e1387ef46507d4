//! Frequency sampling
//!
//! The sampler wraps a live analysis source (a Web Audio `AnalyserNode` in the
//! browser) and copies its byte frequency data into a reused snapshot buffer
//! once per frame. The source is attached lazily, when the audio graph is first
//! created; sampling before that is a precondition failure.

use crate::{Error, FrequencySnapshot, Result};

/// Analyser FFT window used by default (512 bins)
pub const DEFAULT_FFT_SIZE: u32 = 1024;

/// Anything that can report byte frequency magnitudes
pub trait FrequencySource {
    /// Number of bins the source produces
    fn bin_count(&self) -> usize;

    /// Overwrite `bins` with the current magnitudes
    fn fill(&self, bins: &mut [u8]);
}

/// Pulls one snapshot per call from an attached source
pub struct FrequencySampler<S> {
    source: Option<S>,
    snapshot: FrequencySnapshot,
}

impl<S: FrequencySource> FrequencySampler<S> {
    /// Sampler with no source attached yet
    pub fn new() -> Self {
        Self {
            source: None,
            snapshot: FrequencySnapshot::default(),
        }
    }

    /// Attach the analysis source once the audio graph exists
    pub fn attach(&mut self, source: S) {
        let bins = source.bin_count();
        tracing::debug!(bins, "Frequency source attached");
        self.snapshot = FrequencySnapshot::new(bins);
        self.source = Some(source);
    }

    /// Detach and return the source
    pub fn detach(&mut self) -> Option<S> {
        self.source.take()
    }

    pub fn is_attached(&self) -> bool {
        self.source.is_some()
    }

    pub fn source(&self) -> Option<&S> {
        self.source.as_ref()
    }

    /// Refresh and return the current snapshot
    pub fn sample(&mut self) -> Result<&FrequencySnapshot> {
        let source = self.source.as_ref().ok_or(Error::AudioGraphNotInitialized)?;

        let bins = source.bin_count();
        if bins != self.snapshot.len() {
            self.snapshot.resize(bins);
        }
        source.fill(self.snapshot.bins_mut());

        Ok(&self.snapshot)
    }
}

impl<S: FrequencySource> Default for FrequencySampler<S> {
    fn default() -> Self {
        Self::new()
    }
}
