//! Web Audio graph: video → analyser → speakers

use crate::dom::js_error;
use anyhow::Context;
use spectra_core::FrequencySource;
use web_sys::{AnalyserNode, AudioContext, HtmlMediaElement, MediaElementAudioSourceNode};

/// Audio graph owned by one player
pub struct AudioGraph {
    context: AudioContext,
    _source: MediaElementAudioSourceNode,
    analyser: AnalyserNode,
}

impl AudioGraph {
    /// Route `media` through an analyser with an `fft_size` window
    pub fn connect(media: &HtmlMediaElement, fft_size: u32) -> anyhow::Result<Self> {
        let context = AudioContext::new().map_err(js_error).context("AudioContext")?;

        let (source, analyser) = match Self::wire(&context, media, fft_size) {
            Ok(nodes) => nodes,
            Err(e) => {
                // Pages get a limited number of live contexts
                close_context(&context);
                return Err(e);
            }
        };

        tracing::debug!(fft_size, bins = analyser.frequency_bin_count(), "Audio graph connected");

        Ok(Self {
            context,
            _source: source,
            analyser,
        })
    }

    fn wire(
        context: &AudioContext,
        media: &HtmlMediaElement,
        fft_size: u32,
    ) -> anyhow::Result<(MediaElementAudioSourceNode, AnalyserNode)> {
        let analyser = context.create_analyser().map_err(js_error).context("AnalyserNode")?;
        analyser.set_fft_size(fft_size);

        let source = context
            .create_media_element_source(media)
            .map_err(js_error)
            .context("MediaElementAudioSourceNode")?;
        source.connect_with_audio_node(&analyser).map_err(js_error)?;
        analyser
            .connect_with_audio_node(&context.destination())
            .map_err(js_error)?;

        Ok((source, analyser))
    }

    /// Frequency source reading from this graph's analyser
    pub fn frequency_source(&self) -> AnalyserSource {
        AnalyserSource(self.analyser.clone())
    }

    pub fn close(&self) {
        close_context(&self.context);
    }
}

fn close_context(context: &AudioContext) {
    if let Err(e) = context.close() {
        tracing::warn!(error = ?e, "Failed to close AudioContext");
    }
}

/// [`FrequencySource`] backed by an `AnalyserNode`
pub struct AnalyserSource(AnalyserNode);

impl FrequencySource for AnalyserSource {
    fn bin_count(&self) -> usize {
        self.0.frequency_bin_count() as usize
    }

    fn fill(&self, bins: &mut [u8]) {
        self.0.get_byte_frequency_data(bins);
    }
}
