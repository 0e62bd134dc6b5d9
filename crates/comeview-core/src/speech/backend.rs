//! Seam between the pipeline and a concrete speech service.

use super::audio::SynthesizedAudio;
use super::plan::SynthesisPlan;
use crate::error::ComeviewResult;
use async_trait::async_trait;

/// A two-stage text-to-speech service.
///
/// `query` turns text into a [`SynthesisPlan`]; `synthesize` renders a plan
/// into audio. Implementations must not retry internally.
#[async_trait]
pub trait SpeechBackend: Send + Sync {
    /// Stage 1: build a synthesis plan for `text` spoken by `speaker`
    async fn query(&self, text: &str, speaker: u32) -> ComeviewResult<SynthesisPlan>;

    /// Stage 2: render a plan into audio
    async fn synthesize(&self, plan: &SynthesisPlan, speaker: u32) -> ComeviewResult<SynthesizedAudio>;
}
