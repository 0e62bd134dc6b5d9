//! Read-aloud pipeline for released comments.
//!
//! Synthesis is a two-step exchange with an external engine: a query that
//! returns a [`SynthesisPlan`], then a synthesis request that turns the plan
//! into WAV audio. Nothing here touches the queue except [`Narrator`], which
//! releases a comment before synthesizing it.

mod audio;
mod backend;
mod narrator;
mod pipeline;
mod plan;
mod voicevox;

pub use audio::{SynthesizedAudio, WavSummary};
pub use backend::SpeechBackend;
pub use narrator::{Narration, Narrator};
pub use pipeline::SpeechPipeline;
pub use plan::SynthesisPlan;
pub use voicevox::VoicevoxClient;
