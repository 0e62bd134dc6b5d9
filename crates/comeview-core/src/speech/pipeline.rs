//! Plan-then-synthesize pipeline.

use super::audio::SynthesizedAudio;
use super::backend::SpeechBackend;
use super::voicevox::VoicevoxClient;
use crate::config::SpeechConfig;
use crate::error::{ComeviewError, ComeviewResult};
use tracing::{info, warn};

/// Runs the two synthesis stages in order for one piece of text.
///
/// The synthesis stage is never attempted when the query stage fails.
#[derive(Debug, Clone)]
pub struct SpeechPipeline<B> {
    backend: B,
    speaker: u32,
    max_text_length: usize,
    speed_scale: f64,
}

impl SpeechPipeline<VoicevoxClient> {
    /// Build a pipeline backed by a VOICEVOX-compatible engine
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the speech settings are invalid.
    pub fn from_config(config: &SpeechConfig) -> ComeviewResult<Self> {
        Ok(Self::new(VoicevoxClient::new(config)?, config))
    }
}

impl<B: SpeechBackend> SpeechPipeline<B> {
    /// Build a pipeline over any backend
    #[must_use]
    pub fn new(backend: B, config: &SpeechConfig) -> Self {
        Self {
            backend,
            speaker: config.speaker,
            max_text_length: config.max_text_length,
            speed_scale: config.speed_scale,
        }
    }

    /// Use a different speaker for subsequent requests
    #[must_use]
    pub fn with_speaker(mut self, speaker: u32) -> Self {
        self.speaker = speaker;
        self
    }

    /// Speaker used for both stages
    #[must_use]
    pub const fn speaker(&self) -> u32 {
        self.speaker
    }

    /// The underlying backend
    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Turn text into audio
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for blank or over-long text without contacting
    /// the service, otherwise the first stage failure.
    pub async fn speak(&self, text: &str) -> ComeviewResult<SynthesizedAudio> {
        self.validate_text(text)?;

        let plan = self
            .backend
            .query(text, self.speaker)
            .await
            .inspect_err(|e| warn!(category = e.category(), "Query stage failed: {}", e))?
            .with_speed_scale(self.speed_scale);

        let audio = self
            .backend
            .synthesize(&plan, self.speaker)
            .await
            .inspect_err(|e| warn!(category = e.category(), "Synthesis stage failed: {}", e))?;

        info!(
            speaker = self.speaker,
            duration_ms = u64::try_from(audio.duration().as_millis()).unwrap_or(u64::MAX),
            "Synthesized speech"
        );
        Ok(audio)
    }

    fn validate_text(&self, text: &str) -> ComeviewResult<()> {
        if text.trim().is_empty() {
            return Err(ComeviewError::invalid_input("Text to speak cannot be blank"));
        }

        let length = text.chars().count();
        if length > self.max_text_length {
            return Err(ComeviewError::invalid_input(format!(
                "Text length {length} exceeds maximum of {}",
                self.max_text_length
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use super::super::audio::test_wav;
    use super::super::plan::SynthesisPlan;
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use serde_json::json;

    /// Records calls and fails on demand
    #[derive(Debug, Default)]
    pub(crate) struct FakeBackend {
        pub fail_query: bool,
        pub fail_synthesis: bool,
        pub calls: Mutex<Vec<String>>,
        pub last_plan: Mutex<Option<SynthesisPlan>>,
    }

    #[async_trait]
    impl SpeechBackend for FakeBackend {
        async fn query(&self, text: &str, speaker: u32) -> ComeviewResult<SynthesisPlan> {
            self.calls.lock().push(format!("query:{speaker}:{text}"));
            if self.fail_query {
                return Err(ComeviewError::query("HTTP 500"));
            }
            SynthesisPlan::from_value(json!({"kana": text, "speedScale": 1.0}))
        }

        async fn synthesize(&self, plan: &SynthesisPlan, speaker: u32) -> ComeviewResult<SynthesizedAudio> {
            self.calls.lock().push(format!("synthesis:{speaker}"));
            *self.last_plan.lock() = Some(plan.clone());
            if self.fail_synthesis {
                return Err(ComeviewError::network("connection reset"));
            }
            SynthesizedAudio::from_wav_bytes(test_wav(24_000, 2_400))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fake::FakeBackend;
    use super::*;

    fn pipeline(backend: FakeBackend) -> SpeechPipeline<FakeBackend> {
        SpeechPipeline::new(backend, &SpeechConfig::default())
    }

    #[tokio::test]
    async fn test_speak_runs_both_stages_in_order() {
        let pipeline = pipeline(FakeBackend::default()).with_speaker(8);
        let audio = pipeline.speak("こんにちは").await.unwrap();

        assert_eq!(audio.summary().sample_rate, 24_000);
        assert_eq!(
            *pipeline.backend().calls.lock(),
            vec!["query:8:こんにちは".to_string(), "synthesis:8".to_string()]
        );
    }

    #[tokio::test]
    async fn test_query_failure_skips_synthesis() {
        let pipeline = pipeline(FakeBackend {
            fail_query: true,
            ..FakeBackend::default()
        });

        let err = pipeline.speak("hello").await.unwrap_err();
        assert!(matches!(err, ComeviewError::QueryError { .. }));
        assert_eq!(pipeline.backend().calls.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_synthesis_failure_propagates() {
        let pipeline = pipeline(FakeBackend {
            fail_synthesis: true,
            ..FakeBackend::default()
        });

        let err = pipeline.speak("hello").await.unwrap_err();
        assert!(err.is_retriable());
        assert_eq!(pipeline.backend().calls.lock().len(), 2);
    }

    #[tokio::test]
    async fn test_blank_and_long_text_rejected_locally() {
        let config = SpeechConfig {
            max_text_length: 5,
            ..SpeechConfig::default()
        };
        let pipeline = SpeechPipeline::new(FakeBackend::default(), &config);

        assert!(pipeline.speak("").await.unwrap_err().is_user_error());
        assert!(pipeline.speak(" \t").await.unwrap_err().is_user_error());
        assert!(pipeline.speak("toolong").await.unwrap_err().is_user_error());
        // Length counts characters, not bytes.
        assert!(pipeline.speak("あいうえお").await.is_ok());
        assert_eq!(pipeline.backend().calls.lock().len(), 2);
    }

    #[tokio::test]
    async fn test_speed_scale_applied_to_plan() {
        let config = SpeechConfig {
            speed_scale: 1.3,
            ..SpeechConfig::default()
        };
        let pipeline = SpeechPipeline::new(FakeBackend::default(), &config);
        pipeline.speak("faster").await.unwrap();

        let plan = pipeline.backend().last_plan.lock().clone().unwrap();
        assert_eq!(plan.speed_scale(), Some(1.3));
    }

    #[test]
    fn test_from_config() {
        let pipeline = SpeechPipeline::from_config(&SpeechConfig::default()).unwrap();
        assert_eq!(pipeline.speaker(), crate::config::DEFAULT_SPEAKER);
    }
}
