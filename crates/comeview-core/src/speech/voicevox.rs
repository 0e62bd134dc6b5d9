//! HTTP client for VOICEVOX-compatible engines.
//!
//! Stage 1 is `POST /audio_query?text=..&speaker=..`, which answers with a
//! JSON plan. Stage 2 is `POST /synthesis?speaker=..` with that plan as the
//! body, which answers with WAV bytes.

use super::audio::SynthesizedAudio;
use super::backend::SpeechBackend;
use super::plan::SynthesisPlan;
use crate::config::SpeechConfig;
use crate::error::{ComeviewError, ComeviewResult};
use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::{debug, info};

/// Speech backend talking to a VOICEVOX-compatible HTTP engine
#[derive(Debug, Clone)]
pub struct VoicevoxClient {
    client: Client,
    base_url: String,
}

impl VoicevoxClient {
    /// Create a client from speech settings
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the settings are invalid or the HTTP
    /// client cannot be built.
    pub fn new(config: &SpeechConfig) -> ComeviewResult<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ComeviewError::configuration(format!("Failed to build HTTP client: {e}")))?;

        let base_url = config.base_url.trim_end_matches('/').to_string();
        info!("Speech engine client targeting {}", base_url);

        Ok(Self { client, base_url })
    }

    /// Base URL requests are sent to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ask the engine for its version string. Useful as a reachability check.
    ///
    /// # Errors
    ///
    /// Returns a network or timeout error if the engine cannot be reached,
    /// or `MalformedResponse` if the reply is not a JSON string.
    pub async fn version(&self) -> ComeviewResult<String> {
        let response = self
            .client
            .get(format!("{}/version", self.base_url))
            .send()
            .await?;

        let response = check_status(response, ComeviewError::network).await?;
        Ok(response.json::<String>().await?)
    }
}

#[async_trait]
impl SpeechBackend for VoicevoxClient {
    async fn query(&self, text: &str, speaker: u32) -> ComeviewResult<SynthesisPlan> {
        debug!(speaker, chars = text.chars().count(), "Requesting synthesis plan");

        let speaker = speaker.to_string();
        let response = self
            .client
            .post(format!("{}/audio_query", self.base_url))
            .query(&[("text", text), ("speaker", speaker.as_str())])
            .send()
            .await?;

        let response = check_status(response, ComeviewError::query).await?;
        let bytes = response.bytes().await?;
        SynthesisPlan::from_slice(&bytes)
    }

    async fn synthesize(&self, plan: &SynthesisPlan, speaker: u32) -> ComeviewResult<SynthesizedAudio> {
        debug!(speaker, "Requesting synthesis");

        let response = self
            .client
            .post(format!("{}/synthesis", self.base_url))
            .query(&[("speaker", speaker)])
            .json(plan)
            .send()
            .await?;

        let response = check_status(response, ComeviewError::synthesis).await?;
        let bytes = response.bytes().await?;
        SynthesizedAudio::from_wav_bytes(bytes.to_vec())
    }
}

/// Turn a non-success status into the stage-specific error.
async fn check_status(
    response: Response,
    stage_error: fn(String) -> ComeviewError,
) -> ComeviewResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(stage_error(format!("HTTP {status}: {}", body.trim())))
}
