//! Configuration loaded from a TOML file.
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! working setup pointed at a local VOICEVOX-compatible engine.

use crate::error::{ComeviewError, ComeviewResult};
use crate::queue::{AdmissionPolicy, PriorityOrder};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Default speech engine address
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:50021";

/// Default speaker (voice) identifier
pub const DEFAULT_SPEAKER: u32 = 1;

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComeviewConfig {
    /// Default `tracing` filter directive; `RUST_LOG` overrides it
    pub log_filter: String,
    /// Queue settings
    pub queue: QueueConfig,
    /// Speech service settings
    pub speech: SpeechConfig,
}

impl Default for ComeviewConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            queue: QueueConfig::default(),
            speech: SpeechConfig::default(),
        }
    }
}

/// Queue ordering and admission settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Which end of the priority range is released first
    pub order: PriorityOrder,
    /// Screening applied by `try_admit`
    pub admission: AdmissionPolicy,
}

/// Speech synthesis service settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Base URL of the synthesis service
    pub base_url: String,
    /// Speaker (voice) identifier sent with both requests
    pub speaker: u32,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Longest text, in characters, sent for synthesis
    pub max_text_length: usize,
    /// Speed multiplier written into the synthesis plan
    pub speed_scale: f64,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            speaker: DEFAULT_SPEAKER,
            timeout_secs: 30,
            max_text_length: 1000,
            speed_scale: 1.0,
        }
    }
}

impl SpeechConfig {
    /// Request timeout as a `Duration`
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate speech settings
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an empty base URL, a zero timeout,
    /// a zero maximum text length, or a non-positive speed scale.
    pub fn validate(&self) -> ComeviewResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(ComeviewError::configuration("Speech base_url cannot be empty"));
        }

        if self.timeout_secs == 0 {
            return Err(ComeviewError::configuration(
                "Speech timeout_secs must be greater than 0",
            ));
        }

        if self.max_text_length == 0 {
            return Err(ComeviewError::configuration(
                "Speech max_text_length must be greater than 0",
            ));
        }

        if !(self.speed_scale.is_finite() && self.speed_scale > 0.0) {
            return Err(ComeviewError::configuration(format!(
                "Speech speed_scale must be positive, got {}",
                self.speed_scale
            )));
        }

        Ok(())
    }
}

impl ComeviewConfig {
    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the text is not valid TOML, does not
    /// match the schema, or fails validation.
    pub fn from_toml_str(text: &str) -> ComeviewResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns a file error if the file cannot be read, or a configuration
    /// error if its contents are invalid.
    pub fn load(path: impl AsRef<Path>) -> ComeviewResult<Self> {
        let path = path.as_ref();
        debug!("Loading configuration from {:?}", path);
        let text = std::fs::read_to_string(path)
            .map_err(|e| ComeviewError::file(format!("Failed to read {}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Load from the platform default location, falling back to defaults
    /// when no file exists there.
    ///
    /// # Errors
    ///
    /// Returns an error only if a file exists but cannot be read or parsed.
    pub fn load_or_default() -> ComeviewResult<Self> {
        match Self::default_path() {
            Some(path) if path.is_file() => {
                info!("Using configuration file {:?}", path);
                Self::load(path)
            }
            _ => {
                debug!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Platform configuration file path, e.g. `~/.config/comeview/config.toml`
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "Comeview", "comeview")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Serialize to TOML text
    ///
    /// # Errors
    ///
    /// Returns a configuration error if serialization fails.
    pub fn to_toml_string(&self) -> ComeviewResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| ComeviewError::configuration(format!("TOML serialize error: {e}")))
    }

    /// Validate the whole configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error describing the first invalid field.
    pub fn validate(&self) -> ComeviewResult<()> {
        if self.log_filter.trim().is_empty() {
            return Err(ComeviewError::configuration("log_filter cannot be empty"));
        }
        self.speech.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_default() {
        let config = ComeviewConfig::default();
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.queue.order, PriorityOrder::HighestFirst);
        assert_eq!(config.queue.admission, AdmissionPolicy::Lenient);
        assert_eq!(config.speech.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.speech.speaker, DEFAULT_SPEAKER);
        assert_eq!(config.speech.timeout(), Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = ComeviewConfig::from_toml_str("").unwrap();
        assert_eq!(config, ComeviewConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let config = ComeviewConfig::from_toml_str(
            r#"
            [queue]
            order = "lowest_first"

            [speech]
            speaker = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.queue.order, PriorityOrder::LowestFirst);
        assert_eq!(config.queue.admission, AdmissionPolicy::Lenient);
        assert_eq!(config.speech.speaker, 3);
        assert_eq!(config.speech.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_unknown_order_rejected() {
        let err = ComeviewConfig::from_toml_str("[queue]\norder = \"random\"\n").unwrap_err();
        assert!(matches!(err, ComeviewError::ConfigurationError { .. }));
    }

    #[test]
    fn test_validation_failures() {
        let mut config = ComeviewConfig::default();
        config.speech.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = ComeviewConfig::default();
        config.speech.base_url = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = ComeviewConfig::default();
        config.speech.max_text_length = 0;
        assert!(config.validate().is_err());

        let mut config = ComeviewConfig::default();
        config.speech.speed_scale = 0.0;
        assert!(config.validate().is_err());

        let mut config = ComeviewConfig::default();
        config.speech.speed_scale = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = ComeviewConfig::default();
        config.log_filter = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "log_filter = \"debug\"\n[queue]\nadmission = \"strict\"\n[speech]\ntimeout_secs = 5"
        )
        .unwrap();

        let config = ComeviewConfig::load(file.path()).unwrap();
        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.queue.admission, AdmissionPolicy::Strict);
        assert_eq!(config.speech.timeout_secs, 5);
    }

    #[test]
    fn test_load_missing_file() {
        let err = ComeviewConfig::load("/definitely/not/here/config.toml").unwrap_err();
        assert!(matches!(err, ComeviewError::FileError { .. }));
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = ComeviewConfig::default();
        config.queue.order = PriorityOrder::LowestFirst;
        config.speech.speed_scale = 1.25;

        let text = config.to_toml_string().unwrap();
        assert_eq!(ComeviewConfig::from_toml_str(&text).unwrap(), config);
    }
}
