//! Error types for the Comeview comment pipeline.
//!
//! An empty queue is never an error; release operations signal it with `None`.

/// Result type alias for Comeview operations
pub type ComeviewResult<T> = Result<T, ComeviewError>;

/// Main error type for Comeview operations
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ComeviewError {
    /// Invalid input error
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Error message describing the invalid input
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigurationError {
        /// Error message describing the configuration issue
        message: String,
    },

    /// File I/O error
    #[error("File I/O error: {message}")]
    FileError {
        /// Error message describing the file operation failure
        message: String,
    },

    /// Network error while talking to the speech service
    #[error("Network error: {message}")]
    NetworkError {
        /// Error message describing the network issue
        message: String,
    },

    /// Timeout error
    #[error("Operation timed out: {message}")]
    TimeoutError {
        /// Error message describing the timeout
        message: String,
    },

    /// The speech service rejected the query stage
    #[error("Speech query failed: {message}")]
    QueryError {
        /// Error message describing the query failure
        message: String,
    },

    /// The speech service rejected the synthesis stage
    #[error("Speech synthesis failed: {message}")]
    SynthesisError {
        /// Error message describing the synthesis failure
        message: String,
    },

    /// The speech service answered with something unusable
    #[error("Malformed response: {message}")]
    MalformedResponse {
        /// Error message describing what was wrong with the payload
        message: String,
    },
}

impl ComeviewError {
    /// Create a new invalid input error
    #[must_use]
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    #[must_use]
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::ConfigurationError {
            message: message.into(),
        }
    }

    /// Create a new file error
    #[must_use]
    pub fn file<S: Into<String>>(message: S) -> Self {
        Self::FileError {
            message: message.into(),
        }
    }

    /// Create a new network error
    #[must_use]
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::NetworkError {
            message: message.into(),
        }
    }

    /// Create a new timeout error
    #[must_use]
    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::TimeoutError {
            message: message.into(),
        }
    }

    /// Create a new query stage error
    #[must_use]
    pub fn query<S: Into<String>>(message: S) -> Self {
        Self::QueryError {
            message: message.into(),
        }
    }

    /// Create a new synthesis stage error
    #[must_use]
    pub fn synthesis<S: Into<String>>(message: S) -> Self {
        Self::SynthesisError {
            message: message.into(),
        }
    }

    /// Create a new malformed response error
    #[must_use]
    pub fn malformed<S: Into<String>>(message: S) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    /// Check if this error is retriable
    #[must_use]
    pub const fn is_retriable(&self) -> bool {
        matches!(self, Self::NetworkError { .. } | Self::TimeoutError { .. })
    }

    /// Check if this error is due to invalid user input
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput { .. } | Self::ConfigurationError { .. }
        )
    }

    /// Get the error category for logging
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "input",
            Self::ConfigurationError { .. } => "configuration",
            Self::FileError { .. } => "file",
            Self::NetworkError { .. } => "network",
            Self::TimeoutError { .. } => "timeout",
            Self::QueryError { .. } => "query",
            Self::SynthesisError { .. } => "synthesis",
            Self::MalformedResponse { .. } => "malformed_response",
        }
    }
}

// Convert from common error types
impl From<std::io::Error> for ComeviewError {
    fn from(err: std::io::Error) -> Self {
        Self::file(err.to_string())
    }
}

impl From<toml::de::Error> for ComeviewError {
    fn from(err: toml::de::Error) -> Self {
        Self::configuration(format!("TOML parse error: {err}"))
    }
}

impl From<serde_json::Error> for ComeviewError {
    fn from(err: serde_json::Error) -> Self {
        Self::malformed(format!("JSON error: {err}"))
    }
}

// Hosts that build their settings with `anyhow` context keep the whole chain.
impl From<anyhow::Error> for ComeviewError {
    fn from(err: anyhow::Error) -> Self {
        Self::configuration(format!("{err:#}"))
    }
}

#[cfg(feature = "speech")]
impl From<reqwest::Error> for ComeviewError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::timeout(err.to_string())
        } else if err.is_decode() {
            Self::malformed(err.to_string())
        } else {
            Self::network(err.to_string())
        }
    }
}

#[cfg(feature = "speech")]
impl From<hound::Error> for ComeviewError {
    fn from(err: hound::Error) -> Self {
        Self::malformed(format!("Invalid WAV payload: {err}"))
    }
}
