//! # Comeview Core
//!
//! Ordered queue for live-stream comments, plus the read-aloud pipeline that
//! turns released comments into speech.
//!
//! ## Features
//!
//! - Priority queue with FIFO tie-breaking inside a priority tier
//! - Configurable priority direction and optional strict admission
//! - Lock-protected shared handle for multiple comment sources
//! - Two-stage VOICEVOX-compatible synthesis client (feature `speech`)
//!
//! ## Example
//!
//! ```rust,no_run
//! use comeview_core::{ComeviewConfig, CommentQueue, Narrator, SharedCommentQueue, SpeechPipeline};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ComeviewConfig::load_or_default()?;
//!     comeview_core::logging::init(&config.log_filter);
//!
//!     let queue = SharedCommentQueue::new(CommentQueue::with_config(&config.queue));
//!     queue.admit(5, "viewer", "hello from chat");
//!
//!     let narrator = Narrator::new(queue, SpeechPipeline::from_config(&config.speech)?);
//!     if let Some(narration) = narrator.narrate_next().await {
//!         let audio = narration.audio?;
//!         println!("{} bytes of audio", audio.as_bytes().len());
//!     }
//!
//!     Ok(())
//! }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod logging;
pub mod queue;
#[cfg(feature = "speech")]
pub mod speech;

// Re-export main types for convenience
pub use config::{ComeviewConfig, QueueConfig, SpeechConfig};
pub use error::{ComeviewError, ComeviewResult};
pub use queue::{
    AdmissionPolicy, Comment, CommentQueue, Priority, PriorityOrder, QueueState, Sequence,
    SharedCommentQueue,
};
#[cfg(feature = "speech")]
pub use speech::{
    Narration, Narrator, SpeechBackend, SpeechPipeline, SynthesisPlan, SynthesizedAudio,
    VoicevoxClient, WavSummary,
};

/// Version information for the comeview-core crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
