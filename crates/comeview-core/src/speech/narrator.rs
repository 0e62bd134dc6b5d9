//! Releases queued comments and reads them aloud.

use super::audio::SynthesizedAudio;
use super::backend::SpeechBackend;
use super::pipeline::SpeechPipeline;
use crate::error::ComeviewResult;
use crate::queue::{Comment, Sequence, SharedCommentQueue};
use tracing::{debug, warn};

/// Outcome of reading one comment aloud.
///
/// The comment has already left the queue, whether or not synthesis worked.
#[derive(Debug)]
pub struct Narration {
    /// The released comment
    pub comment: Comment,
    /// Audio for the comment's body, or the stage that failed
    pub audio: ComeviewResult<SynthesizedAudio>,
}

impl Narration {
    /// Whether audio was produced
    #[must_use]
    pub const fn is_spoken(&self) -> bool {
        self.audio.is_ok()
    }

    /// Put the same comment back into `queue` as a new admission.
    ///
    /// The re-admitted comment gets a fresh sequence and so queues behind
    /// comments of equal priority that are already waiting.
    pub fn readmit(&self, queue: &SharedCommentQueue) -> Sequence {
        queue.admit(
            self.comment.priority(),
            self.comment.author(),
            self.comment.body(),
        )
    }
}

/// Couples a shared queue to a speech pipeline
#[derive(Debug, Clone)]
pub struct Narrator<B> {
    queue: SharedCommentQueue,
    pipeline: SpeechPipeline<B>,
}

impl<B: SpeechBackend> Narrator<B> {
    /// Create a narrator reading from `queue`
    #[must_use]
    pub fn new(queue: SharedCommentQueue, pipeline: SpeechPipeline<B>) -> Self {
        Self { queue, pipeline }
    }

    /// The queue being read
    #[must_use]
    pub const fn queue(&self) -> &SharedCommentQueue {
        &self.queue
    }

    /// The pipeline used for synthesis
    #[must_use]
    pub const fn pipeline(&self) -> &SpeechPipeline<B> {
        &self.pipeline
    }

    /// Release the next comment and synthesize its body.
    ///
    /// Returns `None` when the queue is empty. The queue lock is not held
    /// while the speech service is contacted.
    pub async fn narrate_next(&self) -> Option<Narration> {
        let comment = self.queue.release_next_comment()?;
        debug!(sequence = comment.sequence(), "Narrating comment");

        let audio = self.pipeline.speak(comment.body()).await;
        if let Err(e) = &audio {
            warn!(
                sequence = comment.sequence(),
                category = e.category(),
                "Comment released without audio: {}",
                e
            );
        }

        Some(Narration { comment, audio })
    }
}

#[cfg(test)]
mod tests {
    use super::super::pipeline::fake::FakeBackend;
    use super::*;
    use crate::config::SpeechConfig;
    use crate::error::ComeviewError;

    fn narrator(backend: FakeBackend) -> Narrator<FakeBackend> {
        Narrator::new(
            SharedCommentQueue::default(),
            SpeechPipeline::new(backend, &SpeechConfig::default()),
        )
    }

    #[tokio::test]
    async fn test_empty_queue_narrates_nothing() {
        let narrator = narrator(FakeBackend::default());
        assert!(narrator.narrate_next().await.is_none());
        assert!(narrator.pipeline().backend().calls.lock().is_empty());
    }

    #[tokio::test]
    async fn test_narrates_in_queue_order() {
        let narrator = narrator(FakeBackend::default());
        narrator.queue().admit(1, "A", "hello");
        narrator.queue().admit(5, "B", "world");

        let first = narrator.narrate_next().await.unwrap();
        assert!(first.is_spoken());
        assert_eq!(first.comment.body(), "world");

        let second = narrator.narrate_next().await.unwrap();
        assert_eq!(second.comment.author(), "A");
        assert!(narrator.narrate_next().await.is_none());
    }

    #[tokio::test]
    async fn test_failure_leaves_comment_released() {
        let narrator = narrator(FakeBackend {
            fail_query: true,
            ..FakeBackend::default()
        });
        narrator.queue().admit(3, "viewer", "retry me");

        let narration = narrator.narrate_next().await.unwrap();
        assert!(!narration.is_spoken());
        assert!(matches!(narration.audio, Err(ComeviewError::QueryError { .. })));
        assert!(narrator.queue().is_empty());

        narration.readmit(narrator.queue());
        assert_eq!(narrator.queue().len(), 1);
        assert_eq!(narrator.queue().release_next().as_deref(), Some("retry me"));
    }

    #[tokio::test]
    async fn test_blank_body_released_without_service_call() {
        let narrator = narrator(FakeBackend::default());
        narrator.queue().admit(0, "quiet", "");

        let narration = narrator.narrate_next().await.unwrap();
        assert_eq!(narration.comment.body(), "");
        assert!(matches!(narration.audio, Err(ComeviewError::InvalidInput { .. })));
        assert!(narrator.pipeline().backend().calls.lock().is_empty());
    }
}
