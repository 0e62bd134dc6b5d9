//! Thread-safe handle for queues fed by several comment sources.

use super::comment::{Comment, Priority, Sequence};
use super::comment_queue::{CommentQueue, QueueState};
use crate::error::ComeviewResult;
use parking_lot::Mutex;
use std::sync::Arc;

/// Cloneable handle to one [`CommentQueue`] shared between producers and
/// the consumer. Every call takes the lock for a single queue operation.
#[derive(Debug, Clone, Default)]
pub struct SharedCommentQueue {
    inner: Arc<Mutex<CommentQueue>>,
}

impl SharedCommentQueue {
    /// Wrap an existing queue
    #[must_use]
    pub fn new(queue: CommentQueue) -> Self {
        Self {
            inner: Arc::new(Mutex::new(queue)),
        }
    }

    /// See [`CommentQueue::admit`]
    pub fn admit(
        &self,
        priority: Priority,
        author: impl Into<String>,
        body: impl Into<String>,
    ) -> Sequence {
        self.inner.lock().admit(priority, author, body)
    }

    /// See [`CommentQueue::try_admit`]
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the queue's admission policy rejects the comment.
    pub fn try_admit(
        &self,
        priority: Priority,
        author: impl Into<String>,
        body: impl Into<String>,
    ) -> ComeviewResult<Sequence> {
        self.inner.lock().try_admit(priority, author, body)
    }

    /// See [`CommentQueue::release_next`]
    pub fn release_next(&self) -> Option<String> {
        self.inner.lock().release_next()
    }

    /// See [`CommentQueue::release_next_comment`]
    pub fn release_next_comment(&self) -> Option<Comment> {
        self.inner.lock().release_next_comment()
    }

    /// Clone of the comment that would be released next
    #[must_use]
    pub fn peek(&self) -> Option<Comment> {
        self.inner.lock().peek().cloned()
    }

    /// Number of pending comments
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Whether nothing is pending
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Current observable state
    #[must_use]
    pub fn state(&self) -> QueueState {
        self.inner.lock().state()
    }
}

impl From<CommentQueue> for SharedCommentQueue {
    fn from(queue: CommentQueue) -> Self {
        Self::new(queue)
    }
}
