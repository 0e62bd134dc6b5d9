//! Priority queue of pending comments with FIFO tie-breaking.

use super::comment::{Comment, Priority, Sequence};
use super::policy::{AdmissionPolicy, PriorityOrder};
use crate::config::QueueConfig;
use crate::error::ComeviewResult;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use tracing::{debug, warn};

/// Observable queue state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueueState {
    /// No comments pending
    Empty,
    /// At least one comment pending
    NonEmpty,
}

impl std::fmt::Display for QueueState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "Empty"),
            Self::NonEmpty => write!(f, "NonEmpty"),
        }
    }
}

/// Heap entry. The heap is a max-heap, so the entry to release next must
/// compare greatest. The key is fixed at admission from the queue's order.
#[derive(Debug)]
struct Pending {
    key: (Priority, Reverse<Sequence>),
    comment: Comment,
}

impl Pending {
    fn new(order: PriorityOrder, comment: Comment) -> Self {
        Self {
            key: (
                order.release_key(comment.priority()),
                Reverse(comment.sequence()),
            ),
            comment,
        }
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Pending {}

/// Ordered collection of pending comments.
///
/// Comments are released by [`PriorityOrder`] and, within one priority,
/// in admission order. The queue owns every comment it holds and hands
/// ownership to the caller on release.
///
/// ```
/// use comeview_core::CommentQueue;
///
/// let mut queue = CommentQueue::new();
/// queue.admit(1, "A", "hello");
/// queue.admit(5, "B", "world");
/// queue.admit(5, "C", "there");
///
/// assert_eq!(queue.release_next().as_deref(), Some("world"));
/// assert_eq!(queue.release_next().as_deref(), Some("there"));
/// assert_eq!(queue.release_next().as_deref(), Some("hello"));
/// assert_eq!(queue.release_next(), None);
/// ```
#[derive(Debug)]
pub struct CommentQueue {
    pending: BinaryHeap<Pending>,
    next_sequence: Sequence,
    order: PriorityOrder,
    admission: AdmissionPolicy,
}

impl CommentQueue {
    /// Create an empty queue releasing the highest priority first
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&QueueConfig::default())
    }

    /// Create an empty queue with the given priority direction
    #[must_use]
    pub fn with_order(order: PriorityOrder) -> Self {
        Self::with_config(&QueueConfig {
            order,
            ..QueueConfig::default()
        })
    }

    /// Create an empty queue from configuration
    #[must_use]
    pub fn with_config(config: &QueueConfig) -> Self {
        Self {
            pending: BinaryHeap::new(),
            next_sequence: 0,
            order: config.order,
            admission: config.admission,
        }
    }

    /// Admit a comment. Always succeeds and returns the assigned sequence.
    pub fn admit(
        &mut self,
        priority: Priority,
        author: impl Into<String>,
        body: impl Into<String>,
    ) -> Sequence {
        let sequence = self.next_sequence;
        self.next_sequence += 1;

        let comment = Comment::new(priority, author.into(), body.into(), sequence);
        self.pending.push(Pending::new(self.order, comment));

        debug!(sequence, priority, pending = self.pending.len(), "Admitted comment");
        sequence
    }

    /// Admit a comment after screening it with the configured [`AdmissionPolicy`].
    ///
    /// A rejected comment does not consume a sequence value.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the policy rejects the comment.
    pub fn try_admit(
        &mut self,
        priority: Priority,
        author: impl Into<String>,
        body: impl Into<String>,
    ) -> ComeviewResult<Sequence> {
        let author = author.into();
        let body = body.into();

        if let Err(err) = self.admission.check(priority, &author, &body) {
            warn!(priority, "Rejected comment: {}", err);
            return Err(err);
        }

        Ok(self.admit(priority, author, body))
    }

    /// Remove the next comment and return its text, or `None` if nothing is pending.
    pub fn release_next(&mut self) -> Option<String> {
        self.release_next_comment().map(Comment::into_body)
    }

    /// Remove the next comment and return it whole, or `None` if nothing is pending.
    pub fn release_next_comment(&mut self) -> Option<Comment> {
        let Pending { comment, .. } = self.pending.pop()?;
        debug!(
            sequence = comment.sequence(),
            priority = comment.priority(),
            pending = self.pending.len(),
            "Released comment"
        );
        Some(comment)
    }

    /// The comment `release_next` would return, without removing it
    #[must_use]
    pub fn peek(&self) -> Option<&Comment> {
        self.pending.peek().map(|pending| &pending.comment)
    }

    /// Number of pending comments
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is pending
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Current observable state
    #[must_use]
    pub fn state(&self) -> QueueState {
        if self.is_empty() {
            QueueState::Empty
        } else {
            QueueState::NonEmpty
        }
    }

    /// Priority direction this queue was built with
    #[must_use]
    pub const fn order(&self) -> PriorityOrder {
        self.order
    }

    /// Admission policy used by `try_admit`
    #[must_use]
    pub const fn admission(&self) -> AdmissionPolicy {
        self.admission
    }

    /// Total number of comments ever admitted
    #[must_use]
    pub const fn admitted_total(&self) -> u64 {
        self.next_sequence
    }
}

impl Default for CommentQueue {
    fn default() -> Self {
        Self::new()
    }
}
