//! The immutable comment record held by the queue.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Priority value attached to a comment at admission.
///
/// Which end of the range is released first is decided by
/// [`PriorityOrder`](super::PriorityOrder).
pub type Priority = i64;

/// Admission counter value. Strictly increasing, never reused.
pub type Sequence = u64;

/// A viewer comment waiting in, or released from, a [`CommentQueue`](super::CommentQueue).
///
/// Comments are only constructed by the queue and cannot be modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    priority: Priority,
    author: String,
    body: String,
    sequence: Sequence,
    received_at: DateTime<Utc>,
}

impl Comment {
    pub(crate) fn new(priority: Priority, author: String, body: String, sequence: Sequence) -> Self {
        Self {
            priority,
            author,
            body,
            sequence,
            received_at: Utc::now(),
        }
    }

    /// Priority given at admission
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Author name as given at admission
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Comment text as given at admission
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Admission counter value
    #[must_use]
    pub const fn sequence(&self) -> Sequence {
        self.sequence
    }

    /// Wall-clock time the comment was admitted. Never used for ordering.
    #[must_use]
    pub const fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }

    /// Consume the comment and take its text
    #[must_use]
    pub fn into_body(self) -> String {
        self.body
    }

    /// Consume the comment and take author and text
    #[must_use]
    pub fn into_parts(self) -> (String, String) {
        (self.author, self.body)
    }
}
