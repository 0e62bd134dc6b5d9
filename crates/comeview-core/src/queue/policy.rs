//! Ordering and admission policies.

use super::comment::Priority;
use crate::error::{ComeviewError, ComeviewResult};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Which end of the priority range is released first.
///
/// Ties are always broken by admission order, earliest first, whichever
/// direction is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityOrder {
    /// Numerically largest priority is released first
    #[default]
    HighestFirst,
    /// Numerically smallest priority is released first
    LowestFirst,
}

impl PriorityOrder {
    /// Compare two priorities. `Greater` means `a` is released before `b`.
    #[must_use]
    pub fn rank(self, a: Priority, b: Priority) -> Ordering {
        self.release_key(a).cmp(&self.release_key(b))
    }

    /// Map a priority onto a key where larger means released sooner.
    ///
    /// Bitwise negation reverses the order of every `i64` without overflow.
    #[must_use]
    pub const fn release_key(self, priority: Priority) -> Priority {
        match self {
            Self::HighestFirst => priority,
            Self::LowestFirst => !priority,
        }
    }
}

impl std::fmt::Display for PriorityOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HighestFirst => write!(f, "highest_first"),
            Self::LowestFirst => write!(f, "lowest_first"),
        }
    }
}

/// How `try_admit` screens incoming comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdmissionPolicy {
    /// Accept everything
    #[default]
    Lenient,
    /// Reject blank bodies, empty authors and non-positive priorities
    Strict,
}

impl AdmissionPolicy {
    /// Check a candidate comment against this policy
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the policy is `Strict` and the comment
    /// has a blank body, an empty author, or a priority below 1.
    pub fn check(self, priority: Priority, author: &str, body: &str) -> ComeviewResult<()> {
        if self == Self::Lenient {
            return Ok(());
        }

        if body.trim().is_empty() {
            return Err(ComeviewError::invalid_input("Comment body cannot be blank"));
        }

        if author.is_empty() {
            return Err(ComeviewError::invalid_input("Comment author cannot be empty"));
        }

        if priority < 1 {
            return Err(ComeviewError::invalid_input(format!(
                "Priority must be positive, got {priority}"
            )));
        }

        Ok(())
    }
}
