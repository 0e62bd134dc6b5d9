//! JavaScript bindings for the comment queue

use comeview_core::{
    AdmissionPolicy, Comment, CommentQueue, ComeviewResult, Priority, PriorityOrder, QueueConfig,
};
use wasm_bindgen::prelude::*;

use crate::error::comeview_error_to_js;

/// JavaScript wrapper for PriorityOrder
#[wasm_bindgen(js_name = "PriorityOrder")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsPriorityOrder {
    /// Largest priority first
    HighestFirst = 0,
    /// Smallest priority first
    LowestFirst = 1,
}

impl From<PriorityOrder> for JsPriorityOrder {
    fn from(order: PriorityOrder) -> Self {
        match order {
            PriorityOrder::HighestFirst => Self::HighestFirst,
            PriorityOrder::LowestFirst => Self::LowestFirst,
        }
    }
}

impl From<JsPriorityOrder> for PriorityOrder {
    fn from(order: JsPriorityOrder) -> Self {
        match order {
            JsPriorityOrder::HighestFirst => Self::HighestFirst,
            JsPriorityOrder::LowestFirst => Self::LowestFirst,
        }
    }
}

/// JavaScript wrapper for a released Comment
#[wasm_bindgen(js_name = "Comment")]
#[derive(Debug, Clone)]
pub struct JsComment {
    inner: Comment,
}

#[wasm_bindgen(js_class = "Comment")]
impl JsComment {
    /// Priority given at admission
    #[must_use]
    #[wasm_bindgen(getter)]
    pub fn priority(&self) -> i32 {
        to_js_priority(self.inner.priority())
    }

    /// Author name
    #[must_use]
    #[wasm_bindgen(getter)]
    pub fn author(&self) -> String {
        self.inner.author().to_string()
    }

    /// Comment text
    #[must_use]
    #[wasm_bindgen(getter)]
    pub fn text(&self) -> String {
        self.inner.body().to_string()
    }

    /// Admission counter value
    #[must_use]
    #[wasm_bindgen(getter)]
    pub fn sequence(&self) -> u64 {
        self.inner.sequence()
    }

    /// Admission time in milliseconds since the Unix epoch
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    #[wasm_bindgen(getter, js_name = "receivedAt")]
    pub fn received_at(&self) -> f64 {
        self.inner.received_at().timestamp_millis() as f64
    }
}

/// JavaScript wrapper for CommentQueue.
///
/// Each JS object owns its own queue; the host decides how many to create.
#[wasm_bindgen(js_name = "CommentQueue")]
#[derive(Debug, Default)]
pub struct JsCommentQueue {
    inner: CommentQueue,
}

#[wasm_bindgen(js_class = "CommentQueue")]
impl JsCommentQueue {
    /// Empty queue releasing the highest priority first
    #[must_use]
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: CommentQueue::new(),
        }
    }

    /// Empty queue releasing the lowest priority first
    #[must_use]
    pub fn lowest_first() -> Self {
        Self {
            inner: CommentQueue::with_order(PriorityOrder::LowestFirst),
        }
    }

    /// Empty queue with explicit ordering and admission screening
    #[must_use]
    #[wasm_bindgen(js_name = "withOptions")]
    pub fn with_options(order: JsPriorityOrder, strict: bool) -> Self {
        let admission = if strict {
            AdmissionPolicy::Strict
        } else {
            AdmissionPolicy::Lenient
        };
        Self {
            inner: CommentQueue::with_config(&QueueConfig {
                order: order.into(),
                admission,
            }),
        }
    }

    /// Admit a comment; never fails. Returns the assigned sequence.
    pub fn add_comment(&mut self, priority: i32, author: String, text: String) -> u64 {
        self.inner.admit(Priority::from(priority), author, text)
    }

    /// Admit a comment through the admission policy, throwing if it is rejected
    ///
    /// # Errors
    ///
    /// Throws an `Error` whose message starts with `[input]` when the
    /// queue was built with `strict` and the comment fails screening.
    pub fn try_add_comment(
        &mut self,
        priority: i32,
        author: String,
        text: String,
    ) -> Result<u64, JsError> {
        self.admit_checked(priority, author, text)
            .map_err(|e| comeview_error_to_js(&e))
    }

    /// Remove the next comment and return its text, or `undefined` when empty
    pub fn pop_next_text(&mut self) -> Option<String> {
        self.inner.release_next()
    }

    /// Remove the next comment and return it whole, or `undefined` when empty
    pub fn pop_next_comment(&mut self) -> Option<JsComment> {
        self.inner
            .release_next_comment()
            .map(|inner| JsComment { inner })
    }

    /// Text of the comment that would be popped next
    #[must_use]
    pub fn peek_next_text(&self) -> Option<String> {
        self.inner.peek().map(|c| c.body().to_string())
    }

    /// Number of pending comments
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Number of pending comments, as a property
    #[must_use]
    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.inner.len()
    }

    /// Whether nothing is pending
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Priority direction in use
    #[must_use]
    #[wasm_bindgen(getter)]
    pub fn order(&self) -> JsPriorityOrder {
        self.inner.order().into()
    }
}

impl JsCommentQueue {
    fn admit_checked(
        &mut self,
        priority: i32,
        author: String,
        text: String,
    ) -> ComeviewResult<u64> {
        self.inner.try_admit(Priority::from(priority), author, text)
    }
}

fn to_js_priority(priority: Priority) -> i32 {
    i32::try_from(priority).unwrap_or(if priority < 0 { i32::MIN } else { i32::MAX })
}
