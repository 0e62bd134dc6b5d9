//! WebAssembly bindings for the Comeview comment queue
//!
//! Exposes the queue to a browser overlay as a `CommentQueue` class with
//! `add_comment` and `pop_next_text`. There is no module-level state: the
//! host constructs one queue per session and keeps it alive itself.

#![deny(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

mod comment_queue;
mod error;

pub use comment_queue::{JsComment, JsCommentQueue, JsPriorityOrder};
pub use error::comeview_error_to_js;

/// Version of the underlying core crate
#[must_use]
#[wasm_bindgen::prelude::wasm_bindgen(js_name = "coreVersion")]
pub fn core_version() -> String {
    comeview_core::VERSION.to_string()
}
