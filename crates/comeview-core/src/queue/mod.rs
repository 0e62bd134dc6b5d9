//! Comment queue: admission, ordering and release of live comments.

mod comment;
mod comment_queue;
mod policy;
mod shared;

pub use comment::{Comment, Priority, Sequence};
pub use comment_queue::{CommentQueue, QueueState};
pub use policy::{AdmissionPolicy, PriorityOrder};
pub use shared::SharedCommentQueue;
