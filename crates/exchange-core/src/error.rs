//! Error types for the exchange front end.
//!
//! Delivery into a postable target is best-effort: a [`DeliveryError`] is
//! something a target may report, but [`post_msg`](crate::post_msg) logs and
//! drops it. The sender never sees it.

use thiserror::Error;

/// Failure reported by a target while receiving one message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    /// The receiving side is gone (e.g. a closed channel).
    #[error("target closed")]
    Closed,

    /// The target received the message but could not process it.
    #[error("delivery failed: {0}")]
    Failed(String),
}
