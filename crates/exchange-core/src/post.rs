//! The "postable" capability and its dispatcher.
//!
//! A value is postable for protocol `P` when it implements [`Post<P>`].
//! There are three ways to get there, in order of preference:
//!
//! 1. **Method**: the type implements [`Post<P>`] itself. Gateways and
//!    sinks do this.
//! 2. **Free function**: a plain value paired with a free function
//!    `fn(&mut T, ProtocolMsg<P>) -> Result<(), DeliveryError>` through
//!    [`post_via`].
//! 3. **Callable**: any `FnMut(ProtocolMsg<P>)` closure or fn item is
//!    postable as-is.
//!
//! Coherence guarantees a type gets exactly one of these, and the choice is
//! made at compile time. Use [`BoxedPost`] only where type erasure is
//! actually needed (e.g. a list of subscribers).
//!
//! Delivery always goes through [`post_msg`], which never reports failure
//! back to the sender: an `Err` from the target is logged and dropped, and
//! so is a panic.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use tracing::warn;

use crate::envelope::ProtocolMsg;
use crate::error::DeliveryError;
use crate::protocol::ProtocolTag;

/// Capability to receive one complete message framed in protocol `P`.
pub trait Post<P: ProtocolTag> {
    /// Receive `msg`. The bytes are only borrowed for the duration of the
    /// call; copy them to keep them.
    fn post(&mut self, msg: ProtocolMsg<'_, P>) -> Result<(), DeliveryError>;
}

/// Callable shape: closures and fn items taking the message.
impl<P, F> Post<P> for F
where
    P: ProtocolTag,
    F: FnMut(ProtocolMsg<'_, P>),
{
    fn post(&mut self, msg: ProtocolMsg<'_, P>) -> Result<(), DeliveryError> {
        self(msg);
        Ok(())
    }
}

/// Free-function shape: a target value plus the function that delivers to it.
///
/// Built with [`post_via`].
#[derive(Debug, Clone)]
pub struct PostVia<T, F> {
    target: T,
    route: F,
}

/// Pair `target` with a free delivery function.
///
/// ```
/// use exchange_core::{post_msg, post_via, DeliveryError, OuchMsg};
///
/// fn record(log: &mut Vec<Vec<u8>>, msg: OuchMsg<'_>) -> Result<(), DeliveryError> {
///     log.push(msg.as_bytes().to_vec());
///     Ok(())
/// }
///
/// let mut sink = post_via(Vec::new(), record);
/// post_msg(&mut sink, OuchMsg::new(b"hello"));
/// assert_eq!(sink.target().len(), 1);
/// ```
pub fn post_via<P, T, F>(target: T, route: F) -> PostVia<T, F>
where
    P: ProtocolTag,
    F: FnMut(&mut T, ProtocolMsg<'_, P>) -> Result<(), DeliveryError>,
{
    PostVia { target, route }
}

impl<T, F> PostVia<T, F> {
    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn into_inner(self) -> T {
        self.target
    }
}

impl<P, T, F> Post<P> for PostVia<T, F>
where
    P: ProtocolTag,
    F: FnMut(&mut T, ProtocolMsg<'_, P>) -> Result<(), DeliveryError>,
{
    fn post(&mut self, msg: ProtocolMsg<'_, P>) -> Result<(), DeliveryError> {
        (self.route)(&mut self.target, msg)
    }
}

/// Owned, type-erased target.
///
/// `Box<dyn Post<P>>` is not postable itself (it would collide with the
/// callable shape), so boxed targets travel in this wrapper instead.
pub struct BoxedPost<P: ProtocolTag>(Box<dyn Post<P>>);

impl<P: ProtocolTag> BoxedPost<P> {
    pub fn new<T: Post<P> + 'static>(target: T) -> Self {
        BoxedPost(Box::new(target))
    }
}

impl<P: ProtocolTag> From<Box<dyn Post<P>>> for BoxedPost<P> {
    fn from(target: Box<dyn Post<P>>) -> Self {
        BoxedPost(target)
    }
}

impl<P: ProtocolTag> Post<P> for BoxedPost<P> {
    fn post(&mut self, msg: ProtocolMsg<'_, P>) -> Result<(), DeliveryError> {
        self.0.post(msg)
    }
}

impl<P: ProtocolTag> fmt::Debug for BoxedPost<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BoxedPost").field(&P::PROTOCOL).finish()
    }
}

/// Deliver one message to `target`, best-effort.
///
/// Whatever happens inside the target stays there: errors and panics are
/// logged and discarded, and the caller's state is unaffected.
pub fn post_msg<P, T>(target: &mut T, msg: ProtocolMsg<'_, P>)
where
    P: ProtocolTag,
    T: Post<P> + ?Sized,
{
    match panic::catch_unwind(AssertUnwindSafe(|| target.post(msg))) {
        Ok(Ok(())) => {}
        Ok(Err(err)) => {
            warn!(
                protocol = %P::PROTOCOL,
                len = msg.len(),
                error = %err,
                "delivery failed, message dropped"
            );
        }
        Err(_) => {
            warn!(
                protocol = %P::PROTOCOL,
                len = msg.len(),
                "target panicked during delivery, message dropped"
            );
        }
    }
}

/// Compile-time check that `T` is postable for `P`.
pub fn assert_postable<P: ProtocolTag, T: Post<P> + ?Sized>(_target: &T) {}
