//! Event publishing/subscription abstraction (mechanics only).
//!
//! The bus distributes integration events from the module that saved an aggregate to
//! every module keeping a local representation of it.
//!
//! - **Broadcast**: each subscription receives a copy of every message
//! - **At-least-once**: consumers must tolerate duplicates
//! - **No persistence**: a message published while nobody listens is gone

use std::sync::Arc;
use std::sync::mpsc::Receiver;
use std::time::Duration;

use tracing::{debug, warn};

use crate::{Event, EventEnvelope};

/// A subscription to an event stream.
///
/// ```ignore
/// let subscription = bus.subscribe();
/// loop {
///     match subscription.recv_timeout(Duration::from_millis(250)) {
///         Ok(envelope) => handle(envelope),
///         Err(RecvTimeoutError::Timeout) => continue,      // check for shutdown
///         Err(RecvTimeoutError::Disconnected) => break,    // bus dropped
///     }
/// }
/// ```
///
/// Subscriptions are meant for a single consuming thread.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Block until the next message is available.
    pub fn recv(&self) -> Result<M, std::sync::mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, std::sync::mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a message.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<M, std::sync::mpsc::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }
}

/// Module-agnostic pub/sub bus.
///
/// `publish()` may fail (e.g. a poisoned lock); the caller decides what that means.
/// Command handlers publish only after saving, so a failure never loses state.
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}

impl<M, B> EventBus<M> for Arc<B>
where
    B: EventBus<M> + ?Sized,
{
    type Error = B::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message)
    }

    fn subscribe(&self) -> Subscription<M> {
        (**self).subscribe()
    }
}

/// Wrap `event` in an envelope and publish it; failures are logged, not returned.
///
/// Used by command handlers after a successful save: the aggregate is already
/// persisted, so a lost notification must not turn the command into an error.
pub fn publish_or_warn<E, B>(bus: &B, source: &'static str, event: E)
where
    E: Event,
    B: EventBus<EventEnvelope<E>> + ?Sized,
{
    let event_type = event.event_type();
    let envelope = EventEnvelope::wrap(source, event);
    let event_id = envelope.event_id();

    match bus.publish(envelope) {
        Ok(()) => debug!(source, event_type, %event_id, "integration event published"),
        Err(err) => warn!(source, event_type, %event_id, error = ?err, "integration event publication failed"),
    }
}
