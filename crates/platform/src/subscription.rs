//! Gesture subscription
//!
//! A button publishes each classified gesture to every sink subscribed to
//! that gesture kind. Sinks must not block: the button task calls them
//! inline. The usual sink is the coordinator's dispatch
//! [`Channel`], which only enqueues.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Channel;

use crate::input::{GestureEvent, GestureKind};

/// Receiver of published gestures.
pub trait GestureSink {
    /// Take one event. Must return promptly.
    fn deliver(&self, event: GestureEvent);
}

/// A dispatch queue is a sink: events are enqueued without blocking and
/// dropped if the queue is full.
impl<M: RawMutex, const N: usize> GestureSink for Channel<M, GestureEvent, N> {
    fn deliver(&self, event: GestureEvent) {
        // ok: a full queue means the consumer is mid-sequence and would
        // discard the gesture anyway
        let _ = self.try_send(event);
    }
}

/// Subscription list is at capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SubscribeError {
    /// No free slot for another sink
    Full,
}

impl core::fmt::Display for SubscribeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Full => write!(f, "subscriber list full"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SubscribeError {}

struct Subscription<'a> {
    kind: GestureKind,
    sink: &'a dyn GestureSink,
}

/// Fixed-capacity list of `(kind, sink)` subscriptions for one button.
pub struct Subscribers<'a, const N: usize> {
    entries: heapless::Vec<Subscription<'a>, N>,
}

impl<'a, const N: usize> Subscribers<'a, N> {
    /// Empty list.
    pub const fn new() -> Self {
        Self {
            entries: heapless::Vec::new(),
        }
    }

    /// Register `sink` for events of `kind`.
    pub fn subscribe(
        &mut self,
        kind: GestureKind,
        sink: &'a dyn GestureSink,
    ) -> Result<(), SubscribeError> {
        self.entries
            .push(Subscription { kind, sink })
            .map_err(|_| SubscribeError::Full)
    }

    /// Deliver `event` to every matching sink; returns how many received it.
    pub fn publish(&self, event: GestureEvent) -> usize {
        let mut delivered = 0usize;
        for entry in self.entries.iter().filter(|e| e.kind == event.kind) {
            entry.sink.deliver(event);
            delivered = delivered.saturating_add(1);
        }
        delivered
    }

    /// Number of registrations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// No registrations.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<const N: usize> Default for Subscribers<'_, N> {
    fn default() -> Self {
        Self::new()
    }
}
