//! Gesture dispatch queue
//!
//! Button tasks publish into a [`GestureQueue`]; the coordinator task drains
//! it. The queue is the only thing shared between them: button callbacks
//! never touch LEDs or power lines.
//!
//! On target, declare it `static` with `CriticalSectionRawMutex` when button
//! tasks run on an interrupt executor, or `NoopRawMutex` when every task
//! shares the thread-mode executor:
//!
//! ```no_run
//! use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
//! use firmware::input::{GestureQueue, GESTURE_QUEUE_DEPTH};
//!
//! static GESTURES: GestureQueue<CriticalSectionRawMutex, GESTURE_QUEUE_DEPTH> =
//!     GestureQueue::new();
//! ```
//!
//! # Overflow handling
//!
//! Sends never block. If the coordinator is in the middle of a power
//! sequence and the queue fills up, further gestures are dropped; they
//! would have been discarded by the coordinator anyway.

use embassy_sync::channel::Channel;
use platform::GestureEvent;

/// Depth of the dispatch queue.
///
/// Two keys, at most one gesture per press: eight slots cover a user
/// mashing both keys through a full power-off sequence.
pub const GESTURE_QUEUE_DEPTH: usize = 8;

/// Queue type shared between button tasks and the coordinator.
pub type GestureQueue<M, const N: usize> = Channel<M, GestureEvent, N>;
