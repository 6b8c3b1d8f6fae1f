//! Button input.
//!
//! Each physical key gets a [`ButtonInput`]: it owns the GPIO line, runs a
//! [`platform::GestureClassifier`] and publishes `Click` / `LongPress` /
//! `Release` events to its subscribers. The usual subscriber is the
//! [`GestureQueue`] drained by the power coordinator.
//!
//! # Example
//!
//! ```no_run
//! use embassy_sync::blocking_mutex::raw::NoopRawMutex;
//! use firmware::input::{ButtonInput, GestureQueue, GESTURE_QUEUE_DEPTH};
//! use platform::{Button, ButtonConfig};
//!
//! async fn key_task<P>(pin: P, queue: &GestureQueue<NoopRawMutex, GESTURE_QUEUE_DEPTH>)
//! where
//!     P: embedded_hal::digital::InputPin + embedded_hal_async::digital::Wait,
//! {
//!     let mut key = ButtonInput::new(Button::KeyA, pin, ButtonConfig::default());
//!     key.on_click(queue).ok();
//!     key.on_long_press(queue).ok();
//!     key.run().await
//! }
//! ```

pub mod button;
pub mod dispatch;

pub use button::{ButtonInput, MAX_SUBSCRIBERS};
pub use dispatch::{GestureQueue, GESTURE_QUEUE_DEPTH};

// Re-export the event types so callers only need `firmware::input`.
pub use platform::{Button, ButtonConfig, GestureEvent, GestureKind};

use embassy_futures::join::join;
use embedded_hal::digital::InputPin;
use embedded_hal_async::digital::Wait;

/// Drive two buttons from one task.
///
/// Boards with two user keys run them side by side so a single task slot
/// covers all input.
pub async fn run_pair<A, B>(a: &mut ButtonInput<'_, A>, b: &mut ButtonInput<'_, B>) -> !
where
    A: InputPin + Wait,
    B: InputPin + Wait,
{
    let (never, _) = join(a.run(), b.run()).await;
    never
}
