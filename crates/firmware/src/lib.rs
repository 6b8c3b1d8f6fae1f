//! Yaka board control firmware
//!
//! Button gestures in, power and LED sequencing out, for the battery-powered
//! voice-assistant boards.
//!
//! # Architecture
//!
//! ```text
//! ButtonInput (one per key)          edge wait + classifier
//!         ↓ GestureSink
//! GestureQueue                       bounded, never blocks the sender
//!         ↓
//! PowerCoordinator                   power state machine + LED bank
//!         ↓
//! Led backends / ModuleEnables / power-enable line
//! ```
//!
//! Board differences (pins, LED backend, timing, key policy) live in
//! [`board`] profiles; everything else is generic over `embedded-hal`.
//!
//! # Features
//!
//! - `defmt` - log through defmt (target builds)
//! - `tracing` - log through tracing (host harness)
//! - `std` - enable standard library (mocks, `std::error::Error` impls)

#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
// Upgrade relevant warns to deny; keep pedantic as warn (too noisy for firmware)
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Critical correctness: deny these
#![deny(clippy::await_holding_lock)] // holding a blocking Mutex across .await is a bug
#![deny(unsafe_op_in_unsafe_fn)]
// Logging discipline
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![warn(clippy::dbg_macro)]
// Intentional allows for this codebase:
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::unused_async)]
// Executor-local futures only; no Send bound wanted on async trait methods.
#![allow(async_fn_in_trait)]

// Must come first so the macros are visible in every module below.
#[macro_use]
mod fmt;

pub mod board;
pub mod input;
pub mod leds;
pub mod power;

// Re-export key types
pub use board::{BoardProfile, ConfigError, LedWiring, YAKA_V1, YAKA_V2};
pub use input::{ButtonInput, GestureQueue, GESTURE_QUEUE_DEPTH};
pub use leds::{LedBank, LedBankError};
pub use power::{ButtonBinding, ClickAction, ModuleEnables, PowerCoordinator};
