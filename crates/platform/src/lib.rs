//! Hardware Abstraction Layer (HAL) for the Yaka voice-assistant board
//!
//! This crate holds the hardware-independent half of board control: the
//! types that describe buttons, gestures, LEDs and power state, the pure
//! gesture classifier, and the trait seams the firmware crate plugs real
//! pins, buses and the application into.
//!
//! # Architecture Layers
//!
//! ```text
//! Application (chat state machine, WiFi station)
//!         ↑ Application / NetworkStation traits
//! Board control (firmware crate: coordinator, LED backends, button tasks)
//!         ↓
//! Platform HAL (this crate - types, classifier, trait abstractions)
//!         ↓
//! embedded-hal 1.0 pins / I2C / PWM  +  embassy-time
//! ```
//!
//! # Modules
//!
//! - [`input`] - Button identity, gesture events, active level
//! - [`gesture`] - Debounce + click / long-press classifier
//! - [`subscription`] - Gesture sinks and per-button subscriber lists
//! - [`led`] - LED capability trait and [`Brightness`]
//! - [`power`] - Power state machine states
//! - [`app`] - Application / network boundary traits
//! - [`time`] - Clock abstraction over `embassy_time::Instant`
//! - [`config`] - Timing defaults and sequencing configuration
//! - [`pca9557`] - PCA9557 I2C I/O expander driver
//!
//! # Features
//!
//! - `std`: Enable the [`mocks`] module outside of this crate's own tests
//! - `defmt`: Enable `defmt::Format` derives
//!
//! # Example
//!
//! ```no_run
//! use embassy_time::Instant;
//! use platform::{Button, ButtonConfig, GestureClassifier, GestureKind};
//!
//! let mut classifier = GestureClassifier::new(Button::KeyA, ButtonConfig::default());
//! classifier.on_edge(true, Instant::from_millis(0));
//! let long = classifier.poll(Instant::from_millis(1_000));
//! assert_eq!(long.map(|e| e.kind), Some(GestureKind::LongPress));
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(clippy::unreachable)] // no unreachable!() that isn't documented
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)] // unsafe fn body is not implicitly unsafe block
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
// Pedantic lints suppressed for this hardware HAL crate:
#![allow(clippy::doc_markdown)] // hex addresses and register names in doc comments
#![allow(clippy::must_use_candidate)] // hardware accessors — callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(async_fn_in_trait)] // Embassy no_std: single-threaded, Send bounds not needed

pub mod app;
pub mod config;
pub mod gesture;
pub mod input;
pub mod led;
pub mod pca9557;
pub mod power;
pub mod subscription;
pub mod time;

pub mod mocks;

// Re-export the types board code touches on every line
pub use app::{Application, InteractionState, NetworkStation};
pub use config::{ButtonConfigError, SequenceTiming};
pub use gesture::{ButtonConfig, GestureClassifier};
pub use input::{ActiveLevel, Button, GestureEvent, GestureKind};
pub use led::{Brightness, Led};
pub use power::PowerState;
pub use subscription::{GestureSink, SubscribeError, Subscribers};
pub use time::{Clock, EmbassyTimebase};
