//! Status LEDs
//!
//! Backends implementing [`platform::Led`]:
//!
//! | Backend | Hardware | Dimmable |
//! |---------|----------|----------|
//! | [`GpioLed`] | output pin | no |
//! | [`PwmLed`] | PWM channel | yes |
//! | [`ExpanderLed`] | PCA9557 output bit | no |
//! | [`RgbLed`] | addressable RGB pixel | yes |
//!
//! [`LedBank`] orders them and runs the startup/shutdown animations.

pub mod bank;
pub mod expander;
pub mod gpio;
pub mod pwm;
pub mod rgb;

pub use bank::{LedBank, LedBankError};
pub use expander::{ExpanderLed, SharedExpander};
pub use gpio::GpioLed;
pub use pwm::PwmLed;
pub use rgb::RgbLed;
