//! LED capability trait
//!
//! Every status-LED backend (plain GPIO, PWM channel, I/O-expander bit,
//! addressable pixel) implements [`Led`]. Backends that cannot dim keep the
//! default [`Led::set_brightness`], which ignores the request.

/// LED brightness in percent, always within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Brightness(u8);

impl Brightness {
    /// LED dark.
    pub const OFF: Self = Self(0);
    /// Full brightness.
    pub const FULL: Self = Self(100);

    /// Clamp `percent` to `0..=100`.
    pub const fn new(percent: u8) -> Self {
        if percent > 100 {
            Self(100)
        } else {
            Self(percent)
        }
    }

    /// Clamp a signed request (callers may pass out-of-range values).
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_percent(percent: i32) -> Self {
        Self(percent.clamp(0, 100) as u8)
    }

    /// Percent value.
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Scale to an 8-bit channel value (`100` → `255`).
    #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
    pub const fn to_u8_scale(self) -> u8 {
        // 0..=100 * 255 / 100 stays within u16 and 0..=255
        (self.0 as u16 * 255 / 100) as u8
    }
}

impl Default for Brightness {
    fn default() -> Self {
        Self::FULL
    }
}

/// A single status LED.
pub trait Led {
    /// Backend error type.
    type Error: core::fmt::Debug;

    /// Light the LED.
    fn turn_on(&mut self) -> Result<(), Self::Error>;

    /// Switch the LED off.
    fn turn_off(&mut self) -> Result<(), Self::Error>;

    /// Drive the LED to `on`.
    fn set(&mut self, on: bool) -> Result<(), Self::Error> {
        if on {
            self.turn_on()
        } else {
            self.turn_off()
        }
    }

    /// Whether [`set_brightness`](Self::set_brightness) has any effect.
    fn is_dimmable(&self) -> bool {
        false
    }

    /// Set brightness for the lit state. Non-dimmable backends ignore it.
    fn set_brightness(&mut self, _brightness: Brightness) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<T: Led + ?Sized> Led for &mut T {
    type Error = T::Error;

    fn turn_on(&mut self) -> Result<(), Self::Error> {
        T::turn_on(self)
    }

    fn turn_off(&mut self) -> Result<(), Self::Error> {
        T::turn_off(self)
    }

    fn is_dimmable(&self) -> bool {
        T::is_dimmable(self)
    }

    fn set_brightness(&mut self, brightness: Brightness) -> Result<(), Self::Error> {
        T::set_brightness(self, brightness)
    }
}
