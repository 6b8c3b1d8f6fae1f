//! Ordered LED bank with the bank-wide "all on" flag.

use embedded_hal_async::delay::DelayNs;
use platform::{Brightness, Led};

/// Rejected LED bank call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedBankError {
    /// Index outside `0..len`
    InvalidIndex {
        /// Requested index
        index: usize,
        /// Bank size
        len: usize,
    },
}

impl core::fmt::Display for LedBankError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidIndex { index, len } => {
                write!(f, "LED index {index} out of range (bank has {len})")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LedBankError {}

/// `N` LEDs in index order.
///
/// The bank remembers the commanded state of every LED. Hardware write
/// errors are logged and the commanded state is kept: there is no
/// read-back path for most LED backends.
pub struct LedBank<L: Led, const N: usize> {
    leds: [L; N],
    lit: [bool; N],
    all_on: bool,
    brightness: Brightness,
}

impl<L: Led, const N: usize> LedBank<L, N> {
    /// Wrap `leds`; all are assumed dark until the first write.
    pub fn new(leds: [L; N]) -> Self {
        Self {
            leds,
            lit: [false; N],
            all_on: false,
            brightness: Brightness::FULL,
        }
    }

    /// Number of LEDs.
    pub const fn len(&self) -> usize {
        N
    }

    /// Bank has no LEDs.
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// The bank-wide toggle flag.
    pub fn all_on(&self) -> bool {
        self.all_on
    }

    /// Commanded state of LED `index`.
    pub fn is_lit(&self, index: usize) -> Option<bool> {
        self.lit.get(index).copied()
    }

    /// Commanded state of every LED, in order.
    pub fn states(&self) -> [bool; N] {
        self.lit
    }

    /// Brightness last requested through [`set_brightness`](Self::set_brightness).
    pub fn brightness(&self) -> Brightness {
        self.brightness
    }

    /// Switch one LED.
    pub fn set_led(&mut self, index: usize, on: bool) -> Result<(), LedBankError> {
        self.drive(index, on)?;
        self.all_on = self.lit.iter().all(|lit| *lit);
        Ok(())
    }

    /// Switch every LED in index order, without delay.
    pub fn set_all(&mut self, on: bool) {
        for index in 0..N {
            // ok: index < N
            let _ = self.drive(index, on);
        }
        self.all_on = on;
        debug!("all LEDs {}", if on { "on" } else { "off" });
    }

    /// Invert the bank-wide flag and apply it to every LED.
    pub fn toggle(&mut self) {
        self.set_all(!self.all_on);
    }

    /// Apply `brightness` to every dimmable LED.
    ///
    /// Non-dimmable LEDs are left alone. Returns how many LEDs took it.
    pub fn set_brightness(&mut self, brightness: Brightness) -> usize {
        self.brightness = brightness;
        let mut applied = 0usize;
        for (index, led) in self.leds.iter_mut().enumerate() {
            if !led.is_dimmable() {
                continue;
            }
            match led.set_brightness(brightness) {
                Ok(()) => applied = applied.saturating_add(1),
                Err(_) => warn!("LED {} brightness write failed", index),
            }
        }
        applied
    }

    /// Light LEDs `0..N` one by one, `step_ms` apart.
    ///
    /// Each LED is lit before the wait that precedes the next one, so LED
    /// `i` is visible for a full step before LED `i + 1` is commanded.
    pub async fn startup_sequence<D: DelayNs>(&mut self, delay: &mut D, step_ms: u32) {
        for index in 0..N {
            let _ = self.drive(index, true);
            trace!("startup LED {} on", index);
            delay.delay_ms(step_ms).await;
        }
        self.all_on = true;
    }

    /// After `lead_in_ms`, darken LEDs `N-1..=0` one by one, `step_ms` apart.
    pub async fn shutdown_sequence<D: DelayNs>(
        &mut self,
        delay: &mut D,
        lead_in_ms: u32,
        step_ms: u32,
    ) {
        delay.delay_ms(lead_in_ms).await;
        for index in (0..N).rev() {
            let _ = self.drive(index, false);
            trace!("shutdown LED {} off", index);
            delay.delay_ms(step_ms).await;
        }
        self.all_on = false;
    }

    fn drive(&mut self, index: usize, on: bool) -> Result<(), LedBankError> {
        let (Some(led), Some(lit)) = (self.leds.get_mut(index), self.lit.get_mut(index)) else {
            warn!("LED index {} out of range (bank has {})", index, N);
            return Err(LedBankError::InvalidIndex { index, len: N });
        };
        if led.set(on).is_err() {
            warn!("LED {} write failed", index);
        }
        *lit = on;
        Ok(())
    }
}
