//! LED on one output bit of a shared PCA9557.
//!
//! Several LEDs share one expander, and each write is a read-modify-write
//! of the output register, so the expander sits behind a blocking mutex.
//! The lock is held only for the two I2C transfers.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embedded_hal::i2c::I2c;
use platform::pca9557::{Pca9557, Pca9557Error};
use platform::{ActiveLevel, Led};

/// Shared expander handle.
pub type SharedExpander<M, I> = Mutex<M, RefCell<Pca9557<I>>>;

/// LED driven by expander pin `bit`.
pub struct ExpanderLed<'a, M: RawMutex, I: I2c> {
    expander: &'a SharedExpander<M, I>,
    bit: u8,
    active: ActiveLevel,
}

impl<'a, M: RawMutex, I: I2c> ExpanderLed<'a, M, I> {
    /// Active-high LED on `bit`.
    pub fn new(expander: &'a SharedExpander<M, I>, bit: u8) -> Self {
        Self {
            expander,
            bit,
            active: ActiveLevel::High,
        }
    }

    /// Override the active level.
    pub fn with_active_level(mut self, active: ActiveLevel) -> Self {
        self.active = active;
        self
    }

    /// Expander pin this LED sits on.
    pub fn bit(&self) -> u8 {
        self.bit
    }

    fn drive(&mut self, lit: bool) -> Result<(), Pca9557Error<I::Error>> {
        let high = self.active.line_high_for(lit);
        let bit = self.bit;
        self.expander
            .lock(|cell| cell.borrow_mut().set_output_state(bit, high))
    }
}

impl<M: RawMutex, I: I2c> Led for ExpanderLed<'_, M, I> {
    type Error = Pca9557Error<I::Error>;

    fn turn_on(&mut self) -> Result<(), Self::Error> {
        self.drive(true)
    }

    fn turn_off(&mut self) -> Result<(), Self::Error> {
        self.drive(false)
    }
}
