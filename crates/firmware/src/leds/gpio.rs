//! LED on a plain GPIO line.

use embedded_hal::digital::OutputPin;
use platform::{ActiveLevel, Led};

/// On/off LED driven directly by an output pin.
pub struct GpioLed<P: OutputPin> {
    pin: P,
    active: ActiveLevel,
}

impl<P: OutputPin> GpioLed<P> {
    /// LED lit when the line is high.
    pub fn new(pin: P) -> Self {
        Self::with_active_level(pin, ActiveLevel::High)
    }

    /// LED lit at `active` (sink-driven LEDs are active-low).
    pub fn with_active_level(pin: P, active: ActiveLevel) -> Self {
        Self { pin, active }
    }

    /// Give the pin back.
    pub fn release(self) -> P {
        self.pin
    }

    fn drive(&mut self, lit: bool) -> Result<(), P::Error> {
        if self.active.line_high_for(lit) {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        }
    }
}

impl<P: OutputPin> Led for GpioLed<P> {
    type Error = P::Error;

    fn turn_on(&mut self) -> Result<(), Self::Error> {
        self.drive(true)
    }

    fn turn_off(&mut self) -> Result<(), Self::Error> {
        self.drive(false)
    }
}
