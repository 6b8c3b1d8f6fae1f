//! Dimmable LED on a PWM channel.

use embedded_hal::pwm::SetDutyCycle;
use platform::{Brightness, Led};

/// LED whose brightness is the PWM duty cycle.
///
/// Brightness changes while dark are remembered and applied on the next
/// `turn_on`.
pub struct PwmLed<C: SetDutyCycle> {
    channel: C,
    brightness: Brightness,
    lit: bool,
}

impl<C: SetDutyCycle> PwmLed<C> {
    /// Dark LED at full brightness once lit.
    pub fn new(channel: C) -> Self {
        Self {
            channel,
            brightness: Brightness::FULL,
            lit: false,
        }
    }

    /// Current brightness setting.
    pub fn brightness(&self) -> Brightness {
        self.brightness
    }

    /// Give the channel back.
    pub fn release(self) -> C {
        self.channel
    }
}

impl<C: SetDutyCycle> Led for PwmLed<C> {
    type Error = C::Error;

    fn turn_on(&mut self) -> Result<(), Self::Error> {
        self.channel.set_duty_cycle_percent(self.brightness.get())?;
        self.lit = true;
        Ok(())
    }

    fn turn_off(&mut self) -> Result<(), Self::Error> {
        self.channel.set_duty_cycle_fully_off()?;
        self.lit = false;
        Ok(())
    }

    fn is_dimmable(&self) -> bool {
        true
    }

    fn set_brightness(&mut self, brightness: Brightness) -> Result<(), Self::Error> {
        self.brightness = brightness;
        if self.lit {
            self.channel.set_duty_cycle_percent(brightness.get())?;
        }
        Ok(())
    }
}
