//! Board profiles
//!
//! A [`BoardProfile`] collects everything that differs between board
//! revisions: pins, LED backend and count, button timing and policy,
//! sequencing delays. Profiles are `const` and checked once at start-up
//! with [`BoardProfile::validate`]; a configuration error stops bring-up.

pub mod yaka_v1;
pub mod yaka_v2;

pub use yaka_v1::YAKA_V1;
pub use yaka_v2::YAKA_V2;

use platform::{pca9557, Button, ButtonConfig, ButtonConfigError, SequenceTiming};

use crate::power::{ButtonBinding, MAX_BINDINGS};

/// Largest LED bank a profile may describe.
pub const MAX_LEDS: usize = 8;

/// Power enable + two module enables + LEDs + keys.
const MAX_PINS: usize = 16;

/// Where the status LEDs are wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedWiring {
    /// One MCU GPIO per LED
    Gpio(&'static [u8]),
    /// One PCA9557 output bit per LED
    Expander {
        /// 7-bit I2C address
        addr: u8,
        /// Expander pins, in bank order
        bits: &'static [u8],
    },
}

impl LedWiring {
    /// Number of LEDs described.
    pub const fn len(&self) -> usize {
        match self {
            LedWiring::Gpio(pins) => pins.len(),
            LedWiring::Expander { bits, .. } => bits.len(),
        }
    }

    /// No LEDs described.
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Output-register mask covering the expander LED bits.
    ///
    /// Zero for GPIO wiring or when a bit is out of range.
    pub fn expander_mask(&self) -> u8 {
        match self {
            LedWiring::Gpio(_) => 0,
            LedWiring::Expander { bits, .. } => bits
                .iter()
                .filter_map(|bit| pca9557::pin_mask(*bit))
                .fold(0, |mask, bit| mask | bit),
        }
    }

    /// Expander bring-up values: `(addr, output, config)`.
    ///
    /// Starts from the reset image the board expects and turns the LED bits
    /// into outputs driven low. `None` for GPIO wiring.
    pub fn expander_init(&self) -> Option<(u8, u8, u8)> {
        match self {
            LedWiring::Gpio(_) => None,
            LedWiring::Expander { addr, .. } => {
                let mask = self.expander_mask();
                Some((
                    *addr,
                    pca9557::OUTPUT_INIT & !mask,
                    pca9557::CONFIG_INIT & !mask,
                ))
            }
        }
    }
}

/// One key on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonSpec {
    /// MCU GPIO number
    pub pin: u8,
    /// Timing and active level
    pub config: ButtonConfig,
    /// Gesture policy
    pub binding: ButtonBinding,
}

impl ButtonSpec {
    /// Button identity.
    pub const fn button(&self) -> Button {
        self.binding.button
    }
}

/// Everything board-specific.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardProfile {
    /// Board name for the boot log
    pub name: &'static str,
    /// Power-enable (self-latch) GPIO
    pub power_enable_pin: u8,
    /// Modem and microphone enable GPIOs
    pub module_pins: Option<(u8, u8)>,
    /// Status LED wiring
    pub leds: LedWiring,
    /// User keys
    pub buttons: &'static [ButtonSpec],
    /// Sequencing delays
    pub timing: SequenceTiming,
    /// Assert power-enable immediately at boot
    pub latch_power_at_boot: bool,
}

/// Invalid board profile. Fatal at initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Profile lists no LEDs
    NoLeds,
    /// More LEDs than [`MAX_LEDS`]
    TooManyLeds(usize),
    /// More keys than the coordinator can bind
    TooManyButtons(usize),
    /// Expander pin above 7
    InvalidExpanderBit(u8),
    /// Same GPIO used twice
    DuplicatePin(u8),
    /// Same key listed twice
    DuplicateButton(Button),
    /// Key timing rejected
    Button {
        /// Offending key
        button: Button,
        /// Why
        reason: ButtonConfigError,
    },
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NoLeds => write!(f, "board has no status LEDs"),
            Self::TooManyLeds(n) => write!(f, "{n} LEDs exceed the maximum of {MAX_LEDS}"),
            Self::TooManyButtons(n) => {
                write!(f, "{n} buttons exceed the maximum of {MAX_BINDINGS}")
            }
            Self::InvalidExpanderBit(bit) => write!(f, "expander has no pin {bit}"),
            Self::DuplicatePin(pin) => write!(f, "GPIO {pin} assigned twice"),
            Self::DuplicateButton(b) => write!(f, "button {} listed twice", b.as_str()),
            Self::Button { button, reason } => {
                write!(f, "button {}: {reason}", button.as_str())
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

impl BoardProfile {
    /// Check the profile before any hardware is touched.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let led_count = self.leds.len();
        if led_count == 0 {
            return Err(ConfigError::NoLeds);
        }
        if led_count > MAX_LEDS {
            return Err(ConfigError::TooManyLeds(led_count));
        }
        if let LedWiring::Expander { bits, .. } = self.leds {
            if let Some(bad) = bits.iter().find(|b| **b > 7) {
                return Err(ConfigError::InvalidExpanderBit(*bad));
            }
        }
        if self.buttons.len() > MAX_BINDINGS {
            return Err(ConfigError::TooManyButtons(self.buttons.len()));
        }

        for (i, spec) in self.buttons.iter().enumerate() {
            spec.config.validate().map_err(|reason| ConfigError::Button {
                button: spec.button(),
                reason,
            })?;
            if self
                .buttons
                .iter()
                .skip(i.saturating_add(1))
                .any(|other| other.button() == spec.button())
            {
                return Err(ConfigError::DuplicateButton(spec.button()));
            }
        }

        let mut pins: heapless::Vec<u8, MAX_PINS> = heapless::Vec::new();
        let mut claim = |pin: u8| -> Result<(), ConfigError> {
            if pins.contains(&pin) {
                return Err(ConfigError::DuplicatePin(pin));
            }
            // Capacity covers every pin a valid profile can name.
            let _ = pins.push(pin);
            Ok(())
        };
        claim(self.power_enable_pin)?;
        if let Some((modem, mic)) = self.module_pins {
            claim(modem)?;
            claim(mic)?;
        }
        if let LedWiring::Gpio(led_pins) = self.leds {
            for pin in led_pins {
                claim(*pin)?;
            }
        }
        for spec in self.buttons {
            claim(spec.pin)?;
        }
        Ok(())
    }

    /// Number of status LEDs.
    pub const fn led_count(&self) -> usize {
        self.leds.len()
    }

    /// Button policies, in profile order.
    pub fn bindings(&self) -> impl Iterator<Item = ButtonBinding> + '_ {
        self.buttons.iter().map(|spec| spec.binding)
    }

    /// Spec for `button`, if the board has it.
    pub fn button(&self, button: Button) -> Option<&ButtonSpec> {
        self.buttons.iter().find(|spec| spec.button() == button)
    }
}
