//! Auxiliary module enables (cellular modem + microphone front-end).
//!
//! Both lines always move together. A failed write rolls the set back to
//! disabled so the two modules never end up in different states.

use embedded_hal::digital::{OutputPin, StatefulOutputPin};

/// Which module line failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModuleLine {
    /// Cellular modem enable
    Modem,
    /// Microphone front-end enable
    Mic,
}

impl ModuleLine {
    /// Short name used in log lines.
    pub const fn as_str(self) -> &'static str {
        match self {
            ModuleLine::Modem => "modem",
            ModuleLine::Mic => "mic",
        }
    }
}

/// Module enable write failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModuleError {
    /// Failing line
    pub line: ModuleLine,
}

impl core::fmt::Display for ModuleError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} enable line write failed", self.line.as_str())
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ModuleError {}

/// The module enable set.
///
/// Boards without module enables use [`ModuleEnables::none`]; the set then
/// only tracks the flag.
pub struct ModuleEnables<P> {
    lines: Option<(P, P)>,
    enabled: bool,
}

impl<P: OutputPin + StatefulOutputPin> ModuleEnables<P> {
    /// Take both lines and drive them low.
    pub fn new(mut modem: P, mut mic: P) -> Self {
        // Ignore the errors here; the first enable() surfaces a broken line.
        let _ = modem.set_low();
        let _ = mic.set_low();
        Self {
            lines: Some((modem, mic)),
            enabled: false,
        }
    }

    /// Board has no module enable lines.
    pub fn none() -> Self {
        Self {
            lines: None,
            enabled: false,
        }
    }

    /// Both modules enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Raise both lines. On failure both are lowered again.
    pub fn enable(&mut self) -> Result<(), ModuleError> {
        if let Err(e) = self.raise() {
            let _ = self.lower_both();
            self.enabled = false;
            warn!("{} enable failed, module set rolled back", e.line.as_str());
            return Err(e);
        }
        self.enabled = true;
        self.verify(true);
        Ok(())
    }

    /// Lower both lines. Both are attempted even if the first fails.
    pub fn disable(&mut self) -> Result<(), ModuleError> {
        let result = self.lower_both();
        self.enabled = false;
        if let Err(e) = result {
            warn!("{} disable failed", e.line.as_str());
            return Err(e);
        }
        self.verify(false);
        Ok(())
    }

    fn raise(&mut self) -> Result<(), ModuleError> {
        let Some((modem, mic)) = self.lines.as_mut() else {
            return Ok(());
        };
        modem.set_high().map_err(|_| ModuleError {
            line: ModuleLine::Modem,
        })?;
        mic.set_high().map_err(|_| ModuleError {
            line: ModuleLine::Mic,
        })
    }

    fn lower_both(&mut self) -> Result<(), ModuleError> {
        let Some((modem, mic)) = self.lines.as_mut() else {
            return Ok(());
        };
        let modem_result = modem.set_low();
        let mic_result = mic.set_low();
        if modem_result.is_err() {
            return Err(ModuleError {
                line: ModuleLine::Modem,
            });
        }
        if mic_result.is_err() {
            return Err(ModuleError {
                line: ModuleLine::Mic,
            });
        }
        Ok(())
    }

    /// Compare line state with what was commanded; mismatches are logged.
    fn verify(&mut self, expected: bool) {
        let Some((modem, mic)) = self.lines.as_mut() else {
            return;
        };
        for (line, pin) in [(ModuleLine::Modem, modem), (ModuleLine::Mic, mic)] {
            match pin.is_set_high() {
                Ok(level) if level == expected => {}
                Ok(level) => warn!(
                    "{} enable reads {} after writing {}",
                    line.as_str(),
                    level_name(level),
                    level_name(expected)
                ),
                Err(_) => warn!("{} enable state unreadable", line.as_str()),
            }
        }
    }
}

/// Placeholder line type for [`ModuleEnables::none`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLine;

impl embedded_hal::digital::ErrorType for NoLine {
    type Error = core::convert::Infallible;
}

impl OutputPin for NoLine {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl StatefulOutputPin for NoLine {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(false)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(true)
    }
}

pub(crate) const fn level_name(high: bool) -> &'static str {
    if high {
        "high"
    } else {
        "low"
    }
}
