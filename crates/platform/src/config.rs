//! Timing defaults and sequencing configuration
//!
//! Every delay the board uses is a construction-time parameter. The
//! constants below are the values both board variants start from; board
//! profiles override what differs.

/// Default debounce window for mechanical keys.
pub const DEFAULT_DEBOUNCE_MS: u32 = 50;

/// Default long-press threshold.
pub const DEFAULT_LONG_PRESS_MS: u32 = 1_000;

/// Wait after enabling the auxiliary modules before touching the LEDs.
pub const DEFAULT_MODULE_SETTLE_MS: u32 = 100;

/// Hold after a boot latch asserts power-enable. Zero unless the board's
/// supply needs time to take over from the strap.
pub const DEFAULT_BOOT_LATCH_MS: u32 = 0;

/// Pause before the first LED goes dark on shutdown.
pub const DEFAULT_SHUTDOWN_LEAD_IN_MS: u32 = 500;

/// Wait between disabling the modules and dropping the power-enable line.
pub const DEFAULT_RAIL_DRAIN_MS: u32 = 500;

/// Per-LED step for banks of several LEDs.
pub const DEFAULT_LED_STEP_MS: u32 = 200;

/// Per-LED step for single-LED banks, where a short step is invisible.
pub const SINGLE_LED_STEP_MS: u32 = 1_000;

/// Delays used by the power-on / power-off sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SequenceTiming {
    /// After a boot latch asserts power-enable, before the modules
    pub boot_latch_ms: u32,
    /// After module enable, before the startup LED sequence
    pub module_settle_ms: u32,
    /// Between consecutive LEDs in the startup sequence
    pub startup_step_ms: u32,
    /// Before the shutdown LED sequence starts
    pub shutdown_lead_in_ms: u32,
    /// Between consecutive LEDs in the shutdown sequence
    pub shutdown_step_ms: u32,
    /// After module disable, before power-enable drops
    pub rail_drain_ms: u32,
}

impl SequenceTiming {
    /// Defaults with the same per-LED step for both directions.
    pub const fn with_led_step(step_ms: u32) -> Self {
        Self {
            boot_latch_ms: DEFAULT_BOOT_LATCH_MS,
            module_settle_ms: DEFAULT_MODULE_SETTLE_MS,
            startup_step_ms: step_ms,
            shutdown_lead_in_ms: DEFAULT_SHUTDOWN_LEAD_IN_MS,
            shutdown_step_ms: step_ms,
            rail_drain_ms: DEFAULT_RAIL_DRAIN_MS,
        }
    }

    /// Lower bound on a full power-on for a bank of `leds` LEDs.
    pub const fn power_on_ms(&self, leds: u32) -> u32 {
        self.module_settle_ms
            .saturating_add(self.startup_step_ms.saturating_mul(leds))
    }

    /// Lower bound on a full power-off for a bank of `leds` LEDs.
    pub const fn power_off_ms(&self, leds: u32) -> u32 {
        self.shutdown_lead_in_ms
            .saturating_add(self.shutdown_step_ms.saturating_mul(leds))
            .saturating_add(self.rail_drain_ms)
    }
}

impl Default for SequenceTiming {
    fn default() -> Self {
        Self::with_led_step(DEFAULT_LED_STEP_MS)
    }
}

/// Rejected button timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonConfigError {
    /// Debounce window of zero accepts every bounce
    ZeroDebounce,
    /// Long-press threshold must be strictly above the debounce window
    LongPressNotAboveDebounce {
        /// Configured debounce window
        debounce_ms: u32,
        /// Configured long-press threshold
        long_press_ms: u32,
    },
}

impl core::fmt::Display for ButtonConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ZeroDebounce => write!(f, "debounce window must be non-zero"),
            Self::LongPressNotAboveDebounce {
                debounce_ms,
                long_press_ms,
            } => write!(
                f,
                "long-press threshold {long_press_ms} ms must exceed debounce {debounce_ms} ms"
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ButtonConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timing_uses_short_step() {
        let t = SequenceTiming::default();
        assert_eq!(t.startup_step_ms, 200);
        assert_eq!(t.shutdown_step_ms, 200);
        assert_eq!(t.module_settle_ms, 100);
        assert_eq!(t.boot_latch_ms, 0);
    }

    #[test]
    fn five_leds_power_on_takes_at_least_1100_ms() {
        assert_eq!(SequenceTiming::default().power_on_ms(5), 1_100);
    }

    #[test]
    fn power_off_includes_lead_in_and_drain() {
        assert_eq!(SequenceTiming::default().power_off_ms(5), 500 + 1_000 + 500);
    }

    #[test]
    fn durations_saturate() {
        let t = SequenceTiming::with_led_step(u32::MAX);
        assert_eq!(t.power_on_ms(5), u32::MAX);
    }
}
