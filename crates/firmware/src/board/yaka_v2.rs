//! Second board revision.
//!
//! Five status LEDs move to a PCA9557 expander, the module enables are gone
//! and the boot strap key becomes the conversation key. Only KeyA toggles
//! power.

use platform::{
    config::{DEFAULT_LED_STEP_MS, DEFAULT_LONG_PRESS_MS},
    pca9557::PCA9557_I2C_ADDR,
    Button, ButtonConfig, SequenceTiming,
};

use super::{BoardProfile, ButtonSpec, LedWiring};
use crate::power::{ButtonBinding, ClickAction};

/// Power-enable self-latch.
pub const PWR_EN_GPIO: u8 = 41;
/// I2C data line to the expander.
pub const I2C_SDA_GPIO: u8 = 1;
/// I2C clock line to the expander.
pub const I2C_SCL_GPIO: u8 = 2;
/// Addressable RGB pixel.
pub const BUILTIN_LED_GPIO: u8 = 8;

/// Expander pins carrying LED1..LED5.
pub const LED_BITS: [u8; 5] = [3, 4, 5, 6, 7];

/// Contacts on this revision bounce less; a short window keeps clicks snappy.
const KEY_DEBOUNCE_MS: u32 = 20;
const KEY_CONFIG: ButtonConfig = ButtonConfig::new(KEY_DEBOUNCE_MS, DEFAULT_LONG_PRESS_MS);

/// Profile for the second revision.
pub const YAKA_V2: BoardProfile = BoardProfile {
    name: "yaka-v2",
    power_enable_pin: PWR_EN_GPIO,
    module_pins: None,
    leds: LedWiring::Expander {
        addr: PCA9557_I2C_ADDR,
        bits: &LED_BITS,
    },
    buttons: &[
        ButtonSpec {
            pin: 0,
            config: KEY_CONFIG,
            binding: ButtonBinding::click_only(Button::Boot, ClickAction::Interact),
        },
        ButtonSpec {
            pin: 42,
            config: KEY_CONFIG,
            binding: ButtonBinding::power_key(Button::KeyA, ClickAction::Ignore),
        },
        ButtonSpec {
            pin: 15,
            config: KEY_CONFIG,
            binding: ButtonBinding::click_only(Button::KeyB, ClickAction::ToggleLeds),
        },
    ],
    // The latch needs half a second before anything else draws current.
    timing: SequenceTiming {
        boot_latch_ms: 500,
        ..SequenceTiming::with_led_step(DEFAULT_LED_STEP_MS)
    },
    latch_power_at_boot: true,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_is_valid() {
        assert_eq!(YAKA_V2.validate(), Ok(()));
    }

    #[test]
    fn leds_on_expander_without_modules() {
        assert_eq!(YAKA_V2.led_count(), 5);
        assert_eq!(YAKA_V2.module_pins, None);
        assert_eq!(YAKA_V2.leds.expander_init(), Some((0x19, 0x03, 0x00)));
    }

    #[test]
    fn keys_use_short_debounce() {
        assert!(YAKA_V2.buttons.iter().all(|s| s.config.debounce_ms == 20));
    }

    #[test]
    fn only_key_a_controls_power() {
        let power_keys: Vec<Button> = YAKA_V2
            .bindings()
            .filter(|b| b.long_press_power)
            .map(|b| b.button)
            .collect();
        assert_eq!(power_keys, vec![Button::KeyA]);
    }

    #[test]
    fn boot_latch_hold_is_separate_from_settle() {
        assert_eq!(YAKA_V2.timing.boot_latch_ms, 500);
        assert_eq!(YAKA_V2.timing.module_settle_ms, 100);
    }

    #[test]
    fn sequence_lower_bounds() {
        assert_eq!(YAKA_V2.timing.power_on_ms(5), 1_100);
        assert_eq!(YAKA_V2.timing.power_off_ms(5), 2_000);
    }
}
