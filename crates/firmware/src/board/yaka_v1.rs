//! First board revision.
//!
//! One status LED on a GPIO, cellular modem and microphone enables, two
//! keys. Either key powers the board with a long press.

use platform::{
    config::{DEFAULT_DEBOUNCE_MS, DEFAULT_LONG_PRESS_MS, SINGLE_LED_STEP_MS},
    Button, ButtonConfig, SequenceTiming,
};

use super::{BoardProfile, ButtonSpec, LedWiring};
use crate::power::{ButtonBinding, ClickAction};

/// Power-enable self-latch.
pub const PWR_EN_GPIO: u8 = 41;
/// Cellular modem enable.
pub const MODEM_EN_GPIO: u8 = 14;
/// Microphone front-end enable.
pub const MIC_EN_GPIO: u8 = 9;
/// Status LED.
pub const LED1_GPIO: u8 = 37;
/// Addressable RGB pixel, used as the application status light.
pub const BUILTIN_LED_GPIO: u8 = 8;

const KEY_CONFIG: ButtonConfig = ButtonConfig::new(DEFAULT_DEBOUNCE_MS, DEFAULT_LONG_PRESS_MS);

/// Profile for the first revision.
pub const YAKA_V1: BoardProfile = BoardProfile {
    name: "yaka-v1",
    power_enable_pin: PWR_EN_GPIO,
    module_pins: Some((MODEM_EN_GPIO, MIC_EN_GPIO)),
    leds: LedWiring::Gpio(&[LED1_GPIO]),
    buttons: &[
        ButtonSpec {
            pin: 42,
            config: KEY_CONFIG,
            binding: ButtonBinding::power_key(Button::KeyA, ClickAction::ToggleLeds),
        },
        ButtonSpec {
            pin: 15,
            config: KEY_CONFIG,
            binding: ButtonBinding::power_key(Button::KeyB, ClickAction::Interact),
        },
    ],
    // A single LED gets a slow step so the sequence stays visible.
    timing: SequenceTiming::with_led_step(SINGLE_LED_STEP_MS),
    latch_power_at_boot: true,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_is_valid() {
        assert_eq!(YAKA_V1.validate(), Ok(()));
    }

    #[test]
    fn single_led_uses_slow_step() {
        assert_eq!(YAKA_V1.led_count(), 1);
        assert_eq!(YAKA_V1.timing.startup_step_ms, 1_000);
        assert_eq!(YAKA_V1.timing.power_on_ms(1), 1_100);
    }

    #[test]
    fn both_keys_toggle_power() {
        assert!(YAKA_V1.bindings().all(|b| b.long_press_power));
        assert_eq!(
            YAKA_V1.button(Button::KeyB).map(|s| s.binding.on_click),
            Some(ClickAction::Interact)
        );
        assert!(YAKA_V1.button(Button::Boot).is_none());
    }
}
