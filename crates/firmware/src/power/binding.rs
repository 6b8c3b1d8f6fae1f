//! Per-button gesture policy.

use platform::Button;

/// What a click on a button does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClickAction {
    /// Toggle the whole LED bank (only while powered on)
    ToggleLeds,
    /// Start/stop a conversation; resets WiFi provisioning first when the
    /// application is still starting without a connection
    Interact,
    /// Clicks on this button do nothing
    Ignore,
}

impl ClickAction {
    /// Short name used in log lines.
    pub const fn as_str(self) -> &'static str {
        match self {
            ClickAction::ToggleLeds => "toggle-leds",
            ClickAction::Interact => "interact",
            ClickAction::Ignore => "ignore",
        }
    }
}

/// Gesture policy for one button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonBinding {
    /// Button this policy applies to
    pub button: Button,
    /// Click behaviour
    pub on_click: ClickAction,
    /// A long press toggles board power
    pub long_press_power: bool,
}

impl ButtonBinding {
    /// Binding with the given click action that also toggles power on long
    /// press.
    pub const fn power_key(button: Button, on_click: ClickAction) -> Self {
        Self {
            button,
            on_click,
            long_press_power: true,
        }
    }

    /// Binding with the given click action and no long-press behaviour.
    pub const fn click_only(button: Button, on_click: ClickAction) -> Self {
        Self {
            button,
            on_click,
            long_press_power: false,
        }
    }
}
