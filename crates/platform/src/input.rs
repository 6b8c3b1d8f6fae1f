//! Button identity and gesture events

use embassy_time::Instant;

/// Physical keys present on the supported boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Front key A (power / LED key on both boards)
    KeyA,
    /// Front key B
    KeyB,
    /// Boot strapping key, usable as a user key after reset
    Boot,
}

impl Button {
    /// Logical name used in log lines.
    pub const fn as_str(self) -> &'static str {
        match self {
            Button::KeyA => "key-a",
            Button::KeyB => "key-b",
            Button::Boot => "boot",
        }
    }
}

/// Gesture classes produced by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GestureKind {
    /// Press released between the debounce window and the long-press threshold
    Click,
    /// Press held past the long-press threshold; emitted at the threshold
    LongPress,
    /// Release ending a long press (opt-in per button)
    Release,
}

impl GestureKind {
    /// Short name used in log lines.
    pub const fn as_str(self) -> &'static str {
        match self {
            GestureKind::Click => "click",
            GestureKind::LongPress => "long-press",
            GestureKind::Release => "release",
        }
    }
}

/// A classified gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GestureEvent {
    /// Gesture class
    pub kind: GestureKind,
    /// Originating button
    pub button: Button,
    /// When the gesture happened (release edge for clicks, threshold
    /// crossing for long presses)
    pub at: Instant,
}

impl GestureEvent {
    /// Construct an event.
    pub const fn new(kind: GestureKind, button: Button, at: Instant) -> Self {
        Self { kind, button, at }
    }
}

/// Electrical level that means "pressed".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveLevel {
    /// Key shorts the line to ground (pull-up wiring)
    #[default]
    Low,
    /// Key drives the line high (pull-down wiring)
    High,
}

impl ActiveLevel {
    /// Translate a line level into a pressed flag.
    pub const fn is_pressed(self, line_high: bool) -> bool {
        match self {
            ActiveLevel::Low => !line_high,
            ActiveLevel::High => line_high,
        }
    }

    /// Line level that represents `active` (used when driving outputs).
    pub const fn line_high_for(self, active: bool) -> bool {
        match self {
            ActiveLevel::Low => !active,
            ActiveLevel::High => active,
        }
    }
}
