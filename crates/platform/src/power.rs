//! Power state
//!
//! ```text
//!        LongPress                  sequence done
//!   Off ───────────▶ PoweringOn ─────────────────▶ On
//!    ▲                                              │
//!    │ sequence done                     LongPress  │
//!    └──────────────── PoweringOff ◀────────────────┘
//! ```
//!
//! No other edges exist. Only the coordinator moves between states.

/// Board power state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerState {
    /// Rails down, modules disabled, LEDs dark
    #[default]
    Off,
    /// Startup sequence in progress
    PoweringOn,
    /// Fully up
    On,
    /// Shutdown sequence in progress
    PoweringOff,
}

impl PowerState {
    /// A sequence is running; gestures are ignored.
    pub const fn is_transitioning(self) -> bool {
        matches!(self, PowerState::PoweringOn | PowerState::PoweringOff)
    }

    /// Whether `self → next` is an edge of the state machine.
    pub const fn can_transition_to(self, next: PowerState) -> bool {
        matches!(
            (self, next),
            (PowerState::Off, PowerState::PoweringOn)
                | (PowerState::PoweringOn, PowerState::On)
                | (PowerState::On, PowerState::PoweringOff)
                | (PowerState::PoweringOff, PowerState::Off)
        )
    }

    /// Short name used in log lines.
    pub const fn as_str(self) -> &'static str {
        match self {
            PowerState::Off => "off",
            PowerState::PoweringOn => "powering-on",
            PowerState::On => "on",
            PowerState::PoweringOff => "powering-off",
        }
    }
}
