//! Application boundary
//!
//! The chat state machine and the WiFi station live outside this
//! workspace. The coordinator reaches them only through these two traits,
//! injected at construction.

/// Coarse application state, as far as button policy cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InteractionState {
    /// Application still starting (no network yet, config portal possible)
    Starting,
    /// Any other state
    Other,
}

/// The voice application.
pub trait Application {
    /// Current interaction state.
    fn interaction_state(&self) -> InteractionState;

    /// Start or stop a conversation.
    fn toggle_interaction(&mut self);
}

/// The network station (WiFi).
pub trait NetworkStation {
    /// Station has an active connection.
    fn is_connected(&self) -> bool;

    /// Forget stored credentials and reopen provisioning.
    fn reset_config(&mut self);
}

impl<T: Application + ?Sized> Application for &mut T {
    fn interaction_state(&self) -> InteractionState {
        T::interaction_state(self)
    }

    fn toggle_interaction(&mut self) {
        T::toggle_interaction(self);
    }
}

impl<T: NetworkStation + ?Sized> NetworkStation for &mut T {
    fn is_connected(&self) -> bool {
        T::is_connected(self)
    }

    fn reset_config(&mut self) {
        T::reset_config(self);
    }
}
