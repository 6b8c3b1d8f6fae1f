//! Debounce + click / long-press classification
//!
//! [`GestureClassifier`] is a pure state machine driven by timestamps. It
//! never reads a pin or sleeps: the button task feeds it raw edges with
//! [`GestureClassifier::on_edge`] and wakes it at
//! [`GestureClassifier::next_deadline`] with [`GestureClassifier::poll`].
//! That keeps the timing rules testable without hardware or a runtime.
//!
//! # Timing rules
//!
//! ```text
//!  raw line   ▔▔▔╲_╱▔╲________________________________╱▔▔▔▔▔▔▔▔
//!                    │← debounce →│                   │← debounce →│
//!                    press edge   accepted            release edge  accepted
//!
//!  held d < debounce              → nothing
//!  debounce ≤ d < long_press      → Click, stamped at the release edge
//!  d ≥ long_press                 → LongPress, stamped press edge + long_press
//!                                   (emitted when the threshold passes, not
//!                                   at release; the release emits no Click)
//! ```
//!
//! An edge is accepted only once the line has stayed at the new level for
//! the whole debounce window. The accepted edge keeps the timestamp of the
//! raw transition that started the stable run, so event times do not depend
//! on how late the task polls.

use embassy_time::{Duration, Instant};

use crate::config::{ButtonConfigError, DEFAULT_DEBOUNCE_MS, DEFAULT_LONG_PRESS_MS};
use crate::input::{ActiveLevel, Button, GestureEvent, GestureKind};

/// Per-button timing and wiring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonConfig {
    /// Stability window an edge must survive to be accepted
    pub debounce_ms: u32,
    /// Hold time at which a press becomes a long press
    pub long_press_ms: u32,
    /// Line level that means "pressed"
    pub active_level: ActiveLevel,
    /// Emit [`GestureKind::Release`] when a long press ends
    pub report_release: bool,
}

impl ButtonConfig {
    /// Active-low key with the given timing and no release events.
    pub const fn new(debounce_ms: u32, long_press_ms: u32) -> Self {
        Self {
            debounce_ms,
            long_press_ms,
            active_level: ActiveLevel::Low,
            report_release: false,
        }
    }

    /// Override the active level.
    pub const fn with_active_level(mut self, level: ActiveLevel) -> Self {
        self.active_level = level;
        self
    }

    /// Report the release that ends a long press.
    pub const fn with_release_events(mut self) -> Self {
        self.report_release = true;
        self
    }

    /// Reject timing the classifier cannot honour.
    pub fn validate(&self) -> Result<(), ButtonConfigError> {
        if self.debounce_ms == 0 {
            return Err(ButtonConfigError::ZeroDebounce);
        }
        if self.long_press_ms <= self.debounce_ms {
            return Err(ButtonConfigError::LongPressNotAboveDebounce {
                debounce_ms: self.debounce_ms,
                long_press_ms: self.long_press_ms,
            });
        }
        Ok(())
    }

    fn debounce(&self) -> Duration {
        Duration::from_millis(u64::from(self.debounce_ms))
    }

    fn long_press(&self) -> Duration {
        Duration::from_millis(u64::from(self.long_press_ms))
    }
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_MS, DEFAULT_LONG_PRESS_MS)
    }
}

/// Gesture classifier for a single button.
///
/// Instances share nothing; give every button its own.
#[derive(Debug, Clone)]
pub struct GestureClassifier {
    button: Button,
    config: ButtonConfig,
    /// Last raw level seen (pressed = true)
    raw_pressed: bool,
    /// Time of the last raw transition
    raw_since: Instant,
    /// Debounced level
    stable_pressed: bool,
    /// Accepted press edge of the current press
    pressed_at: Option<Instant>,
    /// LongPress already emitted for the current press
    long_press_sent: bool,
}

impl GestureClassifier {
    /// New classifier, idle and released.
    pub const fn new(button: Button, config: ButtonConfig) -> Self {
        Self {
            button,
            config,
            raw_pressed: false,
            raw_since: Instant::MIN,
            stable_pressed: false,
            pressed_at: None,
            long_press_sent: false,
        }
    }

    /// Button this classifier belongs to.
    pub const fn button(&self) -> Button {
        self.button
    }

    /// Timing and wiring in use.
    pub const fn config(&self) -> &ButtonConfig {
        &self.config
    }

    /// Debounced pressed state.
    pub const fn is_pressed(&self) -> bool {
        self.stable_pressed
    }

    /// Feed a raw line sample taken at `now`.
    ///
    /// Repeated samples at the same level are harmless; only level changes
    /// restart the debounce window. Any event that matured before `now` is
    /// returned.
    pub fn on_edge(&mut self, pressed: bool, now: Instant) -> Option<GestureEvent> {
        // The line held its previous level up to `now`.
        let matured = self.poll(now);
        if pressed != self.raw_pressed {
            self.raw_pressed = pressed;
            self.raw_since = now;
        }
        matured
    }

    /// Advance time to `now` without a new sample.
    pub fn poll(&mut self, now: Instant) -> Option<GestureEvent> {
        if self.raw_pressed != self.stable_pressed
            && now.saturating_duration_since(self.raw_since) >= self.config.debounce()
        {
            return self.accept_edge(now);
        }
        self.check_long_press(now)
    }

    /// Next instant at which [`poll`](Self::poll) can produce progress.
    ///
    /// `None` while idle or while a long press is held past its event: the
    /// caller should then just wait for the next edge.
    pub fn next_deadline(&self) -> Option<Instant> {
        if self.raw_pressed != self.stable_pressed {
            return Some(after(self.raw_since, self.config.debounce()));
        }
        match self.pressed_at {
            Some(at) if self.stable_pressed && !self.long_press_sent => {
                Some(after(at, self.config.long_press()))
            }
            _ => None,
        }
    }

    fn accept_edge(&mut self, now: Instant) -> Option<GestureEvent> {
        let edge = self.raw_since;
        self.stable_pressed = self.raw_pressed;

        if self.stable_pressed {
            self.pressed_at = Some(edge);
            self.long_press_sent = false;
            // A late poll may already be past the threshold.
            return self.check_long_press(now);
        }

        let pressed_at = self.pressed_at.take()?;
        if self.long_press_sent {
            self.long_press_sent = false;
            return self
                .config
                .report_release
                .then(|| self.event(GestureKind::Release, edge));
        }

        let held = edge.saturating_duration_since(pressed_at);
        if held < self.config.debounce() {
            None
        } else if held >= self.config.long_press() {
            // Threshold crossed while the release was still settling.
            Some(self.event(
                GestureKind::LongPress,
                after(pressed_at, self.config.long_press()),
            ))
        } else {
            Some(self.event(GestureKind::Click, edge))
        }
    }

    fn check_long_press(&mut self, now: Instant) -> Option<GestureEvent> {
        if !self.stable_pressed || self.long_press_sent {
            return None;
        }
        let pressed_at = self.pressed_at?;
        // A pending release ends the hold at its raw edge, not at `now`.
        let held_until = if self.raw_pressed { now } else { self.raw_since };
        let threshold = after(pressed_at, self.config.long_press());
        if held_until < threshold {
            return None;
        }
        self.long_press_sent = true;
        Some(self.event(GestureKind::LongPress, threshold))
    }

    fn event(&self, kind: GestureKind, at: Instant) -> GestureEvent {
        GestureEvent::new(kind, self.button, at)
    }
}

fn after(at: Instant, d: Duration) -> Instant {
    at.checked_add(d).unwrap_or(Instant::MAX)
}
