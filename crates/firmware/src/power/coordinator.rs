//! Power / LED sequencing coordinator
//!
//! Owns the power-enable line, the module enable set and the LED bank, and
//! is the only code that writes them. Gestures reach it through the
//! dispatch queue and are handled one at a time on the coordinator task.
//!
//! # Sequences
//!
//! ```text
//! power_on:   PWR_EN ↑ → PoweringOn → modules ↑ → settle
//!             → LED 0 on, step … LED N-1 on, step → On
//!
//! power_off:  PoweringOff → lead-in → LED N-1 off, step … LED 0 off, step
//!             → modules ↓ → drain → PWR_EN ↓ → Off
//! ```
//!
//! A sequence runs to completion; nothing cancels it. Because the task is
//! busy for the whole sequence, gestures classified meanwhile wait in the
//! queue. Those stamped inside the window of the last sequence are dropped,
//! so a long press during `PoweringOn` can never start a second sequence.
//! A gesture that completed before the sequence began is still handled,
//! even when it reaches the queue after the gesture that started it.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Channel;
use embassy_time::Instant;
use embedded_hal::digital::{OutputPin, StatefulOutputPin};
use embedded_hal_async::delay::DelayNs;
use platform::{
    Application, Brightness, Clock, GestureEvent, GestureKind, InteractionState, Led,
    NetworkStation, PowerState, SequenceTiming,
};

use super::binding::{ButtonBinding, ClickAction};
use super::modules::{level_name, ModuleEnables};
use crate::leds::{LedBank, LedBankError};

/// Maximum number of button bindings.
pub const MAX_BINDINGS: usize = 4;

/// No room for another binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BindError {
    /// All [`MAX_BINDINGS`] slots are taken
    Full,
}

impl core::fmt::Display for BindError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Full => write!(f, "no free button binding slot"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BindError {}

/// The coordinator.
///
/// - `P`: power-enable line
/// - `M`: module enable lines
/// - `L`: LED backend, `N` LEDs
/// - `D`: time base (sleep + clock)
/// - `A`, `W`: application and network station
pub struct PowerCoordinator<P, M, L: Led, D, A, W, const N: usize> {
    power_pin: P,
    modules: ModuleEnables<M>,
    leds: LedBank<L, N>,
    timebase: D,
    app: A,
    network: W,
    timing: SequenceTiming,
    bindings: heapless::Vec<ButtonBinding, MAX_BINDINGS>,
    state: PowerState,
    busy_since: Option<Instant>,
    busy_until: Option<Instant>,
}

impl<P, M, L, D, A, W, const N: usize> PowerCoordinator<P, M, L, D, A, W, N>
where
    P: OutputPin + StatefulOutputPin,
    M: OutputPin + StatefulOutputPin,
    L: Led,
    D: DelayNs + Clock,
    A: Application,
    W: NetworkStation,
{
    /// Take ownership of the effectors and drive the Off state: power-enable
    /// low, modules disabled, every LED dark.
    pub fn new(
        mut power_pin: P,
        modules: ModuleEnables<M>,
        mut leds: LedBank<L, N>,
        timebase: D,
        app: A,
        network: W,
        timing: SequenceTiming,
    ) -> Self {
        if power_pin.set_low().is_err() {
            error!("power enable write failed at init");
        }
        leds.set_all(false);
        Self {
            power_pin,
            modules,
            leds,
            timebase,
            app,
            network,
            timing,
            bindings: heapless::Vec::new(),
            state: PowerState::Off,
            busy_since: None,
            busy_until: None,
        }
    }

    /// Install the gesture policy for a button, replacing any previous one.
    pub fn bind(&mut self, binding: ButtonBinding) -> Result<(), BindError> {
        if let Some(existing) = self
            .bindings
            .iter_mut()
            .find(|b| b.button == binding.button)
        {
            *existing = binding;
            return Ok(());
        }
        self.bindings.push(binding).map_err(|_| BindError::Full)
    }

    /// Install a whole board's bindings, e.g. `BoardProfile::bindings()`.
    pub fn bind_all<I>(&mut self, bindings: I) -> Result<(), BindError>
    where
        I: IntoIterator<Item = ButtonBinding>,
    {
        bindings.into_iter().try_for_each(|b| self.bind(b))
    }

    // ── Accessors ───────────────────────────────────────────────────────────

    /// Current power state.
    pub fn power_state(&self) -> PowerState {
        self.state
    }

    /// The LED bank.
    pub fn leds(&self) -> &LedBank<L, N> {
        &self.leds
    }

    /// The module enable set.
    pub fn modules(&self) -> &ModuleEnables<M> {
        &self.modules
    }

    /// Sequencing delays in use.
    pub fn timing(&self) -> &SequenceTiming {
        &self.timing
    }

    /// Installed bindings.
    pub fn bindings(&self) -> &[ButtonBinding] {
        &self.bindings
    }

    /// Start of the most recent transition.
    pub fn busy_since(&self) -> Option<Instant> {
        self.busy_since
    }

    /// End of the most recent transition.
    pub fn busy_until(&self) -> Option<Instant> {
        self.busy_until
    }

    /// Whether `at` falls inside the most recent transition.
    fn during_transition(&self, at: Instant) -> bool {
        match (self.busy_since, self.busy_until) {
            (Some(since), Some(until)) => since <= at && at < until,
            _ => false,
        }
    }

    // ── Power sequencing ────────────────────────────────────────────────────

    /// Off → PoweringOn → On.
    pub async fn power_on(&mut self) {
        match self.state {
            PowerState::Off => {}
            PowerState::On => {
                info!("power on requested: already on");
                return;
            }
            state => {
                warn!("power on requested while {}, ignored", state.as_str());
                return;
            }
        }

        self.busy_since = Some(self.timebase.now());
        self.write_power_line(true);
        self.enter(PowerState::PoweringOn);
        // A failed module enable is already logged and rolled back; the
        // board still comes up so the user sees the LEDs.
        let _ = self.modules.enable();
        self.timebase.delay_ms(self.timing.module_settle_ms).await;
        self.leds
            .startup_sequence(&mut self.timebase, self.timing.startup_step_ms)
            .await;
        self.enter(PowerState::On);
        self.busy_until = Some(self.timebase.now());
    }

    /// On → PoweringOff → Off.
    pub async fn power_off(&mut self) {
        match self.state {
            PowerState::On => {}
            PowerState::Off => {
                info!("power off requested: already off");
                return;
            }
            state => {
                warn!("power off requested while {}, ignored", state.as_str());
                return;
            }
        }

        self.busy_since = Some(self.timebase.now());
        self.enter(PowerState::PoweringOff);
        self.leds
            .shutdown_sequence(
                &mut self.timebase,
                self.timing.shutdown_lead_in_ms,
                self.timing.shutdown_step_ms,
            )
            .await;
        let _ = self.modules.disable();
        self.timebase.delay_ms(self.timing.rail_drain_ms).await;
        self.write_power_line(false);
        self.enter(PowerState::Off);
        self.busy_until = Some(self.timebase.now());
    }

    /// `power_on` from Off, `power_off` from On, nothing while transitioning.
    pub async fn toggle_power(&mut self) {
        match self.state {
            PowerState::Off => self.power_on().await,
            PowerState::On => self.power_off().await,
            state => debug!("power toggle ignored while {}", state.as_str()),
        }
    }

    /// Boot-time bring-up for self-latching supplies.
    ///
    /// Same as [`power_on`](Self::power_on) but holds `boot_latch_ms` after
    /// asserting power-enable and lights the whole bank at once instead of
    /// animating it. No-op unless Off.
    pub async fn latch_on(&mut self) {
        if self.state != PowerState::Off {
            info!("power latch skipped: already {}", self.state.as_str());
            return;
        }
        self.busy_since = Some(self.timebase.now());
        self.write_power_line(true);
        self.enter(PowerState::PoweringOn);
        self.timebase.delay_ms(self.timing.boot_latch_ms).await;
        let _ = self.modules.enable();
        self.timebase.delay_ms(self.timing.module_settle_ms).await;
        self.leds.set_all(true);
        self.enter(PowerState::On);
        self.busy_until = Some(self.timebase.now());
    }

    // ── LED operations ──────────────────────────────────────────────────────

    /// Switch every LED, in index order, without delay.
    pub fn set_all_leds(&mut self, on: bool) {
        self.leds.set_all(on);
    }

    /// Invert the bank-wide LED flag.
    pub fn toggle_leds(&mut self) {
        self.leds.toggle();
    }

    /// Switch a single LED.
    pub fn set_led(&mut self, index: usize, on: bool) -> Result<(), LedBankError> {
        self.leds.set_led(index, on)
    }

    /// Clamp `percent` to 0..=100 and apply it to the dimmable LEDs.
    pub fn set_led_brightness(&mut self, percent: i32) -> Brightness {
        let level = Brightness::from_percent(percent);
        let applied = self.leds.set_brightness(level);
        debug!("brightness {}% applied to {} LEDs", level.get(), applied);
        level
    }

    // ── Gesture dispatch ────────────────────────────────────────────────────

    /// Apply the policy for one gesture.
    pub async fn handle(&mut self, event: GestureEvent) {
        if self.state.is_transitioning() {
            debug!(
                "{} on {} ignored while {}",
                event.kind.as_str(),
                event.button.as_str(),
                self.state.as_str()
            );
            return;
        }
        if self.during_transition(event.at) {
            debug!(
                "{} on {} happened during a transition, ignored",
                event.kind.as_str(),
                event.button.as_str()
            );
            return;
        }
        let Some(binding) = self.binding_for(event) else {
            debug!("no binding for {}", event.button.as_str());
            return;
        };

        match event.kind {
            GestureKind::LongPress if binding.long_press_power => self.toggle_power().await,
            GestureKind::Click => self.click(binding.on_click),
            kind => trace!("{} on {} has no action", kind.as_str(), event.button.as_str()),
        }
    }

    /// Handle every gesture already queued, without waiting for more.
    pub async fn process_pending<Q: RawMutex, const C: usize>(
        &mut self,
        queue: &Channel<Q, GestureEvent, C>,
    ) -> usize {
        let mut handled = 0usize;
        while let Ok(event) = queue.try_receive() {
            self.handle(event).await;
            handled = handled.saturating_add(1);
        }
        handled
    }

    /// Coordinator task body.
    pub async fn run<Q: RawMutex, const C: usize>(
        &mut self,
        queue: &Channel<Q, GestureEvent, C>,
    ) -> ! {
        info!("coordinator running with {} LEDs", N);
        loop {
            let event = queue.receive().await;
            self.handle(event).await;
        }
    }

    fn binding_for(&self, event: GestureEvent) -> Option<ButtonBinding> {
        self.bindings
            .iter()
            .find(|b| b.button == event.button)
            .copied()
    }

    fn click(&mut self, action: ClickAction) {
        match action {
            ClickAction::ToggleLeds if self.state == PowerState::On => self.toggle_leds(),
            ClickAction::ToggleLeds => {
                debug!("LED toggle ignored while {}", self.state.as_str());
            }
            ClickAction::Interact => self.interact(),
            ClickAction::Ignore => {}
        }
    }

    fn interact(&mut self) {
        if self.app.interaction_state() == InteractionState::Starting
            && !self.network.is_connected()
        {
            info!("no network during start-up, resetting network configuration");
            self.network.reset_config();
        }
        self.app.toggle_interaction();
    }

    fn enter(&mut self, next: PowerState) {
        if !self.state.can_transition_to(next) {
            error!(
                "invalid power transition {} -> {}",
                self.state.as_str(),
                next.as_str()
            );
        }
        info!("power {} -> {}", self.state.as_str(), next.as_str());
        self.state = next;
    }

    fn write_power_line(&mut self, high: bool) {
        let written = if high {
            self.power_pin.set_high()
        } else {
            self.power_pin.set_low()
        };
        if written.is_err() {
            error!("power enable write ({}) failed", level_name(high));
            return;
        }
        match self.power_pin.is_set_high() {
            Ok(level) if level == high => {}
            Ok(level) => warn!(
                "power enable reads {} after writing {}",
                level_name(level),
                level_name(high)
            ),
            Err(_) => warn!("power enable state unreadable"),
        }
    }
}
