//! Mock implementations for testing
//!
//! This module provides mock implementations of all platform traits
//! for use in unit and integration tests.
//!
//! All effectors share one [`Recorder`], which stamps every write with the
//! virtual time of a [`MockTimeline`]. A power sequence can then be checked
//! for both order and spacing:
//!
//! ```no_run
//! use platform::mocks::{Effect, MockLed, Recorder};
//! use platform::Led;
//!
//! let rec = Recorder::new();
//! let mut led = MockLed::new(0, &rec);
//! led.turn_on().ok();
//! assert_eq!(rec.effects(), vec![Effect::Led { index: 0, on: true }]);
//! ```

#![cfg(any(test, feature = "std"))]

use core::cell::{Cell, RefCell};
use std::rc::Rc;
use std::vec::Vec;

use embassy_time::{Duration, Instant};
use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin, StatefulOutputPin};
use embedded_hal_async::delay::DelayNs;

use crate::app::{Application, InteractionState, NetworkStation};
use crate::input::GestureEvent;
use crate::led::{Brightness, Led};
use crate::subscription::GestureSink;
use crate::time::Clock;

// ── Virtual time ────────────────────────────────────────────────────────────

/// Shared virtual clock. Delays advance it instantly.
#[derive(Debug, Clone)]
pub struct MockTimeline {
    now: Rc<Cell<Instant>>,
}

impl MockTimeline {
    /// Timeline starting at `t = 0`.
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::from_ticks(0))),
        }
    }

    /// Move time forward.
    pub fn advance(&self, d: Duration) {
        let next = self.now.get().checked_add(d).unwrap_or(Instant::MAX);
        self.now.set(next);
    }

    /// Jump to an absolute time (never backwards).
    pub fn set_millis(&self, ms: u64) {
        let target = Instant::from_millis(ms);
        if target > self.now.get() {
            self.now.set(target);
        }
    }

    /// Milliseconds since the timeline started.
    pub fn millis(&self) -> u64 {
        self.now.get().as_millis()
    }
}

impl Default for MockTimeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MockTimeline {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

impl DelayNs for MockTimeline {
    async fn delay_ns(&mut self, ns: u32) {
        self.advance(Duration::from_nanos(u64::from(ns)));
    }

    async fn delay_us(&mut self, us: u32) {
        self.advance(Duration::from_micros(u64::from(us)));
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.advance(Duration::from_millis(u64::from(ms)));
    }
}

// ── Effect recorder ─────────────────────────────────────────────────────────

/// An observable side effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// LED `index` switched
    Led {
        /// Position in the bank
        index: usize,
        /// New state
        on: bool,
    },
    /// LED `index` brightness changed
    Brightness {
        /// Position in the bank
        index: usize,
        /// New brightness percent
        percent: u8,
    },
    /// Output line written
    Pin {
        /// Line name given at construction
        name: &'static str,
        /// Level written
        high: bool,
    },
    /// Application asked to toggle interaction
    Interact,
    /// Network configuration reset requested
    NetworkReset,
}

/// Effect plus the virtual time it happened at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record {
    /// Virtual time in milliseconds
    pub at_ms: u64,
    /// What happened
    pub effect: Effect,
}

/// Shared, time-stamped effect log.
#[derive(Debug, Clone)]
pub struct Recorder {
    timeline: MockTimeline,
    log: Rc<RefCell<Vec<Record>>>,
}

impl Recorder {
    /// Empty log on a fresh timeline.
    pub fn new() -> Self {
        Self {
            timeline: MockTimeline::new(),
            log: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// The timeline all records are stamped with.
    pub fn timeline(&self) -> MockTimeline {
        self.timeline.clone()
    }

    /// Append an effect at the current virtual time.
    pub fn push(&self, effect: Effect) {
        let at_ms = self.timeline.millis();
        self.log.borrow_mut().push(Record { at_ms, effect });
    }

    /// Everything recorded so far.
    pub fn records(&self) -> Vec<Record> {
        self.log.borrow().clone()
    }

    /// Effects without timestamps.
    pub fn effects(&self) -> Vec<Effect> {
        self.log.borrow().iter().map(|r| r.effect).collect()
    }

    /// LED switch effects only, as `(index, on, at_ms)`.
    pub fn led_switches(&self) -> Vec<(usize, bool, u64)> {
        self.log
            .borrow()
            .iter()
            .filter_map(|r| match r.effect {
                Effect::Led { index, on } => Some((index, on, r.at_ms)),
                _ => None,
            })
            .collect()
    }

    /// Writes to the named line, as `(high, at_ms)`.
    pub fn pin_writes(&self, name: &str) -> Vec<(bool, u64)> {
        self.log
            .borrow()
            .iter()
            .filter_map(|r| match r.effect {
                Effect::Pin { name: n, high } if n == name => Some((high, r.at_ms)),
                _ => None,
            })
            .collect()
    }

    /// Forget everything recorded so far (timeline keeps running).
    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new()
    }
}

/// Injected hardware fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockFault;

impl embedded_hal::digital::Error for MockFault {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

// ── Output pin ──────────────────────────────────────────────────────────────

/// Recording output line with optional faults.
///
/// Clones share state, so a test can keep a handle after moving the pin
/// into a driver.
#[derive(Debug, Clone)]
pub struct MockOutputPin {
    name: &'static str,
    recorder: Recorder,
    level: Rc<Cell<bool>>,
    /// Level the line reports regardless of writes (broken driver stage)
    stuck: Rc<Cell<Option<bool>>>,
    fail_writes: Rc<Cell<bool>>,
}

impl MockOutputPin {
    /// Line starting low.
    pub fn new(name: &'static str, recorder: &Recorder) -> Self {
        Self {
            name,
            recorder: recorder.clone(),
            level: Rc::new(Cell::new(false)),
            stuck: Rc::new(Cell::new(None)),
            fail_writes: Rc::new(Cell::new(false)),
        }
    }

    /// Current driven level.
    pub fn is_high_now(&self) -> bool {
        self.stuck.get().unwrap_or(self.level.get())
    }

    /// Make the line report `level` no matter what is written.
    pub fn stick_at(&self, level: bool) {
        self.stuck.set(Some(level));
    }

    /// Make every write fail.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    fn write(&mut self, high: bool) -> Result<(), MockFault> {
        if self.fail_writes.get() {
            return Err(MockFault);
        }
        self.level.set(high);
        self.recorder.push(Effect::Pin {
            name: self.name,
            high,
        });
        Ok(())
    }
}

impl ErrorType for MockOutputPin {
    type Error = MockFault;
}

impl OutputPin for MockOutputPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write(true)
    }
}

impl StatefulOutputPin for MockOutputPin {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.is_high_now())
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.is_high_now())
    }
}

// ── LED ─────────────────────────────────────────────────────────────────────

/// Recording LED.
#[derive(Debug, Clone)]
pub struct MockLed {
    index: usize,
    dimmable: bool,
    recorder: Recorder,
    lit: Rc<Cell<bool>>,
    brightness: Rc<Cell<Brightness>>,
    fail_writes: Rc<Cell<bool>>,
}

impl MockLed {
    /// On/off-only LED at bank position `index`.
    pub fn new(index: usize, recorder: &Recorder) -> Self {
        Self {
            index,
            dimmable: false,
            recorder: recorder.clone(),
            lit: Rc::new(Cell::new(false)),
            brightness: Rc::new(Cell::new(Brightness::FULL)),
            fail_writes: Rc::new(Cell::new(false)),
        }
    }

    /// Dimmable LED at bank position `index`.
    pub fn dimmable(index: usize, recorder: &Recorder) -> Self {
        Self {
            dimmable: true,
            ..Self::new(index, recorder)
        }
    }

    /// `count` LEDs indexed `0..count`.
    pub fn bank<const N: usize>(recorder: &Recorder) -> [MockLed; N] {
        core::array::from_fn(|i| MockLed::new(i, recorder))
    }

    /// Currently lit.
    pub fn is_lit(&self) -> bool {
        self.lit.get()
    }

    /// Last brightness applied.
    pub fn brightness(&self) -> Brightness {
        self.brightness.get()
    }

    /// Make every write fail.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    fn switch(&mut self, on: bool) -> Result<(), MockFault> {
        if self.fail_writes.get() {
            return Err(MockFault);
        }
        self.lit.set(on);
        self.recorder.push(Effect::Led {
            index: self.index,
            on,
        });
        Ok(())
    }
}

impl Led for MockLed {
    type Error = MockFault;

    fn turn_on(&mut self) -> Result<(), Self::Error> {
        self.switch(true)
    }

    fn turn_off(&mut self) -> Result<(), Self::Error> {
        self.switch(false)
    }

    fn is_dimmable(&self) -> bool {
        self.dimmable
    }

    fn set_brightness(&mut self, brightness: Brightness) -> Result<(), Self::Error> {
        if !self.dimmable {
            return Ok(());
        }
        self.brightness.set(brightness);
        self.recorder.push(Effect::Brightness {
            index: self.index,
            percent: brightness.get(),
        });
        Ok(())
    }
}

// ── Application boundary ────────────────────────────────────────────────────

/// Scriptable application.
#[derive(Debug, Clone)]
pub struct MockApplication {
    recorder: Recorder,
    state: Rc<Cell<InteractionState>>,
    toggles: Rc<Cell<u32>>,
}

impl MockApplication {
    /// Application already past start-up.
    pub fn new(recorder: &Recorder) -> Self {
        Self {
            recorder: recorder.clone(),
            state: Rc::new(Cell::new(InteractionState::Other)),
            toggles: Rc::new(Cell::new(0)),
        }
    }

    /// Change the reported state.
    pub fn set_state(&self, state: InteractionState) {
        self.state.set(state);
    }

    /// How many times interaction was toggled.
    pub fn toggle_count(&self) -> u32 {
        self.toggles.get()
    }
}

impl Application for MockApplication {
    fn interaction_state(&self) -> InteractionState {
        self.state.get()
    }

    fn toggle_interaction(&mut self) {
        self.toggles.set(self.toggles.get().saturating_add(1));
        self.recorder.push(Effect::Interact);
    }
}

/// Scriptable network station.
#[derive(Debug, Clone)]
pub struct MockNetwork {
    recorder: Recorder,
    connected: Rc<Cell<bool>>,
    resets: Rc<Cell<u32>>,
}

impl MockNetwork {
    /// Station reporting `connected`.
    pub fn new(connected: bool, recorder: &Recorder) -> Self {
        Self {
            recorder: recorder.clone(),
            connected: Rc::new(Cell::new(connected)),
            resets: Rc::new(Cell::new(0)),
        }
    }

    /// Change the reported link state.
    pub fn set_connected(&self, connected: bool) {
        self.connected.set(connected);
    }

    /// How many configuration resets were requested.
    pub fn reset_count(&self) -> u32 {
        self.resets.get()
    }
}

impl NetworkStation for MockNetwork {
    fn is_connected(&self) -> bool {
        self.connected.get()
    }

    fn reset_config(&mut self) {
        self.resets.set(self.resets.get().saturating_add(1));
        self.recorder.push(Effect::NetworkReset);
    }
}

// ── Gesture sink ────────────────────────────────────────────────────────────

/// Sink that keeps every event it receives.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: RefCell<Vec<GestureEvent>>,
}

impl RecordingSink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Events received so far.
    pub fn events(&self) -> Vec<GestureEvent> {
        self.events.borrow().clone()
    }
}

impl GestureSink for RecordingSink {
    fn deliver(&self, event: GestureEvent) {
        self.events.borrow_mut().push(event);
    }
}
