//! Integration test: full power sequencing against recording mocks.
//!
//! Tests that:
//!   1. Power-on raises PWR_EN, enables modules, waits the settle delay and
//!      lights LEDs 0..N one step apart, reaching On no earlier than
//!      settle + N × step
//!   2. Power-off darkens LEDs N-1..0, disables modules, drains, drops PWR_EN
//!   3. Repeated power-on / power-off requests are no-ops
//!   4. A long press classified during a transition never starts a second
//!      sequence
//!   5. Click policy: LED toggle only while On; interact resets the network
//!      first while the application is still starting offline
//!   6. Brightness is clamped and only reaches dimmable LEDs
//!   7. A power line that reads back wrong does not stop the sequence
//!
//! All delays run on a virtual timeline, so the suite takes no wall time.
//!
//! Run with: cargo test -p firmware --test integration_power_sequence

// Integration test file -- intentional test patterns permitted.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
)]

use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_time::Instant;
use firmware::board::YAKA_V1;
use firmware::input::GestureQueue;
use firmware::leds::LedBank;
use firmware::power::{ButtonBinding, ClickAction, ModuleEnables, PowerCoordinator};
use platform::mocks::{
    Effect, MockApplication, MockLed, MockNetwork, MockOutputPin, MockTimeline, Recorder,
};
use platform::{
    Button, Clock, GestureEvent, GestureKind, InteractionState, PowerState, SequenceTiming,
};

// -- Test rig -------------------------------------------------------------

const LEDS: usize = 5;
const STEP_MS: u64 = 200;
const SETTLE_MS: u64 = 100;

type Coordinator<const N: usize> = PowerCoordinator<
    MockOutputPin,
    MockOutputPin,
    MockLed,
    MockTimeline,
    MockApplication,
    MockNetwork,
    N,
>;

struct Rig<const N: usize> {
    rec: Recorder,
    power: MockOutputPin,
    modem: MockOutputPin,
    mic: MockOutputPin,
    app: MockApplication,
    net: MockNetwork,
    coord: Coordinator<N>,
}

fn rig_with<const N: usize>(leds: [MockLed; N], rec: Recorder, timing: SequenceTiming) -> Rig<N> {
    let power = MockOutputPin::new("pwr_en", &rec);
    let modem = MockOutputPin::new("modem", &rec);
    let mic = MockOutputPin::new("mic", &rec);
    let app = MockApplication::new(&rec);
    let net = MockNetwork::new(true, &rec);
    let mut coord = PowerCoordinator::new(
        power.clone(),
        ModuleEnables::new(modem.clone(), mic.clone()),
        LedBank::new(leds),
        rec.timeline(),
        app.clone(),
        net.clone(),
        timing,
    );
    coord
        .bind(ButtonBinding::power_key(Button::KeyA, ClickAction::ToggleLeds))
        .unwrap();
    coord
        .bind(ButtonBinding::power_key(Button::KeyB, ClickAction::Interact))
        .unwrap();
    Rig {
        rec,
        power,
        modem,
        mic,
        app,
        net,
        coord,
    }
}

fn rig() -> Rig<LEDS> {
    let rec = Recorder::new();
    let leds = MockLed::bank::<LEDS>(&rec);
    rig_with(leds, rec, SequenceTiming::default())
}

fn gesture(kind: GestureKind, button: Button, at_ms: u64) -> GestureEvent {
    GestureEvent::new(kind, button, Instant::from_millis(at_ms))
}

impl<const N: usize> Rig<N> {
    fn now_ms(&self) -> u64 {
        self.rec.timeline().millis()
    }

    async fn long_press_now(&mut self, button: Button) {
        let at = self.now_ms();
        self.coord
            .handle(gesture(GestureKind::LongPress, button, at))
            .await;
    }

    async fn click_now(&mut self, button: Button) {
        let at = self.now_ms();
        self.coord.handle(gesture(GestureKind::Click, button, at)).await;
    }
}

// -- Construction -----------------------------------------------------------

#[test]
fn construction_drives_off_state() {
    let r = rig();
    assert_eq!(r.coord.power_state(), PowerState::Off);
    assert!(!r.power.is_high_now());
    assert!(!r.modem.is_high_now() && !r.mic.is_high_now());
    assert_eq!(r.coord.leds().states(), [false; LEDS]);
    assert!(r.coord.busy_until().is_none());
}

// -- Power-on -----------------------------------------------------------------

#[tokio::test]
async fn power_on_orders_and_spaces_every_step() {
    let mut r = rig();
    r.rec.clear();
    r.coord.power_on().await;

    assert_eq!(r.coord.power_state(), PowerState::On);
    assert!(r.power.is_high_now());
    assert!(r.coord.modules().is_enabled());

    // Power enable first, then both module lines, all at t = 0.
    let effects = r.rec.effects();
    assert_eq!(effects[0], Effect::Pin { name: "pwr_en", high: true });
    assert_eq!(effects[1], Effect::Pin { name: "modem", high: true });
    assert_eq!(effects[2], Effect::Pin { name: "mic", high: true });

    let switches = r.rec.led_switches();
    assert_eq!(switches.len(), LEDS);
    for (i, (index, on, at_ms)) in switches.iter().enumerate() {
        assert_eq!(*index, i, "LEDs light in index order");
        assert!(*on);
        assert_eq!(*at_ms, SETTLE_MS + i as u64 * STEP_MS);
    }

    let lower_bound = u64::from(SequenceTiming::default().power_on_ms(LEDS as u32));
    assert_eq!(lower_bound, 1_100);
    assert!(r.now_ms() >= lower_bound);
    assert_eq!(r.coord.busy_until(), Some(Instant::from_millis(r.now_ms())));
}

#[tokio::test]
async fn second_power_on_is_noop() {
    let mut r = rig();
    r.coord.power_on().await;
    let after_first = r.rec.records().len();
    let t = r.now_ms();

    r.coord.power_on().await;

    assert_eq!(r.coord.power_state(), PowerState::On);
    assert_eq!(r.rec.records().len(), after_first, "no second sequence");
    assert_eq!(r.now_ms(), t);
}

// -- Power-off ----------------------------------------------------------------

#[tokio::test]
async fn power_off_reverses_and_restores_off_lines() {
    let mut r = rig();
    r.coord.power_on().await;
    r.rec.clear();
    let start = r.now_ms();

    r.coord.power_off().await;

    assert_eq!(r.coord.power_state(), PowerState::Off);
    assert!(!r.power.is_high_now());
    assert!(!r.modem.is_high_now() && !r.mic.is_high_now());
    assert!(!r.coord.modules().is_enabled());
    assert_eq!(r.coord.leds().states(), [false; LEDS]);
    assert!(!r.coord.leds().all_on());

    let switches = r.rec.led_switches();
    let order: Vec<usize> = switches.iter().map(|s| s.0).collect();
    assert_eq!(order, vec![4, 3, 2, 1, 0]);
    for pair in switches.windows(2) {
        assert!(pair[1].2 - pair[0].2 >= STEP_MS);
    }
    // 500 ms lead-in before the first LED goes dark.
    assert_eq!(switches[0].2, start + 500);

    // PWR_EN drops last, after the rail drain.
    let pwr = r.rec.pin_writes("pwr_en");
    assert_eq!(pwr, vec![(false, start + 2_000)]);
    let last = r.rec.effects().last().copied();
    assert_eq!(last, Some(Effect::Pin { name: "pwr_en", high: false }));
}

#[tokio::test]
async fn power_off_while_off_is_noop() {
    let mut r = rig();
    r.rec.clear();
    r.coord.power_off().await;
    assert_eq!(r.coord.power_state(), PowerState::Off);
    assert!(r.rec.effects().is_empty());
    assert_eq!(r.now_ms(), 0);
}

// -- Gesture policy -------------------------------------------------------------

#[tokio::test]
async fn long_press_toggles_power_both_ways() {
    let mut r = rig();
    r.long_press_now(Button::KeyA).await;
    assert_eq!(r.coord.power_state(), PowerState::On);
    r.long_press_now(Button::KeyB).await;
    assert_eq!(r.coord.power_state(), PowerState::Off);
}

#[tokio::test]
async fn long_press_queued_during_power_on_is_dropped() {
    let mut r = rig();
    let queue: GestureQueue<NoopRawMutex, 8> = GestureQueue::new();

    // The user keeps holding KeyA: the classifier fires once at 1000 ms and
    // the coordinator starts powering on. A second long press (other key)
    // is classified halfway through the sequence.
    r.rec.timeline().set_millis(1_000);
    queue.try_send(gesture(GestureKind::LongPress, Button::KeyA, 1_000)).unwrap();
    queue.try_send(gesture(GestureKind::LongPress, Button::KeyB, 1_600)).unwrap();

    let handled = r.coord.process_pending(&queue).await;

    assert_eq!(handled, 2);
    assert_eq!(r.coord.power_state(), PowerState::On, "no power-off from the stale press");
    assert_eq!(r.rec.pin_writes("pwr_en"), vec![(false, 0), (true, 1_000)]);
    let lit: Vec<usize> = r.rec.led_switches().iter().filter(|s| s.1).map(|s| s.0).collect();
    assert_eq!(lit, vec![0, 1, 2, 3, 4], "exactly one startup sequence");
}

#[tokio::test]
async fn gesture_after_transition_is_accepted() {
    let mut r = rig();
    r.coord.power_on().await;
    let done = r.now_ms();
    r.coord
        .handle(gesture(GestureKind::LongPress, Button::KeyA, done + 10))
        .await;
    assert_eq!(r.coord.power_state(), PowerState::Off);
}

#[tokio::test]
async fn click_toggles_leds_only_when_on() {
    let mut r = rig();

    r.click_now(Button::KeyA).await;
    assert_eq!(r.coord.leds().states(), [false; LEDS], "ignored while Off");

    r.coord.power_on().await;
    assert!(r.coord.leds().all_on());

    r.click_now(Button::KeyA).await;
    assert!(!r.coord.leds().all_on());
    assert_eq!(r.coord.leds().states(), [false; LEDS]);

    r.click_now(Button::KeyA).await;
    assert_eq!(r.coord.leds().states(), [true; LEDS]);
}

#[tokio::test]
async fn interact_resets_network_first_when_starting_offline() {
    let mut r = rig();
    r.app.set_state(InteractionState::Starting);
    r.net.set_connected(false);
    r.rec.clear();

    r.click_now(Button::KeyB).await;

    assert_eq!(r.rec.effects(), vec![Effect::NetworkReset, Effect::Interact]);
    assert_eq!(r.net.reset_count(), 1);
    assert_eq!(r.app.toggle_count(), 1);
}

#[tokio::test]
async fn interact_leaves_network_alone_otherwise() {
    let mut r = rig();
    r.net.set_connected(false);
    r.click_now(Button::KeyB).await;

    r.app.set_state(InteractionState::Starting);
    r.net.set_connected(true);
    r.click_now(Button::KeyB).await;

    assert_eq!(r.net.reset_count(), 0);
    assert_eq!(r.app.toggle_count(), 2);
}

#[tokio::test]
async fn unbound_button_and_release_do_nothing() {
    let mut r = rig();
    r.rec.clear();
    r.long_press_now(Button::Boot).await;
    r.coord
        .handle(gesture(GestureKind::Release, Button::KeyA, 0))
        .await;
    assert_eq!(r.coord.power_state(), PowerState::Off);
    assert!(r.rec.effects().is_empty());
}

#[tokio::test]
async fn rebinding_replaces_policy() {
    let mut r = rig();
    r.coord
        .bind(ButtonBinding::click_only(Button::KeyA, ClickAction::Ignore))
        .unwrap();
    assert_eq!(r.coord.bindings().len(), 2);
    r.long_press_now(Button::KeyA).await;
    assert_eq!(r.coord.power_state(), PowerState::Off);
}

// -- LED operations -------------------------------------------------------------

#[tokio::test]
async fn brightness_is_clamped_and_reaches_dimmable_leds_only() {
    let rec = Recorder::new();
    let leds = [
        MockLed::dimmable(0, &rec),
        MockLed::new(1, &rec),
        MockLed::dimmable(2, &rec),
    ];
    let probe = leds.clone();
    let mut r = rig_with(leds, rec, SequenceTiming::default());

    assert_eq!(r.coord.set_led_brightness(150).get(), 100);
    assert_eq!(r.coord.set_led_brightness(-10).get(), 0);
    assert_eq!(r.coord.set_led_brightness(40).get(), 40);

    assert_eq!(probe[0].brightness().get(), 40);
    assert_eq!(probe[2].brightness().get(), 40);
    let touched: Vec<usize> = r
        .rec
        .effects()
        .iter()
        .filter_map(|e| match e {
            Effect::Brightness { index, .. } => Some(*index),
            _ => None,
        })
        .collect();
    assert!(!touched.contains(&1));
}

#[test]
fn single_led_out_of_range_is_reported() {
    let mut r = rig();
    assert!(r.coord.set_led(2, true).is_ok());
    assert_eq!(r.coord.leds().is_lit(2), Some(true));
    assert!(!r.coord.leds().all_on(), "mixed state clears the flag");
    assert!(r.coord.set_led(LEDS, true).is_err());
}

#[test]
fn set_all_leds_goes_in_index_order() {
    let mut r = rig();
    r.rec.clear();
    r.coord.set_all_leds(true);
    let order: Vec<usize> = r.rec.led_switches().iter().map(|s| s.0).collect();
    assert_eq!(order, vec![0, 1, 2, 3, 4]);
    assert!(r.coord.leds().all_on());
}

// -- Faults -----------------------------------------------------------------------

#[tokio::test]
async fn stuck_power_line_does_not_stop_sequence() {
    let mut r = rig();
    r.power.stick_at(false);
    r.coord.power_on().await;
    assert_eq!(r.coord.power_state(), PowerState::On);
    assert_eq!(r.coord.leds().states(), [true; LEDS]);
}

#[tokio::test]
async fn failing_led_keeps_commanded_state() {
    let rec = Recorder::new();
    let leds = MockLed::bank::<LEDS>(&rec);
    leds[3].fail_writes(true);
    let mut r = rig_with(leds, rec, SequenceTiming::default());
    r.coord.power_on().await;
    assert_eq!(r.coord.power_state(), PowerState::On);
    assert_eq!(r.coord.leds().is_lit(3), Some(true));
}

#[tokio::test]
async fn failed_module_enable_still_reaches_on() {
    let mut r = rig();
    r.mic.fail_writes(true);
    r.coord.power_on().await;
    assert_eq!(r.coord.power_state(), PowerState::On);
    assert!(!r.coord.modules().is_enabled());
    assert!(!r.modem.is_high_now(), "modem rolled back with the mic");
}

// -- Boot latch ---------------------------------------------------------------------

#[tokio::test]
async fn latch_on_lights_bank_at_once() {
    let mut r = rig();
    r.rec.clear();
    r.coord.latch_on().await;

    assert_eq!(r.coord.power_state(), PowerState::On);
    assert_eq!(r.rec.pin_writes("pwr_en"), vec![(true, 0)]);
    let times: Vec<u64> = r.rec.led_switches().iter().map(|s| s.2).collect();
    assert_eq!(times, vec![SETTLE_MS; LEDS]);

    // Latching again does nothing.
    r.rec.clear();
    r.coord.latch_on().await;
    assert!(r.rec.effects().is_empty());
}

#[tokio::test]
async fn board_profile_timing_and_bindings_drive_coordinator() {
    let rec = Recorder::new();
    let leds = MockLed::bank::<1>(&rec);
    let mut r = rig_with(leds, rec, YAKA_V1.timing);
    r.coord.bind_all(YAKA_V1.bindings()).unwrap();
    assert_eq!(r.coord.bindings().len(), 2);

    r.long_press_now(Button::KeyB).await;

    assert_eq!(r.coord.power_state(), PowerState::On);
    assert_eq!(r.now_ms(), 1_100);
    assert_eq!(r.coord.timing().startup_step_ms, 1_000);
}

#[tokio::test]
async fn timeline_clock_matches_recorder() {
    let r = rig();
    r.rec.timeline().set_millis(42);
    assert_eq!(r.rec.timeline().now(), Instant::from_millis(42));
}
