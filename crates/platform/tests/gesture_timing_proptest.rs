//! Property-based tests for gesture classification timing.
//! Every hold duration, with arbitrary contact bounce inside the debounce
//! window, must classify to exactly the gesture its duration implies.

// Property test file -- intentional test patterns permitted.
#![allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::arithmetic_side_effects)]

use embassy_time::Instant;
use platform::{Button, ButtonConfig, GestureClassifier, GestureEvent, GestureKind};
use proptest::prelude::*;

const DEBOUNCE: u64 = 50;
const LONG_PRESS: u64 = 1_000;
/// Samples spaced this far apart, like a 10 ms polling loop.
const POLL_MS: u64 = 10;

fn ms(v: u64) -> Instant {
    Instant::from_millis(v)
}

const PRESS_AT: u64 = 100;

struct Line {
    classifier: GestureClassifier,
    events: Vec<GestureEvent>,
}

impl Line {
    fn new() -> Self {
        Self {
            classifier: GestureClassifier::new(Button::KeyA, ButtonConfig::default()),
            events: Vec::new(),
        }
    }

    fn feed(&mut self, pressed: bool, t: u64) {
        if let Some(e) = self.classifier.on_edge(pressed, ms(t)) {
            self.events.push(e);
        }
    }

    /// Edge to `level` at `at`, then bounce at the given offsets, ending on
    /// `level`. Returns the time of the last raw change.
    fn edge(&mut self, level: bool, at: u64, bounce: &[u64]) -> u64 {
        self.feed(level, at);
        let mut last = at;
        for (i, offset) in bounce.iter().enumerate() {
            last = at + offset;
            self.feed(if i % 2 == 0 { !level } else { level }, last);
        }
        if bounce.len() % 2 == 1 {
            // Odd bounce count ends on the wrong level; settle back.
            last += 1;
            self.feed(level, last);
        }
        last
    }
}

/// Press at `PRESS_AT`, release at `PRESS_AT + hold`, polling every
/// `POLL_MS` in between and for a while after. Returns every event emitted.
fn run_hold(hold: u64, press_bounce: &[u64], release_bounce: &[u64]) -> Vec<GestureEvent> {
    let mut line = Line::new();
    let settled_press = line.edge(true, PRESS_AT, press_bounce);
    let release_at = PRESS_AT + hold;
    let mut t = settled_press + POLL_MS;
    while t < release_at {
        line.feed(true, t);
        t += POLL_MS;
    }
    let settled_release = line.edge(false, release_at, release_bounce);
    for k in 1..=10 {
        line.feed(false, settled_release + k * POLL_MS);
    }
    line.events
}

fn bounce_offsets() -> impl Strategy<Value = Vec<u64>> {
    // Sorted offsets strictly inside the press, each below 20 ms.
    proptest::collection::btree_set(1u64..20, 0..4).prop_map(|s| s.into_iter().collect())
}

proptest! {
    /// A tap shorter than the debounce window produces nothing.
    #[test]
    fn shorter_than_debounce_is_silent(hold in 1u64..DEBOUNCE) {
        let events = run_hold(hold, &[], &[]);
        prop_assert!(events.is_empty(), "hold {} ms gave {:?}", hold, events);
    }

    /// Between debounce and the threshold: one click at the release edge.
    #[test]
    fn short_hold_is_one_click(
        hold in (DEBOUNCE + 20)..(LONG_PRESS - 30),
        press_bounce in bounce_offsets(),
        release_bounce in bounce_offsets(),
    ) {
        let events = run_hold(hold, &press_bounce, &release_bounce);
        prop_assert_eq!(events.len(), 1, "hold {} ms gave {:?}", hold, events);
        prop_assert_eq!(events[0].kind, GestureKind::Click);
        // Stamped at the last raw edge of the release burst.
        let release_at = PRESS_AT + hold;
        prop_assert!(events[0].at >= ms(release_at));
        prop_assert!(events[0].at < ms(release_at + DEBOUNCE));
    }

    /// Past the threshold: one long press at press + 1000 ms, no click.
    #[test]
    fn long_hold_is_one_long_press(
        hold in LONG_PRESS..(LONG_PRESS * 5),
        release_bounce in bounce_offsets(),
    ) {
        let events = run_hold(hold, &[], &release_bounce);
        prop_assert_eq!(events.len(), 1, "hold {} ms gave {:?}", hold, events);
        prop_assert_eq!(events[0].kind, GestureKind::LongPress);
        prop_assert_eq!(events[0].at, ms(PRESS_AT + LONG_PRESS));
    }

    /// A bouncy press is timed from its last raw edge.
    #[test]
    fn bouncy_long_hold_is_timed_from_settled_edge(
        hold in (LONG_PRESS + 25)..(LONG_PRESS * 5),
        press_bounce in bounce_offsets(),
    ) {
        let events = run_hold(hold, &press_bounce, &[]);
        prop_assert_eq!(events.len(), 1, "hold {} ms gave {:?}", hold, events);
        prop_assert_eq!(events[0].kind, GestureKind::LongPress);
        prop_assert!(events[0].at >= ms(PRESS_AT + LONG_PRESS));
        prop_assert!(events[0].at <= ms(PRESS_AT + LONG_PRESS + 20));
    }

    /// Timing that passes validation never makes the classifier panic.
    #[test]
    fn any_valid_config_is_total(
        debounce in 1u32..200,
        extra in 1u32..5_000,
        levels in proptest::collection::vec(any::<bool>(), 0..64),
        step in 1u64..300,
    ) {
        let config = ButtonConfig::new(debounce, debounce + extra);
        prop_assert!(config.validate().is_ok());
        let mut c = GestureClassifier::new(Button::KeyB, config);
        let mut clicks_and_longs = 0usize;
        for (i, level) in levels.iter().enumerate() {
            if let Some(e) = c.on_edge(*level, ms(i as u64 * step)) {
                prop_assert_ne!(e.kind, GestureKind::Release);
                clicks_and_longs += 1;
            }
        }
        // At most one gesture per accepted press.
        prop_assert!(clicks_and_longs <= levels.len() / 2 + 1);
    }
}
