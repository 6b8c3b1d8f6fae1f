//! Button task: edge wait + classifier + subscribers.

use embassy_futures::select::{select, Either};
use embassy_time::{Instant, Timer};
use embedded_hal::digital::InputPin;
use embedded_hal_async::digital::Wait;
use platform::{
    Button, ButtonConfig, GestureClassifier, GestureEvent, GestureKind, GestureSink,
    SubscribeError, Subscribers,
};

/// Subscriber slots per button.
pub const MAX_SUBSCRIBERS: usize = 4;

/// One physical button.
///
/// Owns its input line and classifier. Subscriptions are made before the
/// task starts; after that the button is only driven by [`run`](Self::run).
pub struct ButtonInput<'a, P> {
    pin: P,
    classifier: GestureClassifier,
    subscribers: Subscribers<'a, MAX_SUBSCRIBERS>,
}

impl<'a, P: InputPin> ButtonInput<'a, P> {
    /// Button `id` on `pin`.
    pub fn new(id: Button, pin: P, config: ButtonConfig) -> Self {
        Self {
            pin,
            classifier: GestureClassifier::new(id, config),
            subscribers: Subscribers::new(),
        }
    }

    /// Which button this is.
    pub fn id(&self) -> Button {
        self.classifier.button()
    }

    /// Deliver clicks to `sink`.
    pub fn on_click(&mut self, sink: &'a dyn GestureSink) -> Result<(), SubscribeError> {
        self.subscribers.subscribe(GestureKind::Click, sink)
    }

    /// Deliver long presses to `sink`.
    pub fn on_long_press(&mut self, sink: &'a dyn GestureSink) -> Result<(), SubscribeError> {
        self.subscribers.subscribe(GestureKind::LongPress, sink)
    }

    /// Deliver long-press releases to `sink` (only emitted when the button's
    /// config has `report_release`).
    pub fn on_release(&mut self, sink: &'a dyn GestureSink) -> Result<(), SubscribeError> {
        self.subscribers.subscribe(GestureKind::Release, sink)
    }

    /// Read the line at `now`, classify, and publish whatever matured.
    pub fn sample(&mut self, now: Instant) -> Option<GestureEvent> {
        let event = match self.pin.is_high() {
            Ok(high) => {
                let pressed = self.classifier.config().active_level.is_pressed(high);
                self.classifier.on_edge(pressed, now)
            }
            Err(_) => {
                warn!("{} line read failed", self.id().as_str());
                self.classifier.poll(now)
            }
        };
        if let Some(event) = event {
            self.publish(event);
        }
        event
    }

    fn publish(&self, event: GestureEvent) {
        let delivered = self.subscribers.publish(event);
        debug!(
            "{} {} delivered to {} subscribers",
            event.button.as_str(),
            event.kind.as_str(),
            delivered
        );
    }

    /// Give the pin back.
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: InputPin + Wait> ButtonInput<'_, P> {
    /// Button task body: sleep until an edge or the classifier's next
    /// deadline, then sample. Never returns.
    pub async fn run(&mut self) -> ! {
        info!("{} button task started", self.id().as_str());
        loop {
            let edge = match self.classifier.next_deadline() {
                Some(deadline) => {
                    match select(self.pin.wait_for_any_edge(), Timer::at(deadline)).await {
                        Either::First(edge) => edge,
                        Either::Second(()) => Ok(()),
                    }
                }
                None => self.pin.wait_for_any_edge().await,
            };
            if edge.is_err() {
                warn!("{} edge wait failed", self.id().as_str());
            }
            self.sample(Instant::now());
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]
mod tests {
    use super::*;
    use embassy_time::Duration;
    use embedded_hal::digital::ErrorType;
    use embedded_hal_mock::eh1::digital::{
        Edge, Mock as PinMock, State, Transaction as PinTransaction,
    };
    use platform::mocks::RecordingSink;

    /// Mock line whose scripted edges run out: after the last one, an edge
    /// wait never completes, as on a key that is simply held.
    struct HeldLine {
        pin: PinMock,
        edges: usize,
    }

    impl ErrorType for HeldLine {
        type Error = <PinMock as ErrorType>::Error;
    }

    impl InputPin for HeldLine {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            self.pin.is_high()
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            self.pin.is_low()
        }
    }

    impl Wait for HeldLine {
        async fn wait_for_high(&mut self) -> Result<(), Self::Error> {
            self.pin.wait_for_high().await
        }

        async fn wait_for_low(&mut self) -> Result<(), Self::Error> {
            self.pin.wait_for_low().await
        }

        async fn wait_for_rising_edge(&mut self) -> Result<(), Self::Error> {
            self.pin.wait_for_rising_edge().await
        }

        async fn wait_for_falling_edge(&mut self) -> Result<(), Self::Error> {
            self.pin.wait_for_falling_edge().await
        }

        async fn wait_for_any_edge(&mut self) -> Result<(), Self::Error> {
            if self.edges == 0 {
                return core::future::pending().await;
            }
            self.edges -= 1;
            self.pin.wait_for_any_edge().await
        }
    }

    fn ms(v: u64) -> Instant {
        Instant::from_millis(v)
    }

    #[test]
    fn active_low_click_reaches_click_subscriber_only() {
        let expectations = [
            PinTransaction::get(State::Low),
            PinTransaction::get(State::Low),
            PinTransaction::get(State::High),
            PinTransaction::get(State::High),
        ];
        let clicks = RecordingSink::new();
        let longs = RecordingSink::new();
        let mut button = ButtonInput::new(
            Button::KeyA,
            PinMock::new(&expectations),
            ButtonConfig::default(),
        );
        button.on_click(&clicks).unwrap();
        button.on_long_press(&longs).unwrap();

        assert_eq!(button.sample(ms(0)), None);
        assert_eq!(button.sample(ms(60)), None);
        assert_eq!(button.sample(ms(300)), None);
        let ev = button.sample(ms(360)).unwrap();
        assert_eq!(ev.kind, GestureKind::Click);
        assert_eq!(ev.at, ms(300));

        assert_eq!(clicks.events(), vec![ev]);
        assert!(longs.events().is_empty());
        button.release().done();
    }

    #[test]
    fn held_key_publishes_long_press_once() {
        let expectations = [
            PinTransaction::get(State::Low),
            PinTransaction::get(State::Low),
            PinTransaction::get(State::Low),
        ];
        let longs = RecordingSink::new();
        let mut button = ButtonInput::new(
            Button::KeyB,
            PinMock::new(&expectations),
            ButtonConfig::default(),
        );
        button.on_long_press(&longs).unwrap();
        button.sample(ms(0));
        assert_eq!(
            button.sample(ms(1_000)).map(|e| e.kind),
            Some(GestureKind::LongPress)
        );
        assert_eq!(button.sample(ms(2_000)), None);
        assert_eq!(longs.events().len(), 1);
        assert_eq!(longs.events()[0].button, Button::KeyB);
        button.release().done();
    }

    #[tokio::test]
    async fn run_fires_long_press_at_threshold_while_held() {
        // One falling edge, then the line stays low: a sample at the edge,
        // one when the debounce window ends, one at the threshold.
        let expectations = [
            PinTransaction::wait_for_edge(Edge::Any),
            PinTransaction::get(State::Low),
            PinTransaction::get(State::Low),
            PinTransaction::get(State::Low),
        ];
        let mut pin = PinMock::new(&expectations);
        let line = HeldLine {
            pin: pin.clone(),
            edges: 1,
        };
        let config = ButtonConfig::new(20, 200);
        let longs = RecordingSink::new();
        let mut button = ButtonInput::new(Button::KeyA, line, config);
        button.on_long_press(&longs).unwrap();

        let started = Instant::now();
        let _ = select(button.run(), Timer::after(Duration::from_millis(400))).await;

        let events = longs.events();
        assert_eq!(events.len(), 1, "long press without a release edge");
        let event = events[0];
        assert_eq!(event.kind, GestureKind::LongPress);
        let threshold = started + Duration::from_millis(200);
        assert!(event.at >= threshold);
        assert!(event.at < threshold + Duration::from_millis(100));
        pin.done();
    }
}
