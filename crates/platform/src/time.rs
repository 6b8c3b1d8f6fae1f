//! Time source
//!
//! Sequencing code needs both "sleep" ([`DelayNs`]) and "what time is it"
//! ([`Clock`]). On target both come from embassy-time; tests substitute a
//! virtual timeline (see `mocks::MockTimeline`) so a full power sequence
//! runs in microseconds.

use embassy_time::{Delay, Instant};
use embedded_hal_async::delay::DelayNs;

/// Monotonic time source.
pub trait Clock {
    /// Current instant.
    fn now(&self) -> Instant;
}

/// embassy-time backed [`Clock`] + [`DelayNs`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyTimebase;

impl Clock for EmbassyTimebase {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

impl DelayNs for EmbassyTimebase {
    async fn delay_ns(&mut self, ns: u32) {
        DelayNs::delay_ns(&mut Delay, ns).await;
    }

    async fn delay_us(&mut self, us: u32) {
        DelayNs::delay_us(&mut Delay, us).await;
    }

    async fn delay_ms(&mut self, ms: u32) {
        DelayNs::delay_ms(&mut Delay, ms).await;
    }
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now(&self) -> Instant {
        T::now(self)
    }
}
