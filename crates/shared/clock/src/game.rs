use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at, sleep};

use crate::TimeScale;

/// Game clock - converts game durations through the configured scale
///
/// Cheap to copy; every task carries its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameClock {
    scale: TimeScale,
}

impl GameClock {
    pub fn new(scale: TimeScale) -> Self {
        Self { scale }
    }

    /// Sleep for a game duration
    pub async fn sleep(&self, game: Duration) {
        sleep(self.scale.to_real(game)).await;
    }

    /// Periodic ticker for a game period
    ///
    /// The first tick completes one full period after creation, not
    /// immediately. Missed ticks are delayed rather than burst so a stalled
    /// runtime never applies a backlog of ticks at once.
    pub fn interval(&self, period: Duration) -> Interval {
        let real = self.scale.to_real(period).max(Duration::from_millis(1));
        let mut ticker = interval_at(Instant::now() + real, real);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_sleep_is_scaled() {
        let clock = GameClock::new(TimeScale::Fast(4));
        let start = Instant::now();
        clock.sleep(Duration::from_secs(8)).await;
        assert_near(start.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_interval_first_tick_after_one_period() {
        let clock = GameClock::default();
        let start = Instant::now();
        let mut ticker = clock.interval(Duration::from_secs(1));

        ticker.tick().await;
        assert_near(start.elapsed(), Duration::from_secs(1));

        ticker.tick().await;
        assert_near(start.elapsed(), Duration::from_secs(2));
    }

    fn assert_near(actual: Duration, expected: Duration) {
        assert!(
            actual >= expected && actual < expected + Duration::from_millis(5),
            "expected ~{expected:?}, got {actual:?}"
        );
    }
}
