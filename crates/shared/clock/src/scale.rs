use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Time scale modes for the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeScale {
    /// Real-time (1:1 ratio with wall clock)
    #[default]
    Normal,
    /// Accelerated time (game durations divided by the multiplier)
    Fast(u32),
    /// Decelerated time (game durations multiplied by the divisor)
    Slow(u32),
}

impl TimeScale {
    /// Convert a game duration to the wall-clock duration to wait
    ///
    /// A zero factor is treated as 1.
    pub fn to_real(&self, game: Duration) -> Duration {
        match *self {
            TimeScale::Normal => game,
            TimeScale::Fast(multiplier) => game / multiplier.max(1),
            TimeScale::Slow(divisor) => game.saturating_mul(divisor.max(1)),
        }
    }

    /// Whether the scale carries a zero factor (rejected by config validation)
    pub fn is_degenerate(&self) -> bool {
        matches!(*self, TimeScale::Fast(0) | TimeScale::Slow(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_is_identity() {
        let d = Duration::from_millis(1234);
        assert_eq!(TimeScale::Normal.to_real(d), d);
    }

    #[test]
    fn test_fast_and_slow() {
        let d = Duration::from_secs(30);
        assert_eq!(TimeScale::Fast(10).to_real(d), Duration::from_secs(3));
        assert_eq!(TimeScale::Slow(2).to_real(d), Duration::from_secs(60));
    }

    #[test]
    fn test_zero_factor_is_treated_as_one() {
        let d = Duration::from_secs(1);
        assert_eq!(TimeScale::Fast(0).to_real(d), d);
        assert_eq!(TimeScale::Slow(0).to_real(d), d);
        assert!(TimeScale::Fast(0).is_degenerate());
        assert!(!TimeScale::Fast(3).is_degenerate());
    }
}
