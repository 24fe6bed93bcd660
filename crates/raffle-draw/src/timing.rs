//! Reveal pacing configuration.

use std::time::Duration;

/// Pacing of one slot's reveal sub-sequence. Tunable; none of these values
/// are semantically load-bearing.
#[derive(Debug, Clone, Copy)]
pub struct DrawTiming {
    /// Delay between slot creation and the start of its spin.
    pub pre_spin_delay: Duration,
    /// Interval between displayed-name changes while spinning.
    pub tick_interval: Duration,
    /// Total spinning time before the slot stops on its winner.
    pub spin_duration: Duration,
    /// Delay between stopping and settling.
    pub post_stop_delay: Duration,
}

impl DrawTiming {
    /// Number of ticks in one spin.
    pub(crate) fn tick_count(&self) -> u32 {
        let interval = self.tick_interval.max(Duration::from_millis(1));
        u32::try_from(self.spin_duration.as_millis() / interval.as_millis()).unwrap_or(u32::MAX)
    }

    /// Near-instant pacing for tests.
    #[must_use]
    pub fn fast() -> Self {
        Self {
            pre_spin_delay: Duration::ZERO,
            tick_interval: Duration::from_millis(1),
            spin_duration: Duration::from_millis(3),
            post_stop_delay: Duration::ZERO,
        }
    }
}

impl Default for DrawTiming {
    fn default() -> Self {
        Self {
            pre_spin_delay: Duration::from_millis(500),
            tick_interval: Duration::from_millis(100),
            spin_duration: Duration::from_millis(5000),
            post_stop_delay: Duration::from_millis(500),
        }
    }
}
