use std::time::Duration;

use crate::constants::TICK_RATE_HZ;

const DEFAULT_MAX_CATCH_UP: u32 = 5;

/// Fixed-timestep accumulator for presentation loops.
///
/// Feed it elapsed wall time and it reports how many logical ticks are due.
/// When the loop falls far behind, at most `max_catch_up` ticks are reported
/// per call and the surplus is dropped.
#[derive(Clone, Debug)]
pub struct TickClock {
    period: Duration,
    accumulated: Duration,
    max_catch_up: u32,
}

impl TickClock {
    pub fn new(rate_hz: u32) -> Self {
        Self {
            period: Duration::from_secs(1) / rate_hz.max(1),
            accumulated: Duration::ZERO,
            max_catch_up: DEFAULT_MAX_CATCH_UP,
        }
    }

    pub fn with_max_catch_up(mut self, max_catch_up: u32) -> Self {
        self.max_catch_up = max_catch_up.max(1);
        self
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn max_catch_up(&self) -> u32 {
        self.max_catch_up
    }

    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulated += elapsed;
        let mut due = 0;
        while self.accumulated >= self.period && due < self.max_catch_up {
            self.accumulated -= self.period;
            due += 1;
        }
        if due == self.max_catch_up && self.accumulated >= self.period {
            tracing::debug!(
                dropped_ms = self.accumulated.as_millis() as u64,
                "tick clock fell behind"
            );
            self.accumulated = Duration::ZERO;
        }
        due
    }

    /// Time left until the next tick is due.
    pub fn until_next(&self) -> Duration {
        self.period.saturating_sub(self.accumulated)
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new(TICK_RATE_HZ)
    }
}
