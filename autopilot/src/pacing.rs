use lightcycle_core::TickClock;
use std::time::Duration;

/// Hands out due ticks one at a time for a loop that runs a single tick per
/// poll. Ticks that fall due together are queued and released back to back;
/// the queue never grows past the clock's catch-up cap.
#[derive(Clone, Debug)]
pub struct TickPacer {
    clock: TickClock,
    backlog: u32,
}

impl TickPacer {
    pub fn new(clock: TickClock) -> Self {
        Self { clock, backlog: 0 }
    }

    /// Feeds the wall time since the previous poll. `None` means a tick should
    /// run now; otherwise the caller should wait the returned duration and poll again.
    pub fn poll(&mut self, elapsed: Duration) -> Option<Duration> {
        let due = self.clock.advance(elapsed);
        self.backlog = self
            .backlog
            .saturating_add(due)
            .min(self.clock.max_catch_up());
        if self.backlog == 0 {
            return Some(self.clock.until_next());
        }
        self.backlog -= 1;
        None
    }

    pub fn backlog(&self) -> u32 {
        self.backlog
    }
}
