use std::time::{Duration, Instant};

/// Fixed-rate tick pacer.
///
/// Keeps a schedule of evenly spaced deadlines; [`sleep_until_next_tick`]
/// blocks until the next one. Deadlines already in the past are skipped
/// rather than replayed, so a stalled loop does not burst to catch up.
///
/// [`sleep_until_next_tick`]: FramePacer::sleep_until_next_tick
#[derive(Debug)]
pub struct FramePacer {
    interval: Duration,
    next: Instant,
    tick_index: u64,
}

impl FramePacer {
    pub fn new(interval: Duration) -> Self {
        debug_assert!(!interval.is_zero());
        Self {
            interval,
            next: Instant::now() + interval,
            tick_index: 0,
        }
    }

    /// Pacer for a refresh rate in Hz.
    pub fn from_rate(hz: u32) -> Self {
        Self::new(Duration::from_secs(1) / hz.max(1))
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Monotonic count of completed ticks.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.tick_index
    }

    /// Sleeps until the next scheduled deadline, then advances the schedule.
    pub fn sleep_until_next_tick(&mut self) {
        let now = Instant::now();
        if self.next > now {
            std::thread::sleep(self.next - now);
        }

        self.tick_index = self.tick_index.wrapping_add(1);
        self.next += self.interval;

        // Drop missed deadlines after a long stall.
        let now = Instant::now();
        while self.next <= now {
            self.next += self.interval;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_are_spaced_by_at_least_the_interval() {
        let mut pacer = FramePacer::new(Duration::from_millis(10));
        let start = Instant::now();
        for _ in 0..3 {
            pacer.sleep_until_next_tick();
        }
        assert!(start.elapsed() >= Duration::from_millis(30));
        assert_eq!(pacer.ticks(), 3);
    }

    #[test]
    fn from_rate_divides_a_second() {
        let pacer = FramePacer::from_rate(60);
        assert_eq!(pacer.interval(), Duration::from_secs(1) / 60);
    }
}
