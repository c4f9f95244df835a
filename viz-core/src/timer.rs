use std::time::{Duration, Instant};

/// Fixed interval timer driving animation playback. There is at most one
/// active run: `start` discards any previous schedule.
///
/// The timer does not spawn anything; the host polls it with the current
/// time. Deadlines missed while nobody polled collapse into one tick.
#[derive(Debug, Clone)]
pub struct PlaybackTimer {
    interval: Duration,
    next_tick: Option<Instant>,
}

impl PlaybackTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            next_tick: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval.max(Duration::from_millis(1));
    }

    pub fn start(&mut self, now: Instant) {
        if self.next_tick.is_some() {
            log::debug!("restarting playback timer");
        }
        self.next_tick = Some(now + self.interval);
    }

    pub fn stop(&mut self) {
        self.next_tick = None;
    }

    pub fn is_active(&self) -> bool {
        self.next_tick.is_some()
    }

    /// Whether a tick is due at `now`. The schedule moves on to the first
    /// deadline after `now`, on the original grid.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(next) = self.next_tick else {
            return false;
        };
        if next > now {
            return false;
        }
        let behind = (now - next).as_nanos() % self.interval.as_nanos();
        let behind = Duration::from_nanos(behind as u64);
        if now - next >= self.interval {
            log::debug!("playback timer fell behind by {:?}", now - next);
        }
        self.next_tick = Some(now + (self.interval - behind));
        true
    }

    /// Time until the next tick, for scheduling a repaint.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.next_tick
            .map(|next| next.saturating_duration_since(now))
    }
}
