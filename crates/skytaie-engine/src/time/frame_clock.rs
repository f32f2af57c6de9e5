use std::time::{Duration, Instant};

/// Timing for one frame-loop iteration.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Seconds since the previous tick, clamped.
    pub dt: f32,

    /// Seconds since the clock started (unclamped).
    pub elapsed: f32,

    /// Index of this tick, starting at 0.
    pub frame_index: u64,
}

impl Default for FrameTime {
    fn default() -> Self {
        Self { dt: 0.0, elapsed: 0.0, frame_index: 0 }
    }
}

/// Produces [`FrameTime`] values for the frame loop.
///
/// Delta time is clamped: the lower bound keeps a 1 ms busy loop from reporting zero,
/// the upper bound keeps movement sane after a debugger pause or a long hook.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
    next_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        let now = Instant::now();
        Self {
            start: now,
            last: now,
            next_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Number of ticks produced so far.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.next_index
    }

    /// Advances the clock.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);
        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            elapsed: now.saturating_duration_since(self.start).as_secs_f32(),
            frame_index: self.next_index,
        };
        self.next_index = self.next_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_count_up_from_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick().frame_index, 0);
        assert_eq!(clock.tick().frame_index, 1);
        assert_eq!(clock.ticks(), 2);
    }

    #[test]
    fn dt_is_clamped() {
        let mut clock = FrameClock::with_clamps(Duration::from_millis(5), Duration::from_millis(10));
        let first = clock.tick();
        assert!(first.dt >= 0.005 - f32::EPSILON);

        std::thread::sleep(Duration::from_millis(30));
        let second = clock.tick();
        assert!(second.dt <= 0.010 + f32::EPSILON);
        assert!(second.elapsed >= 0.030);
    }
}
