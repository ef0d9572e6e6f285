//! Game clock and shared time sources

use std::cell::Cell;
use std::rc::Rc;

/// A monotonic, non-decreasing game-time source in seconds.
pub trait TimeSource {
    fn now(&self) -> f64;
}

/// Shared read handle onto a clock's total time.
///
/// Cloning is cheap and every clone observes the same value. Time never moves
/// backwards: `set` ignores values below the current time.
#[derive(Clone, Debug, Default)]
pub struct ClockHandle(Rc<Cell<f64>>);

impl ClockHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward to `time`
    pub fn set(&self, time: f64) {
        if time > self.0.get() {
            self.0.set(time);
        }
    }

    /// Move the clock forward by `dt` seconds (negative values are ignored)
    pub fn advance(&self, dt: f64) {
        self.set(self.0.get() + dt.max(0.0));
    }
}

impl TimeSource for ClockHandle {
    fn now(&self) -> f64 {
        self.0.get()
    }
}

/// Tracks game time for the host loop.
///
/// Stepped deterministically with `advance`. Total time is mirrored into a
/// `ClockHandle` so cadence strategies can read it without borrowing the clock.
#[derive(Debug, Default)]
pub struct GameClock {
    /// Total elapsed game time in seconds
    pub total_time: f64,
    handle: ClockHandle,
}

impl GameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by `dt` seconds of game time (negative values are ignored)
    pub fn advance(&mut self, dt: f64) {
        self.total_time += dt.max(0.0);
        self.handle.set(self.total_time);
    }

    /// Shared handle that follows this clock's total time
    pub fn handle(&self) -> ClockHandle {
        self.handle.clone()
    }
}

impl TimeSource for GameClock {
    fn now(&self) -> f64 {
        self.total_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_defaults() {
        let clock = GameClock::new();
        assert_eq!(clock.total_time, 0.0);
        assert_eq!(clock.handle().now(), 0.0);
    }

    #[test]
    fn test_advance_updates_handle() {
        let mut clock = GameClock::new();
        let handle = clock.handle();
        clock.advance(0.5);
        clock.advance(0.25);
        assert!((clock.total_time - 0.75).abs() < 1e-10);
        assert!((handle.now() - 0.75).abs() < 1e-10);
        assert!((clock.now() - 0.75).abs() < 1e-10);
    }

    #[test]
    fn test_negative_advance_ignored() {
        let mut clock = GameClock::new();
        let handle = clock.handle();
        clock.advance(1.0);
        clock.advance(-5.0);
        assert_eq!(clock.total_time, 1.0);
        assert_eq!(handle.now(), 1.0);
    }

    #[test]
    fn test_handle_is_monotonic() {
        let handle = ClockHandle::new();
        handle.set(3.0);
        handle.set(1.0);
        assert_eq!(handle.now(), 3.0);
        handle.advance(-1.0);
        assert_eq!(handle.now(), 3.0);
        handle.advance(2.0);
        assert_eq!(handle.now(), 5.0);
    }

    #[test]
    fn test_clones_share_time() {
        let a = ClockHandle::new();
        let b = a.clone();
        a.advance(2.0);
        assert_eq!(b.now(), 2.0);
    }
}
