//! Execution cadence strategies
//!
//! An `ExecutionMode` decides whether an executer's payload fires on a given
//! call. New cadences implement the trait; executers and buffs don't change.

use flint_runtime::TimeSource;
use std::rc::Rc;

/// Cadence strategy consulted by a `BuffEffectExecuter` on every apply.
pub trait ExecutionMode<T> {
    /// Whether the payload would fire if executed now. No side effects.
    fn is_eligible(&self) -> bool;

    /// Fire `payload` with `target` if eligible and advance the cadence state.
    /// Does nothing when not eligible.
    fn execute(&mut self, target: &T, payload: &mut dyn FnMut(&T));
}

/// Fires exactly once, on the first call, then never again.
#[derive(Debug, Clone, Default)]
pub struct Continuity {
    fired: bool,
}

impl Continuity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }
}

impl<T> ExecutionMode<T> for Continuity {
    fn is_eligible(&self) -> bool {
        !self.fired
    }

    fn execute(&mut self, target: &T, payload: &mut dyn FnMut(&T)) {
        if !self.fired {
            payload(target);
            self.fired = true;
        }
    }
}

/// Fires at most once per `interval` seconds of host time.
///
/// The first deadline is time zero, so the first call fires as soon as the
/// clock reads `>= 0`. After each firing the deadline moves to
/// `now + interval`.
pub struct Periodic {
    interval: f64,
    next_eligible_time: f64,
    clock: Rc<dyn TimeSource>,
}

impl Periodic {
    pub fn new(interval: f64, clock: impl TimeSource + 'static) -> Self {
        Self::with_shared_clock(interval, Rc::new(clock))
    }

    pub fn with_shared_clock(interval: f64, clock: Rc<dyn TimeSource>) -> Self {
        Self {
            interval,
            next_eligible_time: 0.0,
            clock,
        }
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    pub fn next_eligible_time(&self) -> f64 {
        self.next_eligible_time
    }
}

impl<T> ExecutionMode<T> for Periodic {
    fn is_eligible(&self) -> bool {
        self.clock.now() >= self.next_eligible_time
    }

    fn execute(&mut self, target: &T, payload: &mut dyn FnMut(&T)) {
        let now = self.clock.now();
        if now >= self.next_eligible_time {
            payload(target);
            self.next_eligible_time = now + self.interval;
            tracing::trace!(now, next = self.next_eligible_time, "periodic effect fired");
        }
    }
}

impl std::fmt::Debug for Periodic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Periodic")
            .field("interval", &self.interval)
            .field("next_eligible_time", &self.next_eligible_time)
            .finish()
    }
}

/// Fires on the first `count` calls, then stops.
#[derive(Debug, Clone)]
pub struct Limited {
    remaining: u32,
}

impl Limited {
    pub fn new(count: u32) -> Self {
        Self { remaining: count }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}

impl<T> ExecutionMode<T> for Limited {
    fn is_eligible(&self) -> bool {
        self.remaining > 0
    }

    fn execute(&mut self, target: &T, payload: &mut dyn FnMut(&T)) {
        if self.remaining > 0 {
            payload(target);
            self.remaining -= 1;
        }
    }
}
