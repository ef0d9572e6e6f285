//! A single buff: effect executers driven by a pausable, scalable timer

use crate::executer::BuffEffectExecuter;
use crate::signal::Signal;
use crate::tags::TagSet;
use flint_core::BuffId;

/// A timed modifier attached to a target.
///
/// Each `tick` advances the timer (unless paused or time-paused), drives every
/// executer once and, when `elapsed >= duration`, tears the buff down: payloads
/// are rolled back, executers dropped and the remove signal fired. The owning
/// `BuffSystem` then evicts it.
pub struct Buff<T> {
    id: Option<BuffId>,
    name: String,
    target: Option<T>,
    priority: i32,
    tags: TagSet,
    is_over: bool,
    torn_down: bool,

    duration: f64,
    elapsed: f64,
    paused: bool,
    time_paused: bool,
    time_scale: f64,

    executers: Vec<BuffEffectExecuter<T>>,

    on_apply: Signal<Option<T>>,
    on_remove: Signal<Option<T>>,
}

impl<T> Buff<T> {
    pub fn new(duration: f64) -> Self {
        Self {
            id: None,
            name: String::new(),
            target: None,
            priority: 0,
            tags: TagSet::new(),
            is_over: false,
            torn_down: false,
            duration,
            elapsed: 0.0,
            paused: false,
            time_paused: false,
            time_scale: 1.0,
            executers: Vec::new(),
            on_apply: Signal::new(),
            on_remove: Signal::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_target(mut self, target: T) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_tags<S: Into<String>>(mut self, tags: impl IntoIterator<Item = S>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    pub fn with_executer(mut self, executer: BuffEffectExecuter<T>) -> Self {
        self.executers.push(executer);
        self
    }

    // ─── Identity and classification ────────────────────────────────────────

    /// Handle assigned by the owning system, `None` until added
    pub fn id(&self) -> Option<BuffId> {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: BuffId) {
        self.id = Some(id);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target(&self) -> Option<&T> {
        self.target.as_ref()
    }

    pub fn set_target(&mut self, target: T) {
        self.target = Some(target);
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn set_priority(&mut self, priority: i32) {
        self.priority = priority;
    }

    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    pub fn tags_mut(&mut self) -> &mut TagSet {
        &mut self.tags
    }

    pub fn is_over(&self) -> bool {
        self.is_over
    }

    /// Flag the buff as over. The owning system tears it down and evicts it
    /// on its next tick.
    pub fn mark_over(&mut self) {
        self.is_over = true;
    }

    // ─── Executers ──────────────────────────────────────────────────────────

    pub fn add_executer(&mut self, executer: BuffEffectExecuter<T>) {
        self.executers.push(executer);
    }

    pub fn add_executers(&mut self, executers: impl IntoIterator<Item = BuffEffectExecuter<T>>) {
        self.executers.extend(executers);
    }

    /// Remove the executer at `index`, returning it. Out of range is a no-op.
    pub fn remove_executer(&mut self, index: usize) -> Option<BuffEffectExecuter<T>> {
        (index < self.executers.len()).then(|| self.executers.remove(index))
    }

    pub fn executer_count(&self) -> usize {
        self.executers.len()
    }

    // ─── Lifecycle ──────────────────────────────────────────────────────────

    /// Drive every executer once against the current target
    pub fn apply(&mut self) {
        let target = self.target.as_ref();
        for executer in &mut self.executers {
            executer.apply(target);
        }
    }

    /// Full teardown: roll back every payload, drop the executers and fire
    /// the remove signal. Runs at most once until `refresh` re-arms the buff.
    pub fn remove(&mut self) {
        if self.torn_down {
            return;
        }
        for executer in &mut self.executers {
            executer.rollback();
        }
        self.executers.clear();
        self.torn_down = true;
        self.on_remove.emit(&self.target);
    }

    pub fn trigger_apply_event(&mut self) {
        self.on_apply.emit(&self.target);
    }

    pub fn trigger_remove_event(&mut self) {
        self.on_remove.emit(&self.target);
    }

    /// Subscribers notified when the buff is applied to a system
    pub fn on_apply(&mut self) -> &mut Signal<Option<T>> {
        &mut self.on_apply
    }

    /// Subscribers notified on full teardown
    pub fn on_remove(&mut self) -> &mut Signal<Option<T>> {
        &mut self.on_remove
    }

    /// Advance the buff by `dt` seconds.
    ///
    /// A buff already flagged over (deferred removal) only runs its teardown,
    /// once, and does not apply effects again. A paused buff is otherwise
    /// inert.
    pub fn tick(&mut self, dt: f64) {
        if self.is_over {
            self.remove();
            return;
        }
        if self.paused {
            return;
        }

        if !self.time_paused {
            self.elapsed += dt * self.time_scale;
        }

        self.apply();

        if self.elapsed >= self.duration {
            self.elapsed = self.elapsed.min(self.duration).max(0.0);
            self.remove();
            self.is_over = true;
        }
    }

    // ─── Pause and time scale ───────────────────────────────────────────────

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Freeze the timer while effects keep applying
    pub fn time_pause(&mut self) {
        self.time_paused = true;
    }

    pub fn time_resume(&mut self) {
        self.time_paused = false;
    }

    pub fn set_time_paused(&mut self, paused: bool) {
        self.time_paused = paused;
    }

    pub fn is_time_paused(&self) -> bool {
        self.time_paused
    }

    /// Negative scales clamp to zero
    pub fn set_time_scale(&mut self, scale: f64) {
        self.time_scale = scale.max(0.0);
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    // ─── Timer queries and control ──────────────────────────────────────────

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn remaining_time(&self) -> f64 {
        (self.duration - self.elapsed).max(0.0)
    }

    /// Fraction of the duration that has elapsed, in `[0, 1]`.
    /// Zero or negative durations report 1.
    pub fn progress(&self) -> f64 {
        if self.duration > 0.0 {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    /// Restart the timer and re-arm the buff without leaving its system
    pub fn refresh(&mut self) {
        self.elapsed = 0.0;
        self.is_over = false;
        self.torn_down = false;
    }

    pub fn reset_timer(&mut self) {
        self.elapsed = 0.0;
    }

    /// Add to the duration. Negative values shorten it.
    pub fn extend_duration(&mut self, extra: f64) {
        self.duration += extra;
    }

    pub fn set_remaining_time(&mut self, remaining: f64) {
        self.elapsed = (self.duration - remaining).max(0.0);
    }
}

impl<T> std::fmt::Debug for Buff<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buff")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("priority", &self.priority)
            .field("tags", &self.tags)
            .field("is_over", &self.is_over)
            .field("duration", &self.duration)
            .field("elapsed", &self.elapsed)
            .field("paused", &self.paused)
            .field("time_paused", &self.time_paused)
            .field("time_scale", &self.time_scale)
            .field("executers", &self.executers.len())
            .finish()
    }
}
