//! Effect payloads

/// A unit of gameplay logic fired by an executer.
///
/// `on_update` and `rollback` are optional capabilities; the defaults do
/// nothing.
pub trait BuffEffect<T> {
    /// Apply the effect to the target. Called each time the executer's
    /// cadence fires.
    fn apply(&mut self, target: &T);

    /// Per-call bookkeeping. Called on every executer apply, whether or not
    /// the cadence fired.
    fn on_update(&mut self) {}

    /// Undo the effect. Called only on full teardown of the owning buff.
    fn rollback(&mut self) {}
}

/// Closure-backed effect payload.
///
/// ```
/// use flint_buff::FnEffect;
///
/// let effect = FnEffect::new(|hp: &std::cell::Cell<i32>| hp.set(hp.get() - 5))
///     .with_rollback(|| println!("burn cleansed"));
/// # let _ = effect;
/// ```
pub struct FnEffect<T> {
    apply: Box<dyn FnMut(&T)>,
    update: Option<Box<dyn FnMut()>>,
    rollback: Option<Box<dyn FnMut()>>,
}

impl<T> FnEffect<T> {
    pub fn new(apply: impl FnMut(&T) + 'static) -> Self {
        Self {
            apply: Box::new(apply),
            update: None,
            rollback: None,
        }
    }

    pub fn with_update(mut self, update: impl FnMut() + 'static) -> Self {
        self.update = Some(Box::new(update));
        self
    }

    pub fn with_rollback(mut self, rollback: impl FnMut() + 'static) -> Self {
        self.rollback = Some(Box::new(rollback));
        self
    }
}

impl<T> BuffEffect<T> for FnEffect<T> {
    fn apply(&mut self, target: &T) {
        (self.apply)(target);
    }

    fn on_update(&mut self) {
        if let Some(update) = &mut self.update {
            update();
        }
    }

    fn rollback(&mut self) {
        if let Some(rollback) = &mut self.rollback {
            rollback();
        }
    }
}
