//! Binds one cadence to a fixed list of payloads

use crate::effect::BuffEffect;
use crate::mode::ExecutionMode;

/// One execution mode plus the ordered payloads it fires together.
pub struct BuffEffectExecuter<T> {
    mode: Box<dyn ExecutionMode<T>>,
    effects: Vec<Box<dyn BuffEffect<T>>>,
}

impl<T> BuffEffectExecuter<T> {
    pub fn new(mode: impl ExecutionMode<T> + 'static, effects: Vec<Box<dyn BuffEffect<T>>>) -> Self {
        Self::from_boxed(Box::new(mode), effects)
    }

    pub fn from_boxed(mode: Box<dyn ExecutionMode<T>>, effects: Vec<Box<dyn BuffEffect<T>>>) -> Self {
        Self { mode, effects }
    }

    /// Convenience for a single payload
    pub fn single(mode: impl ExecutionMode<T> + 'static, effect: impl BuffEffect<T> + 'static) -> Self {
        Self::new(mode, vec![Box::new(effect)])
    }

    /// Drive the executer once.
    ///
    /// With no target this is a no-op. Otherwise the mode decides whether all
    /// payloads fire (in list order, as one firing). Every payload then gets
    /// `on_update`, even when the mode did not fire.
    pub fn apply(&mut self, target: Option<&T>) {
        let Some(target) = target else {
            return;
        };

        let effects = &mut self.effects;
        self.mode.execute(target, &mut |t| {
            for effect in effects.iter_mut() {
                effect.apply(t);
            }
        });

        for effect in &mut self.effects {
            effect.on_update();
        }
    }

    /// Roll back every payload, in list order
    pub fn rollback(&mut self) {
        for effect in &mut self.effects {
            effect.rollback();
        }
    }

    pub fn is_eligible(&self) -> bool {
        self.mode.is_eligible()
    }

    pub fn effect_count(&self) -> usize {
        self.effects.len()
    }
}

impl<T> std::fmt::Debug for BuffEffectExecuter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuffEffectExecuter")
            .field("effects", &self.effects.len())
            .finish()
    }
}
