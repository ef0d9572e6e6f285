//! Game-loop integration: one buff system per entity

use crate::buff::Buff;
use crate::system::BuffSystem;
use flint_core::{BuffId, EntityId, FlintError, Result};
use flint_runtime::{EventBus, GameClock, GameEvent, RuntimeSystem, TimeSource};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Owns the buff systems of every attached entity and the clock that periodic
/// effects read.
///
/// Each `update` advances the clock by `dt` and then ticks every system in
/// ascending entity order. Add/remove/clear notifications from all systems
/// are collected as `GameEvent`s for the host to drain.
pub struct BuffRuntime<T> {
    systems: BTreeMap<EntityId, BuffSystem<T>>,
    clock: GameClock,
    events: Rc<RefCell<EventBus>>,
}

impl<T: Clone + 'static> BuffRuntime<T> {
    pub fn new() -> Self {
        Self {
            systems: BTreeMap::new(),
            clock: GameClock::new(),
            events: Rc::new(RefCell::new(EventBus::new())),
        }
    }

    /// Time source following this runtime's game time, for `Periodic` modes
    pub fn time_source(&self) -> Rc<dyn TimeSource> {
        Rc::new(self.clock.handle())
    }

    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    /// Give `entity` a buff system targeting `target`.
    ///
    /// Attaching an entity twice keeps the existing system.
    pub fn attach(&mut self, entity: EntityId, target: T) -> &mut BuffSystem<T> {
        if self.systems.contains_key(&entity) {
            tracing::warn!(%entity, "entity already has a buff system");
        }
        let events = &self.events;
        self.systems.entry(entity).or_insert_with(|| {
            let mut system = BuffSystem::new(target);
            wire_events(&mut system, entity, events);
            system
        })
    }

    /// Remove an entity's buff system and hand it back
    pub fn detach(&mut self, entity: EntityId) -> Option<BuffSystem<T>> {
        self.systems.remove(&entity)
    }

    pub fn is_attached(&self, entity: EntityId) -> bool {
        self.systems.contains_key(&entity)
    }

    pub fn system(&self, entity: EntityId) -> Option<&BuffSystem<T>> {
        self.systems.get(&entity)
    }

    pub fn system_mut(&mut self, entity: EntityId) -> Option<&mut BuffSystem<T>> {
        self.systems.get_mut(&entity)
    }

    pub fn add_buff(&mut self, entity: EntityId, buff: Buff<T>) -> Result<BuffId> {
        let system = self
            .systems
            .get_mut(&entity)
            .ok_or_else(|| FlintError::EntityNotFound(entity.to_string()))?;
        Ok(system.add_buff(buff))
    }

    /// Attached entities, ascending
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.systems.keys().copied()
    }

    pub fn entity_count(&self) -> usize {
        self.systems.len()
    }

    /// Advance game time by `dt` and tick every system
    pub fn tick(&mut self, dt: f64) {
        self.clock.advance(dt);
        for system in self.systems.values_mut() {
            system.tick(dt);
        }
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.borrow_mut().drain()
    }
}

fn wire_events<T: Clone>(system: &mut BuffSystem<T>, entity: EntityId, events: &Rc<RefCell<EventBus>>) {
    let bus = events.clone();
    system.on_buff_added().subscribe(move |buff| {
        if let Some(id) = buff.id() {
            bus.borrow_mut().push(GameEvent::BuffAdded {
                entity,
                buff: id,
                name: buff.name().to_string(),
            });
        }
    });

    let bus = events.clone();
    system.on_buff_removed().subscribe(move |buff| {
        if let Some(id) = buff.id() {
            bus.borrow_mut().push(GameEvent::BuffRemoved {
                entity,
                buff: id,
                name: buff.name().to_string(),
            });
        }
    });

    let bus = events.clone();
    system
        .on_buffs_cleared()
        .subscribe(move |_| bus.borrow_mut().push(GameEvent::BuffsCleared { entity }));
}

impl<T: Clone + 'static> Default for BuffRuntime<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + 'static> RuntimeSystem for BuffRuntime<T> {
    fn initialize(&mut self) -> Result<()> {
        tracing::info!(entities = self.systems.len(), "buff runtime initialized");
        Ok(())
    }

    fn update(&mut self, dt: f64) -> Result<()> {
        self.tick(dt);
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        self.systems.clear();
        tracing::info!("buff runtime shut down");
        Ok(())
    }

    fn name(&self) -> &str {
        "buffs"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::FnEffect;
    use crate::executer::BuffEffectExecuter;
    use crate::mode::Periodic;
    use std::cell::Cell;

    #[test]
    fn add_to_unknown_entity_fails() {
        let mut runtime: BuffRuntime<u32> = BuffRuntime::new();
        let result = runtime.add_buff(EntityId(9), Buff::new(1.0));
        assert!(matches!(result, Err(FlintError::EntityNotFound(_))));
    }

    #[test]
    fn events_flow_to_bus() {
        let mut runtime: BuffRuntime<u32> = BuffRuntime::new();
        runtime.attach(EntityId(1), 100);
        runtime.attach(EntityId(2), 200);

        let a = runtime.add_buff(EntityId(1), Buff::new(1.0).with_name("haste")).unwrap();
        runtime.add_buff(EntityId(2), Buff::new(5.0).with_name("shield")).unwrap();
        runtime.update(1.0).unwrap();
        if let Some(system) = runtime.system_mut(EntityId(2)) {
            system.clear();
        }

        let events = runtime.drain_events();
        assert_eq!(
            events,
            vec![
                GameEvent::BuffAdded { entity: EntityId(1), buff: a, name: "haste".into() },
                GameEvent::BuffAdded { entity: EntityId(2), buff: BuffId(1), name: "shield".into() },
                GameEvent::BuffRemoved { entity: EntityId(1), buff: a, name: "haste".into() },
                GameEvent::BuffsCleared { entity: EntityId(2) },
            ]
        );
        assert!(runtime.drain_events().is_empty());
    }

    #[test]
    fn attach_twice_keeps_existing() {
        let mut runtime: BuffRuntime<u32> = BuffRuntime::new();
        runtime.attach(EntityId(1), 1).add_buff(Buff::new(1.0));
        let system = runtime.attach(EntityId(1), 2);
        assert_eq!(*system.target(), 1);
        assert_eq!(system.len(), 1);
        assert_eq!(runtime.entity_count(), 1);
    }

    #[test]
    fn periodic_effects_follow_runtime_clock() {
        let mut runtime: BuffRuntime<u32> = BuffRuntime::new();
        runtime.attach(EntityId(1), 0);

        let fired = Rc::new(Cell::new(0));
        let f = fired.clone();
        let exec = BuffEffectExecuter::single(
            Periodic::with_shared_clock(1.0, runtime.time_source()),
            FnEffect::new(move |_: &u32| f.set(f.get() + 1)),
        );
        runtime
            .add_buff(EntityId(1), Buff::new(10.0).with_executer(exec))
            .unwrap();

        // 20 frames of 0.25s = 5s of game time
        for _ in 0..20 {
            runtime.update(0.25).unwrap();
        }
        assert_eq!(fired.get(), 5);
        assert_eq!(runtime.clock().total_time, 5.0);
    }

    #[test]
    fn detach_returns_system() {
        let mut runtime: BuffRuntime<u32> = BuffRuntime::new();
        runtime.attach(EntityId(4), 4);
        let system = runtime.detach(EntityId(4));
        assert!(system.is_some());
        assert!(!runtime.is_attached(EntityId(4)));
        assert_eq!(runtime.name(), "buffs");
    }
}
