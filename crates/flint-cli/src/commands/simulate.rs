//! Headless buff simulation command

use anyhow::{Context, Result};
use flint_buff::{BuffCatalog, BuffEffect, BuffRuntime, EffectRegistry};
use flint_core::EntityId;
use flint_runtime::{GameEvent, RuntimeSystem};
use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;

pub struct SimulateArgs {
    pub catalog: String,
    pub apply: Vec<String>,
    pub ticks: u32,
    pub dt: f64,
    pub entity: u64,
}

/// Stand-in payload that logs and counts each firing
struct TraceEffect {
    name: String,
    fired: Rc<Cell<u32>>,
}

impl BuffEffect<EntityId> for TraceEffect {
    fn apply(&mut self, target: &EntityId) {
        self.fired.set(self.fired.get() + 1);
        tracing::debug!(effect = %self.name, %target, "effect fired");
    }

    fn rollback(&mut self) {
        tracing::debug!(effect = %self.name, "effect rolled back");
    }
}

/// Register a tracing payload for every effect the catalog mentions.
/// Returns the per-effect fire counters.
fn trace_registry(
    catalog: &BuffCatalog,
) -> (EffectRegistry<EntityId>, BTreeMap<String, Rc<Cell<u32>>>) {
    let mut registry = EffectRegistry::new();
    let mut counters = BTreeMap::new();

    for name in catalog.iter().flat_map(|d| d.effect_names()) {
        if counters.contains_key(name) {
            continue;
        }
        let fired = Rc::new(Cell::new(0));
        counters.insert(name.to_string(), fired.clone());

        let effect_name = name.to_string();
        registry.register(name, move || {
            Box::new(TraceEffect {
                name: effect_name.clone(),
                fired: fired.clone(),
            }) as Box<dyn BuffEffect<EntityId>>
        });
    }

    (registry, counters)
}

fn format_event(time: f64, event: &GameEvent) -> String {
    match event {
        GameEvent::BuffAdded { buff, name, .. } => format!("[t={:>6.2}] + {} (#{})", time, name, buff),
        GameEvent::BuffRemoved { buff, name, .. } => format!("[t={:>6.2}] - {} (#{})", time, name, buff),
        GameEvent::BuffsCleared { entity } => format!("[t={:>6.2}] cleared entity {}", time, entity),
    }
}

pub fn run(args: SimulateArgs) -> Result<()> {
    let catalog = BuffCatalog::load_from_file(&args.catalog)
        .with_context(|| format!("Failed to load catalog {}", args.catalog))?;
    let (registry, counters) = trace_registry(&catalog);

    let entity = EntityId::from_raw(args.entity);
    let mut runtime: BuffRuntime<EntityId> = BuffRuntime::new();
    runtime.attach(entity, entity);
    runtime.initialize()?;

    let clock = runtime.time_source();
    for name in &args.apply {
        let buff = catalog
            .instantiate(name, &registry, &clock)
            .with_context(|| format!("Cannot apply buff '{}'", name))?;
        runtime.add_buff(entity, buff)?;
    }

    for event in runtime.drain_events() {
        println!("{}", format_event(0.0, &event));
    }

    for _ in 0..args.ticks {
        runtime.update(args.dt)?;
        let now = runtime.clock().total_time;
        for event in runtime.drain_events() {
            println!("{}", format_event(now, &event));
        }
    }

    println!();
    match runtime.system(entity) {
        Some(system) if !system.is_empty() => {
            println!("Active after {:.2}s:", runtime.clock().total_time);
            for buff in system.iter() {
                println!(
                    "  {} remaining={:.2}s progress={:.0}%",
                    buff.name(),
                    buff.remaining_time(),
                    buff.progress() * 100.0
                );
            }
        }
        _ => println!("No active buffs after {:.2}s", runtime.clock().total_time),
    }

    println!("Effect firings:");
    for (name, fired) in &counters {
        println!("  {}: {}", name, fired.get());
    }

    runtime.shutdown()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"
[[buff]]
name = "burning"
duration = 2.0

[[buff.executer]]
mode = { type = "periodic", interval = 1.0 }
effects = ["fire_damage"]

[[buff]]
name = "regen"
duration = 1.0

[[buff.executer]]
mode = { type = "limited", count = 2 }
effects = ["heal", "fire_damage"]
"#;

    #[test]
    fn registry_covers_every_effect_once() {
        let catalog = BuffCatalog::load_from_str(CATALOG).unwrap();
        let (registry, counters) = trace_registry(&catalog);
        assert_eq!(registry.len(), 2);
        assert_eq!(counters.keys().collect::<Vec<_>>(), vec!["fire_damage", "heal"]);
        assert!(catalog.check_effects(&registry).is_ok());
    }

    #[test]
    fn trace_effects_count_firings() {
        let catalog = BuffCatalog::load_from_str(CATALOG).unwrap();
        let (registry, counters) = trace_registry(&catalog);

        let entity = EntityId::from_raw(1);
        let mut runtime: BuffRuntime<EntityId> = BuffRuntime::new();
        runtime.attach(entity, entity);
        let clock = runtime.time_source();
        let buff = catalog.instantiate("regen", &registry, &clock).unwrap();
        runtime.add_buff(entity, buff).unwrap();

        for _ in 0..4 {
            runtime.update(0.25).unwrap();
        }
        assert_eq!(counters["heal"].get(), 2);
        assert_eq!(counters["fire_damage"].get(), 2);
        assert!(runtime.system(entity).map_or(false, |s| s.is_empty()));
    }

    #[test]
    fn formats_timeline_lines() {
        let line = format_event(
            1.5,
            &GameEvent::BuffRemoved {
                entity: EntityId(1),
                buff: flint_core::BuffId(3),
                name: "burning".into(),
            },
        );
        assert_eq!(line, "[t=  1.50] - burning (#3)");
    }
}
