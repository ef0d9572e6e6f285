//! Buff template catalog and effect registry

use crate::buff::Buff;
use crate::definition::{BuffDefinition, ModeDefinition};
use crate::effect::BuffEffect;
use crate::executer::BuffEffectExecuter;
use crate::mode::{Continuity, ExecutionMode, Limited, Periodic};
use flint_core::{FlintError, Result};
use flint_runtime::TimeSource;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::rc::Rc;

type EffectFactory<T> = Box<dyn Fn() -> Box<dyn BuffEffect<T>>>;

/// Maps effect names used in templates to payload factories.
///
/// Each instantiated buff gets fresh payloads, so per-effect state is never
/// shared between buffs.
pub struct EffectRegistry<T> {
    factories: HashMap<String, EffectFactory<T>>,
}

impl<T> EffectRegistry<T> {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a factory. Overwrites any existing factory with the same name.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        factory: impl Fn() -> Box<dyn BuffEffect<T>> + 'static,
    ) {
        self.factories.insert(name.into(), Box::new(factory));
    }

    pub fn create(&self, name: &str) -> Result<Box<dyn BuffEffect<T>>> {
        self.factories
            .get(name)
            .map(|factory| factory())
            .ok_or_else(|| FlintError::UnknownEffect(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl<T> Default for EffectRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// On-disk layout of a catalog file
#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default, rename = "buff")]
    buffs: Vec<BuffDefinition>,
}

/// Named buff templates loaded from TOML.
///
/// ```toml
/// [[buff]]
/// name = "burning"
/// duration = 6.0
/// priority = 10
/// tags = ["fire", "dot"]
///
/// [[buff.executer]]
/// mode = { type = "periodic", interval = 1.0 }
/// effects = ["fire_damage"]
/// ```
#[derive(Debug, Clone, Default)]
pub struct BuffCatalog {
    definitions: BTreeMap<String, BuffDefinition>,
}

impl BuffCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog from a `.buffs.toml` file.
    ///
    /// A failed read is an `IoError`; parse failures name the file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::load_from_str(&content).map_err(|e| match e {
            FlintError::TomlParseError(msg) => {
                FlintError::BuffConfigError(format!("Failed to parse {}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Parse and validate a catalog from a TOML string
    pub fn load_from_str(content: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(content)?;
        let mut catalog = Self::new();
        for definition in file.buffs {
            catalog.add(definition)?;
        }
        tracing::debug!(count = catalog.len(), "buff catalog loaded");
        Ok(catalog)
    }

    /// Validate and register a template. Names must be unique.
    pub fn add(&mut self, definition: BuffDefinition) -> Result<()> {
        definition.validate()?;
        if self.definitions.contains_key(&definition.name) {
            return Err(FlintError::BuffConfigError(format!(
                "Duplicate buff name: {}",
                definition.name
            )));
        }
        self.definitions.insert(definition.name.clone(), definition);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&BuffDefinition> {
        self.definitions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    /// Templates sorted by name
    pub fn iter(&self) -> impl Iterator<Item = &BuffDefinition> {
        self.definitions.values()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Check that every effect referenced by any template is registered
    pub fn check_effects<T>(&self, registry: &EffectRegistry<T>) -> Result<()> {
        for definition in self.iter() {
            if let Some(missing) = definition.effect_names().find(|n| !registry.contains(n)) {
                return Err(FlintError::UnknownEffect(format!(
                    "{} (referenced by buff '{}')",
                    missing, definition.name
                )));
            }
        }
        Ok(())
    }

    /// Build a fresh, untargeted buff from a template.
    ///
    /// Periodic executers read `clock` for their deadlines.
    pub fn instantiate<T: 'static>(
        &self,
        name: &str,
        registry: &EffectRegistry<T>,
        clock: &Rc<dyn TimeSource>,
    ) -> Result<Buff<T>> {
        let definition = self
            .get(name)
            .ok_or_else(|| FlintError::BuffNotFound(name.to_string()))?;

        let mut buff = Buff::new(definition.duration)
            .with_name(definition.name.clone())
            .with_priority(definition.priority)
            .with_tags(definition.tags.iter().cloned());
        buff.set_time_scale(definition.time_scale);

        for executer in &definition.executers {
            let effects = executer
                .effects
                .iter()
                .map(|effect| registry.create(effect))
                .collect::<Result<Vec<_>>>()?;
            let mode: Box<dyn ExecutionMode<T>> = match executer.mode {
                ModeDefinition::Continuity => Box::new(Continuity::new()),
                ModeDefinition::Periodic { interval } => {
                    Box::new(Periodic::with_shared_clock(interval, clock.clone()))
                }
                ModeDefinition::Limited { count } => Box::new(Limited::new(count)),
            };
            buff.add_executer(BuffEffectExecuter::from_boxed(mode, effects));
        }

        Ok(buff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::FnEffect;
    use flint_runtime::ClockHandle;
    use std::cell::Cell;

    const CATALOG: &str = r#"
[[buff]]
name = "burning"
duration = 3.0
priority = 10
tags = ["fire", "dot"]

[[buff.executer]]
mode = { type = "periodic", interval = 1.0 }
effects = ["damage"]

[[buff]]
name = "stoneskin"
duration = 5.0
priority = -1
tags = ["buff"]
time_scale = 0.5

[[buff.executer]]
mode = { type = "continuity" }
effects = ["armor"]
"#;

    fn registry(hits: &Rc<Cell<i32>>) -> EffectRegistry<i32> {
        let mut registry = EffectRegistry::new();
        let h = hits.clone();
        registry.register("damage", move || {
            let h = h.clone();
            Box::new(FnEffect::new(move |_: &i32| h.set(h.get() + 1))) as Box<dyn BuffEffect<i32>>
        });
        registry.register("armor", || Box::new(FnEffect::new(|_: &i32| {})) as Box<dyn BuffEffect<i32>>);
        registry
    }

    #[test]
    fn loads_and_lists_sorted() {
        let catalog = BuffCatalog::load_from_str(CATALOG).unwrap();
        assert_eq!(catalog.len(), 2);
        let names: Vec<&str> = catalog.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["burning", "stoneskin"]);
        assert_eq!(catalog.get("stoneskin").map(|d| d.time_scale), Some(0.5));
    }

    #[test]
    fn rejects_duplicate_names() {
        let doubled = format!("{}\n[[buff]]\nname = \"burning\"\nduration = 1.0\n", CATALOG);
        assert!(matches!(
            BuffCatalog::load_from_str(&doubled),
            Err(FlintError::BuffConfigError(_))
        ));
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(matches!(
            BuffCatalog::load_from_str("[[buff]\nname ="),
            Err(FlintError::TomlParseError(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = BuffCatalog::load_from_file("does/not/exist.buffs.toml");
        assert!(matches!(result, Err(FlintError::IoError(_))));
    }

    #[test]
    fn parse_error_names_the_file() {
        let path = std::env::temp_dir().join("flint_buff_bad_catalog.buffs.toml");
        std::fs::write(&path, "[[buff]\nname =").unwrap();
        let result = BuffCatalog::load_from_file(&path);
        let _ = std::fs::remove_file(&path);
        match result {
            Err(FlintError::BuffConfigError(msg)) => assert!(msg.contains("flint_buff_bad_catalog")),
            other => panic!("expected BuffConfigError, got {:?}", other),
        }
    }

    #[test]
    fn check_effects_reports_missing() {
        let catalog = BuffCatalog::load_from_str(CATALOG).unwrap();
        let hits = Rc::new(Cell::new(0));
        assert!(catalog.check_effects(&registry(&hits)).is_ok());

        let empty: EffectRegistry<i32> = EffectRegistry::new();
        assert!(matches!(
            catalog.check_effects(&empty),
            Err(FlintError::UnknownEffect(_))
        ));
    }

    #[test]
    fn instantiate_builds_working_buff() {
        let catalog = BuffCatalog::load_from_str(CATALOG).unwrap();
        let hits = Rc::new(Cell::new(0));
        let registry = registry(&hits);
        let handle = ClockHandle::new();
        let clock: Rc<dyn TimeSource> = Rc::new(handle.clone());

        let mut buff = catalog.instantiate("burning", &registry, &clock).unwrap();
        assert_eq!(buff.name(), "burning");
        assert_eq!(buff.priority(), 10);
        assert!(buff.tags().contains("dot"));
        assert_eq!(buff.executer_count(), 1);

        buff.set_target(0);
        for _ in 0..3 {
            buff.tick(1.0);
            handle.advance(1.0);
        }
        assert!(buff.is_over());
        assert_eq!(hits.get(), 3);

        let stoneskin = catalog.instantiate("stoneskin", &registry, &clock).unwrap();
        assert_eq!(stoneskin.time_scale(), 0.5);
    }

    #[test]
    fn instantiate_unknown_names() {
        let catalog = BuffCatalog::load_from_str(CATALOG).unwrap();
        let clock: Rc<dyn TimeSource> = Rc::new(ClockHandle::new());
        let empty: EffectRegistry<i32> = EffectRegistry::new();

        assert!(matches!(
            catalog.instantiate("frozen", &empty, &clock),
            Err(FlintError::BuffNotFound(_))
        ));
        assert!(matches!(
            catalog.instantiate("burning", &empty, &clock),
            Err(FlintError::UnknownEffect(_))
        ));
    }
}
