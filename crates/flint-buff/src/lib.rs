//! Flint Buff - status effect engine
//!
//! Attaches timed, stacking, tag-queryable modifiers to arbitrary targets:
//! - `ExecutionMode` — cadence strategies (`Continuity`, `Periodic`, `Limited`)
//! - `BuffEffect` / `BuffEffectExecuter` — opaque payloads bundled with a cadence
//! - `Buff` — pause/time-scale aware timer that drives its executers
//! - `BuffSystem` — per-target ordered collection with tag queries
//! - `BuffCatalog` — TOML-authored buff templates
//! - `BuffRuntime` — `RuntimeSystem` managing one `BuffSystem` per entity

pub mod buff;
pub mod catalog;
pub mod definition;
pub mod effect;
pub mod executer;
pub mod mode;
pub mod runtime;
pub mod signal;
pub mod system;
pub mod tags;

pub use buff::Buff;
pub use catalog::{BuffCatalog, EffectRegistry};
pub use definition::{BuffDefinition, ExecuterDefinition, ModeDefinition};
pub use effect::{BuffEffect, FnEffect};
pub use executer::BuffEffectExecuter;
pub use mode::{Continuity, ExecutionMode, Limited, Periodic};
pub use runtime::BuffRuntime;
pub use signal::{Signal, SubscriptionId};
pub use system::BuffSystem;
pub use tags::{TagMatch, TagSet};
