//! Serializable buff templates

use flint_core::{FlintError, Result};
use serde::{Deserialize, Serialize};

/// A buff template as authored in a `.buffs.toml` file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BuffDefinition {
    /// Unique name within a catalog
    pub name: String,
    /// Lifetime in seconds
    pub duration: f64,
    /// Sort key inside a buff system (lower runs first)
    #[serde(default)]
    pub priority: i32,
    /// Classification labels for queries and bulk removal
    #[serde(default)]
    pub tags: Vec<String>,
    /// Initial time scale
    #[serde(default = "default_time_scale")]
    pub time_scale: f64,
    /// Executers, in firing order
    #[serde(default, rename = "executer")]
    pub executers: Vec<ExecuterDefinition>,
}

fn default_time_scale() -> f64 {
    1.0
}

/// One cadence and the named effects it fires
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExecuterDefinition {
    pub mode: ModeDefinition,
    /// Effect names, resolved through an `EffectRegistry`
    pub effects: Vec<String>,
}

/// Cadence selector
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModeDefinition {
    /// Fire once
    Continuity,
    /// Fire at most once per `interval` seconds of game time
    Periodic { interval: f64 },
    /// Fire on the first `count` ticks
    Limited { count: u32 },
}

impl BuffDefinition {
    /// Check the template for values the engine would accept but that are
    /// almost certainly authoring mistakes.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(FlintError::BuffConfigError("buff has an empty name".into()));
        }
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(FlintError::ValueOutOfRange {
                field: format!("{}.duration", self.name),
                min: 0.0,
                max: f64::MAX,
                value: self.duration,
            });
        }
        if !self.time_scale.is_finite() || self.time_scale < 0.0 {
            return Err(FlintError::ValueOutOfRange {
                field: format!("{}.time_scale", self.name),
                min: 0.0,
                max: f64::MAX,
                value: self.time_scale,
            });
        }

        for (i, executer) in self.executers.iter().enumerate() {
            if executer.effects.is_empty() {
                return Err(FlintError::BuffConfigError(format!(
                    "Buff '{}' executer {} has no effects",
                    self.name, i
                )));
            }
            match executer.mode {
                ModeDefinition::Periodic { interval } if !(interval > 0.0) => {
                    return Err(FlintError::BuffConfigError(format!(
                        "Buff '{}' executer {} has non-positive interval: {}",
                        self.name, i, interval
                    )));
                }
                ModeDefinition::Limited { count: 0 } => {
                    return Err(FlintError::BuffConfigError(format!(
                        "Buff '{}' executer {} has a zero fire count",
                        self.name, i
                    )));
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// Every effect name referenced by this template, in order
    pub fn effect_names(&self) -> impl Iterator<Item = &str> {
        self.executers
            .iter()
            .flat_map(|e| e.effects.iter().map(String::as_str))
    }
}
