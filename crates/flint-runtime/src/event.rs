//! Events emitted by runtime systems

use flint_core::{BuffId, EntityId};

/// Game events pushed onto the `EventBus` for other systems to consume
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A buff was added to an entity's buff system
    BuffAdded {
        entity: EntityId,
        buff: BuffId,
        name: String,
    },
    /// A buff left an entity's buff system (expired, flagged, or evicted)
    BuffRemoved {
        entity: EntityId,
        buff: BuffId,
        name: String,
    },
    /// All buffs were dropped from an entity at once
    BuffsCleared { entity: EntityId },
}

impl GameEvent {
    /// The entity this event concerns
    pub fn entity(&self) -> EntityId {
        match self {
            GameEvent::BuffAdded { entity, .. }
            | GameEvent::BuffRemoved { entity, .. }
            | GameEvent::BuffsCleared { entity } => *entity,
        }
    }
}
