use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::common::replication::AttributeUpdate;

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub enum Event {
    /// Controller takes over a pawn
    Possess { controller: Entity, pawn: Entity },
    /// Player's ability system is ready; build the overlay for this controller
    InitOverlay { controller: Entity, player_state: Entity },
    /// Actor walked into an effect actor
    Overlap { effect: Entity, other: Entity },
    Despawn { ent: Entity },
    Incremental { ent: Entity, component: Component },
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub enum Component {
    Attributes(AttributeUpdate),
}

/// Something that has happened and every system should act on
#[derive(Clone, Copy, Debug, Deserialize, Event, Serialize)]
pub struct Do {
    pub event: Event
}

/// A request the authority still has to validate
#[derive(Clone, Copy, Debug, Deserialize, Event, Serialize)]
pub struct Try {
    pub event: Event
}
