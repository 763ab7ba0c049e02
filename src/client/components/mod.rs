use bevy::prelude::*;
use std::sync::{Arc, Mutex, PoisonError};

use crate::common::components::attributes::Attribute;

/// Capability: the cursor trace may highlight this entity.
/// Highlighting recolours the entity's own mesh plus every part listed here.
#[derive(Clone, Component, Debug, Default)]
pub struct Highlightable {
    pub parts: Vec<Entity>,
}

/// Material a mesh returns to when its highlight ends
#[derive(Clone, Component, Debug, Deref)]
pub struct BaseMaterial(pub Handle<StandardMaterial>);

/// Marker for entities currently drawn highlighted
#[derive(Clone, Component, Copy, Debug, Default)]
pub struct Highlighted;

/// Root of the heads-up display
#[derive(Clone, Component, Copy, Debug)]
pub struct AuraHud {
    pub player_controller: Entity,
}

/// Latest values a globe has been told about
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GlobeReadout {
    pub value: f32,
    pub max: f32,
    pub updates: u32,
}

impl GlobeReadout {
    pub fn percent(&self) -> f32 {
        if self.max > 0. { (self.value / self.max * 100.).clamp(0., 100.) } else { 0. }
    }
}

/// A resource globe on the overlay: a current attribute and its maximum
#[derive(Clone, Component, Debug)]
pub struct Globe {
    pub value: Attribute,
    pub max: Attribute,
    pub readout: Arc<Mutex<GlobeReadout>>,
}

impl Globe {
    pub fn new(value: Attribute, max: Attribute) -> Self {
        Self { value, max, readout: default() }
    }

    pub fn read(&self) -> GlobeReadout {
        *self.readout.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Fill bar of the globe on the given entity
#[derive(Clone, Component, Copy, Debug, Deref)]
pub struct GlobeFill(pub Entity);

/// "value / max" label of the globe on the given entity
#[derive(Clone, Component, Copy, Debug, Deref)]
pub struct GlobeLabel(pub Entity);
