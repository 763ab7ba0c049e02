use bevy::prelude::*;
use std::collections::HashSet;
use serde::{Deserialize, Serialize};

use crate::common::components::{ability_system::ModifierOp, attributes::Attribute};

/// A one-shot change applied to the overlapping actor's ability system
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct InstantEffect {
    pub attribute: Attribute,
    pub op: ModifierOp,
    pub magnitude: f32,
}

/// Pickup that applies its effect to the first actor with an ability system that walks into it,
/// then removes itself
#[derive(Clone, Component, Debug)]
pub struct EffectActor {
    pub radius: f32,
    pub effect: InstantEffect,
    /// Actors currently inside the sphere; begin-overlap fires once per entry
    pub overlapping: HashSet<Entity>,
}

impl Default for EffectActor {
    fn default() -> Self {
        Self {
            radius: 1.,
            effect: InstantEffect {
                attribute: Attribute::Health,
                op: ModifierOp::Add,
                magnitude: 25.,
            },
            overlapping: HashSet::new(),
        }
    }
}

impl EffectActor {
    pub fn new(effect: InstantEffect) -> Self {
        Self { effect, ..default() }
    }
}
