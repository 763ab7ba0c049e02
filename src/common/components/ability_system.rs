use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use tinyvec::ArrayVec;

use crate::common::{
    components::attributes::*,
    delegate::MulticastDelegate,
    replication::RepNotify,
};

/// Payload of an attribute's change delegate
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttributeChange {
    pub attribute: Attribute,
    pub old_value: f32,
    pub new_value: f32,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ModifierOp {
    Add,
    Multiply,
    Override,
}

/// Read access to attribute values plus a subscription point for their changes
pub trait AttributeSource {
    fn attribute_value(&self, attribute: Attribute) -> f32;
    fn attribute_value_change_delegate(&self, attribute: Attribute) -> &MulticastDelegate<AttributeChange>;
}

/// Owns an actor's attributes and is the only mutation path for them
/// - owner: entity that holds this component (player state, or the enemy itself)
/// - avatar: entity acting in the world on its behalf
#[derive(Component, Debug, Default)]
pub struct AbilitySystem {
    attributes: AttributeSet,
    delegates: [MulticastDelegate<AttributeChange>; 4],
    dirty: [bool; 4],
    owner: Option<Entity>,
    avatar: Option<Entity>,
}

impl AbilitySystem {
    pub fn new(attributes: AttributeSet) -> Self {
        Self { attributes, ..default() }
    }

    pub fn init_ability_actor_info(&mut self, owner: Entity, avatar: Entity) {
        self.owner = Some(owner);
        self.avatar = Some(avatar);
    }

    pub fn owner(&self) -> Option<Entity> {
        self.owner
    }

    pub fn avatar(&self) -> Option<Entity> {
        self.avatar
    }

    pub fn attribute_set(&self) -> &AttributeSet {
        &self.attributes
    }

    /// Clamps, writes base and current, then notifies subscribers with (old, new).
    /// Lowering a maximum below its current value pulls the current value down through this same path.
    pub fn set_numeric_attribute_base(&mut self, attribute: Attribute, value: f32) -> f32 {
        let new_value = self.attributes.pre_attribute_change(attribute, value);
        let data = self.attributes.data_mut(attribute);
        let old_value = data.current;
        *data = AttributeData::new(new_value);
        self.dirty[attribute.index()] = true;
        self.notify(attribute, old_value, new_value);

        if let Some(bounded) = attribute.bounded() {
            if self.attributes.get(bounded) > new_value {
                self.set_numeric_attribute_base(bounded, new_value);
            }
        }
        new_value
    }

    pub fn apply_modifier(&mut self, attribute: Attribute, op: ModifierOp, magnitude: f32) -> f32 {
        let current = self.attributes.get(attribute);
        let value = match op {
            ModifierOp::Add => current + magnitude,
            ModifierOp::Multiply => current * magnitude,
            ModifierOp::Override => magnitude,
        };
        self.set_numeric_attribute_base(attribute, value)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.iter().any(|d| *d)
    }

    /// Drain attributes written since the last call, in fixed attribute order
    pub fn take_dirty(&mut self) -> ArrayVec<[Attribute; 4]> {
        let mut out = ArrayVec::new();
        for attribute in Attribute::ALL {
            if std::mem::take(&mut self.dirty[attribute.index()]) {
                out.push(attribute);
            }
        }
        out
    }

    /// Accept a replicated value; authority already clamped it, so it is written as-is
    pub fn on_rep_attribute(&mut self, attribute: Attribute, value: f32, notify: RepNotify) {
        let data = self.attributes.data_mut(attribute);
        let old_value = data.current;
        *data = AttributeData::new(value);
        if notify == RepNotify::Always || old_value != value {
            self.notify(attribute, old_value, value);
        }
    }

    fn notify(&self, attribute: Attribute, old_value: f32, new_value: f32) {
        self.delegates[attribute.index()].broadcast(&AttributeChange { attribute, old_value, new_value });
    }
}

impl AttributeSource for AbilitySystem {
    fn attribute_value(&self, attribute: Attribute) -> f32 {
        self.attributes.get(attribute)
    }

    fn attribute_value_change_delegate(&self, attribute: Attribute) -> &MulticastDelegate<AttributeChange> {
        &self.delegates[attribute.index()]
    }
}
