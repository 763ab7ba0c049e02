//! Widget controllers
//!
//! A widget controller sits between an ability system and the widgets that display it.
//! Widgets subscribe to the controller's channels; the controller fills those channels
//! from the ability system, once on demand and then on every attribute change.

use bevy::prelude::*;

use crate::common::{
    components::{ability_system::*, attributes::Attribute},
    delegate::{DelegateHandle, MulticastDelegate},
};

/// Everything a widget controller reads from, supplied when it is built
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WidgetControllerParams {
    pub player_controller: Entity,
    pub player_state: Entity,
    /// Entity carrying the AbilitySystem component
    pub ability_system: Entity,
}

impl WidgetControllerParams {
    pub fn new(player_controller: Entity, player_state: Entity, ability_system: Entity) -> Self {
        Self { player_controller, player_state, ability_system }
    }
}

pub trait WidgetController {
    fn params(&self) -> &WidgetControllerParams;

    /// Push current values to every subscriber
    fn broadcast_initial_values(&self, source: &dyn AttributeSource);

    /// Subscribe to the source's change notifications. Call once per source.
    fn bind_callbacks_to_dependencies(&mut self, source: &dyn AttributeSource);
}

/// Relays health and mana to the overlay widget
#[derive(Component, Debug)]
pub struct OverlayWidgetController {
    params: WidgetControllerParams,
    pub on_health_changed: MulticastDelegate<f32>,
    pub on_max_health_changed: MulticastDelegate<f32>,
    pub on_mana_changed: MulticastDelegate<f32>,
    pub on_max_mana_changed: MulticastDelegate<f32>,
    bindings: Vec<(Attribute, DelegateHandle)>,
}

impl OverlayWidgetController {
    pub fn new(params: WidgetControllerParams) -> Self {
        Self {
            params,
            on_health_changed: default(),
            on_max_health_changed: default(),
            on_mana_changed: default(),
            on_max_mana_changed: default(),
            bindings: Vec::new(),
        }
    }

    pub fn channel(&self, attribute: Attribute) -> &MulticastDelegate<f32> {
        match attribute {
            Attribute::Health => &self.on_health_changed,
            Attribute::MaxHealth => &self.on_max_health_changed,
            Attribute::Mana => &self.on_mana_changed,
            Attribute::MaxMana => &self.on_max_mana_changed,
        }
    }

    pub fn is_bound(&self) -> bool {
        !self.bindings.is_empty()
    }

    /// Remove the handlers registered by bind_callbacks_to_dependencies
    pub fn unbind_callbacks(&mut self, source: &dyn AttributeSource) {
        for (attribute, handle) in self.bindings.drain(..) {
            source.attribute_value_change_delegate(attribute).remove(handle);
        }
    }
}

impl WidgetController for OverlayWidgetController {
    fn params(&self) -> &WidgetControllerParams {
        &self.params
    }

    fn broadcast_initial_values(&self, source: &dyn AttributeSource) {
        for attribute in Attribute::ALL {
            self.channel(attribute).broadcast(&source.attribute_value(attribute));
        }
    }

    fn bind_callbacks_to_dependencies(&mut self, source: &dyn AttributeSource) {
        if self.is_bound() {
            warn!("overlay widget controller for {} is already bound", self.params.ability_system);
            return;
        }
        for attribute in Attribute::ALL {
            let channel = self.channel(attribute).clone();
            // republish unconditionally; subscribers tolerate repeats
            let handle = source
                .attribute_value_change_delegate(attribute)
                .add(move |change: &AttributeChange| channel.broadcast(&change.new_value));
            self.bindings.push((attribute, handle));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    type Published = Arc<Mutex<Vec<(Attribute, f32)>>>;

    fn controller() -> OverlayWidgetController {
        let e = Entity::from_raw(1);
        OverlayWidgetController::new(WidgetControllerParams::new(e, e, e))
    }

    fn subscribe_all(controller: &OverlayWidgetController) -> Published {
        let published: Published = Arc::new(Mutex::new(Vec::new()));
        for attribute in Attribute::ALL {
            let sink = published.clone();
            controller.channel(attribute).add(move |v| sink.lock().unwrap().push((attribute, *v)));
        }
        published
    }

    fn holder(health: f32, max_health: f32, mana: f32, max_mana: f32) -> AbilitySystem {
        let mut asc = AbilitySystem::default();
        asc.set_numeric_attribute_base(Attribute::MaxHealth, max_health);
        asc.set_numeric_attribute_base(Attribute::Health, health);
        asc.set_numeric_attribute_base(Attribute::MaxMana, max_mana);
        asc.set_numeric_attribute_base(Attribute::Mana, mana);
        asc
    }

    #[test]
    fn test_broadcast_initial_values_in_fixed_order() {
        let controller = controller();
        let published = subscribe_all(&controller);
        let asc = holder(50., 100., 30., 50.);

        controller.broadcast_initial_values(&asc);

        assert_eq!(*published.lock().unwrap(), vec![
            (Attribute::Health, 50.),
            (Attribute::MaxHealth, 100.),
            (Attribute::Mana, 30.),
            (Attribute::MaxMana, 50.),
        ]);
    }

    #[test]
    fn test_broadcast_initial_values_twice_republishes_snapshot() {
        let controller = controller();
        let published = subscribe_all(&controller);
        let asc = holder(50., 100., 30., 50.);

        controller.broadcast_initial_values(&asc);
        controller.broadcast_initial_values(&asc);

        let published = published.lock().unwrap();
        assert_eq!(published.len(), 8);
        assert_eq!(published[..4], published[4..]);
    }

    #[test]
    fn test_mutation_publishes_only_on_its_channel() {
        let mut controller = controller();
        let published = subscribe_all(&controller);
        let mut asc = holder(50., 100., 30., 50.);

        controller.bind_callbacks_to_dependencies(&asc);
        asc.set_numeric_attribute_base(Attribute::Health, 35.);

        assert_eq!(*published.lock().unwrap(), vec![(Attribute::Health, 35.)]);
    }

    #[test]
    fn test_mutation_to_same_value_still_publishes() {
        let mut controller = controller();
        let published = subscribe_all(&controller);
        let mut asc = AbilitySystem::default();

        controller.bind_callbacks_to_dependencies(&asc);
        asc.set_numeric_attribute_base(Attribute::Mana, 50.);

        assert_eq!(*published.lock().unwrap(), vec![(Attribute::Mana, 50.)]);
    }

    #[test]
    fn test_every_subscriber_receives_each_publish() {
        let mut controller = controller();
        let first = subscribe_all(&controller);
        let second = subscribe_all(&controller);
        let mut asc = AbilitySystem::default();

        controller.bind_callbacks_to_dependencies(&asc);
        asc.set_numeric_attribute_base(Attribute::MaxMana, 80.);

        assert_eq!(*first.lock().unwrap(), vec![(Attribute::MaxMana, 80.)]);
        assert_eq!(*second.lock().unwrap(), vec![(Attribute::MaxMana, 80.)]);
    }

    #[test]
    fn test_second_bind_does_not_double_register() {
        let mut controller = controller();
        let published = subscribe_all(&controller);
        let mut asc = AbilitySystem::default();

        controller.bind_callbacks_to_dependencies(&asc);
        controller.bind_callbacks_to_dependencies(&asc);
        asc.set_numeric_attribute_base(Attribute::Health, 10.);

        assert_eq!(*published.lock().unwrap(), vec![(Attribute::Health, 10.)]);
        for attribute in Attribute::ALL {
            assert_eq!(asc.attribute_value_change_delegate(attribute).len(), 1);
        }
    }

    #[test]
    fn test_unbind_stops_publishing() {
        let mut controller = controller();
        let published = subscribe_all(&controller);
        let mut asc = AbilitySystem::default();

        controller.bind_callbacks_to_dependencies(&asc);
        controller.unbind_callbacks(&asc);
        asc.set_numeric_attribute_base(Attribute::Health, 10.);

        assert!(published.lock().unwrap().is_empty());
        assert!(!controller.is_bound());
        assert!(asc.attribute_value_change_delegate(Attribute::Health).is_empty());
    }
}
