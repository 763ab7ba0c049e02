use bevy::prelude::*;
use std::collections::HashSet;

use crate::common::{
    components::{ability_system::AbilitySystem, effect::*, *},
    message::{Event, *},
    systems::ability_system::ability_system_owner,
};

/// Begin-overlap detection between effect actor spheres and actors.
/// Each entry into a sphere writes one Overlap; leaving (or despawning) ends it.
pub fn detect_overlap(
    mut writer: EventWriter<Try>,
    mut effects: Query<(Entity, &Transform, &mut EffectActor)>,
    actors: Query<(Entity, &Transform), With<Actor>>,
) {
    for (effect, e_transform, mut effect_actor) in &mut effects {
        let radius = effect_actor.radius;
        for (other, o_transform) in &actors {
            if e_transform.translation.distance(o_transform.translation) <= radius {
                if effect_actor.overlapping.insert(other) {
                    writer.write(Try { event: Event::Overlap { effect, other } });
                }
            } else if effect_actor.overlapping.contains(&other) {
                effect_actor.overlapping.remove(&other);
            }
        }
        if effect_actor.overlapping.iter().any(|&ent| !actors.contains(ent)) {
            effect_actor.overlapping.retain(|&ent| actors.contains(ent));
        }
    }
}

/// Apply the effect to the overlapping actor's ability system and consume the effect actor.
/// Actors without an ability system are ignored and the effect actor stays.
pub fn on_overlap(
    mut reader: EventReader<Try>,
    mut writer: EventWriter<Do>,
    effects: Query<&EffectActor>,
    links: Query<&AbilitySystemLink>,
    mut abilities: Query<&mut AbilitySystem>,
) {
    let mut consumed = HashSet::new();
    for &message in reader.read() {
        let Try { event: Event::Overlap { effect, other } } = message else { continue };
        if consumed.contains(&effect) { continue; }
        // effect actor may have been despawned while the overlap was in flight
        let Ok(effect_actor) = effects.get(effect) else { continue };
        let owner = ability_system_owner(other, links.get(other).ok());
        let Ok(mut asc) = abilities.get_mut(owner) else { continue };

        let InstantEffect { attribute, op, magnitude } = effect_actor.effect;
        let value = asc.apply_modifier(attribute, op, magnitude);
        debug!("{effect} applied {op:?} {magnitude} {} to {other}: now {value}", attribute.name());

        consumed.insert(effect);
        writer.write(Do { event: Event::Despawn { ent: effect } });
    }
}
