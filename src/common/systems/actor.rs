use bevy::prelude::*;

use crate::common::message::{Event, *};

pub fn do_despawn(
    mut commands: Commands,
    mut reader: EventReader<Do>,
    query: Query<Entity>,
) {
    for &message in reader.read() {
        if let Do { event: Event::Despawn { ent } } = message {
            // two despawns for one entity can land in the same frame
            if query.contains(ent) {
                trace!("despawn {ent}");
                commands.entity(ent).despawn();
            }
        }
    }
}
