use bevy::prelude::*;

use crate::common::{
    components::ability_system::AbilitySystem,
    message::{Component, Event, *},
    replication,
};

/// Drain dirty attributes of every ability system into Incremental updates.
/// The encoded size is what a transport would put on the wire for the update.
pub fn send(
    mut writer: EventWriter<Do>,
    mut query: Query<(Entity, &mut AbilitySystem)>,
) {
    for (ent, mut asc) in &mut query {
        if !asc.is_dirty() { continue; }
        let update = replication::collect(&mut asc, true);
        if update.is_empty() { continue; }
        match replication::encode(&update) {
            Ok(bytes) => trace!("replicate {ent}: {} attribute(s) in {} bytes", update.deltas.len(), bytes.len()),
            Err(err) => {
                warn!("failed to encode attribute update for {ent}: {err}");
                continue;
            }
        }
        writer.write(Do { event: Event::Incremental { ent, component: Component::Attributes(update) } });
    }
}
