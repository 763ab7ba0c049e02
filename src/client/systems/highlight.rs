use bevy::prelude::*;

use crate::client::{components::*, config::ClientConfig};

/// Highlight notifications from the cursor trace
#[derive(Clone, Copy, Debug, Eq, Event, PartialEq)]
pub enum Highlight {
    Enter(Entity),
    Exit(Entity),
}

#[derive(Clone, Debug, Deref, Resource)]
pub struct HighlightMaterial(pub Handle<StandardMaterial>);

pub fn setup(
    mut commands: Commands,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<ClientConfig>,
) {
    let handle = materials.add(StandardMaterial {
        base_color: config.highlight_color,
        emissive: config.highlight_color.to_linear() * 0.4,
        ..default()
    });
    commands.insert_resource(HighlightMaterial(handle));
}

/// Recolour highlighted targets and their parts; restore base materials on exit
pub fn apply(
    mut commands: Commands,
    mut reader: EventReader<Highlight>,
    highlight: Res<HighlightMaterial>,
    targets: Query<&Highlightable>,
    mut meshes: Query<(&mut MeshMaterial3d<StandardMaterial>, Option<&BaseMaterial>)>,
) {
    for &message in reader.read() {
        let (ent, on) = match message {
            Highlight::Enter(ent) => (ent, true),
            Highlight::Exit(ent) => (ent, false),
        };
        // target may have despawned since the trace
        let Ok(highlightable) = targets.get(ent) else { continue };

        for part in std::iter::once(ent).chain(highlightable.parts.iter().copied()) {
            let Ok((mut material, base)) = meshes.get_mut(part) else { continue };
            match (on, base) {
                (true, _) => material.0 = highlight.0.clone(),
                (false, Some(base)) => material.0 = base.0.clone(),
                (false, None) => {}
            }
        }

        if on {
            commands.entity(ent).insert(Highlighted);
        } else {
            commands.entity(ent).remove::<Highlighted>();
        }
    }
}
