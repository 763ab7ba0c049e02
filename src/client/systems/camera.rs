use bevy::prelude::*;

use crate::{client::config::ClientConfig, common::components::*};

pub fn setup(
    mut commands: Commands,
    config: Res<ClientConfig>,
) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(config.camera_offset).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// Keep the camera at a fixed offset from the player character, looking at it
pub fn update(
    config: Res<ClientConfig>,
    mut camera: Query<&mut Transform, With<Camera3d>>,
    pawn: Query<&Transform, (With<PlayerCharacter>, Without<Camera3d>)>,
) {
    let Ok(p_transform) = pawn.single() else { return };
    let Ok(mut c_transform) = camera.single_mut() else { return };
    let target = p_transform.translation;
    c_transform.translation = target + config.camera_offset;
    c_transform.look_at(target, Vec3::Y);
}
