use bevy::prelude::*;
use std::f32::consts::{PI, TAU};

use crate::common::components::*;

/// World-space direction the pawn was asked to move this frame; length at most 1
#[derive(Clone, Component, Copy, Debug, Default, Deref, DerefMut)]
pub struct MoveIntent(pub Vec3);

/// Yaw that points Bevy's forward (-Z) along `direction`
pub fn yaw_of(direction: Vec3) -> f32 {
    (-direction.x).atan2(-direction.z)
}

/// Turn from `current` toward `target` along the shortest arc, at most `max_step` radians
pub fn step_yaw(current: f32, target: f32, max_step: f32) -> f32 {
    let delta = (target - current + PI).rem_euclid(TAU) - PI;
    if delta.abs() <= max_step { target } else { current + max_step * delta.signum() }
}

pub fn apply(transform: &mut Transform, movement: &CharacterMovement, direction: Vec3, dt: f32) {
    let mut velocity = direction.clamp_length_max(1.) * movement.speed;
    if movement.constrain_to_plane { velocity.y = 0.; }
    transform.translation += velocity * dt;

    if movement.orient_rotation_to_movement && velocity.length_squared() > f32::EPSILON {
        let (current, _, _) = transform.rotation.to_euler(EulerRot::YXZ);
        let yaw = step_yaw(current, yaw_of(velocity), movement.rotation_rate.to_radians() * dt);
        transform.rotation = Quat::from_rotation_y(yaw);
    }
}

pub fn update(
    mut query: Query<(&mut Transform, &CharacterMovement, &MoveIntent)>,
    time: Res<Time>,
) {
    let dt = time.delta_secs();
    for (mut transform, movement, intent) in &mut query {
        if intent.length_squared() == 0. { continue; }
        apply(&mut transform, movement, **intent, dt);
    }
}
