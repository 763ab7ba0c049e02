use bevy::{
    prelude::*,
    window::{CursorGrabMode, PrimaryWindow},
};

use crate::{
    client::config::InputMapping,
    common::{
        components::*,
        systems::movement::{yaw_of, MoveIntent},
    },
};

/// Top-down control: the cursor stays visible and free
pub fn setup(mut windows: Query<&mut Window, With<PrimaryWindow>>) {
    let Ok(mut window) = windows.single_mut() else { return };
    window.cursor_options.visible = true;
    window.cursor_options.grab_mode = CursorGrabMode::None;
}

/// Move action as a 2D axis: x is right, y is forward
pub fn move_axis(keyboard: &ButtonInput<KeyCode>, mapping: &InputMapping) -> Vec2 {
    let mut axis = Vec2::ZERO;
    if keyboard.pressed(mapping.forward) { axis.y += 1.; }
    if keyboard.pressed(mapping.back) { axis.y -= 1.; }
    if keyboard.pressed(mapping.right) { axis.x += 1.; }
    if keyboard.pressed(mapping.left) { axis.x -= 1.; }
    axis
}

/// Rotate the axis into the world by the camera yaw only, ignoring pitch
pub fn world_direction(axis: Vec2, camera_yaw: f32) -> Vec3 {
    let rotation = Quat::from_rotation_y(camera_yaw);
    let forward = rotation * Vec3::NEG_Z;
    let right = rotation * Vec3::X;
    (forward * axis.y + right * axis.x).normalize_or_zero()
}

pub fn update(
    keyboard: Res<ButtonInput<KeyCode>>,
    mapping: Res<InputMapping>,
    cameras: Query<&Transform, With<Camera3d>>,
    controllers: Query<&PlayerController>,
    mut intents: Query<&mut MoveIntent>,
) {
    let axis = move_axis(&keyboard, &mapping);
    let yaw = cameras.single().map_or(0., |transform| yaw_of(transform.forward().as_vec3().with_y(0.)));
    let direction = world_direction(axis, yaw);

    for controller in &controllers {
        let Some(pawn) = controller.pawn else { continue };
        let Ok(mut intent) = intents.get_mut(pawn) else { continue };
        if **intent != direction { **intent = direction; }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_move_axis_opposites_cancel() {
        let mapping = InputMapping::default();
        let mut keyboard = ButtonInput::<KeyCode>::default();
        keyboard.press(KeyCode::KeyW);
        keyboard.press(KeyCode::KeyS);
        keyboard.press(KeyCode::KeyD);
        assert_eq!(move_axis(&keyboard, &mapping), Vec2::new(1., 0.));
    }

    #[test]
    fn test_world_direction_follows_camera_yaw() {
        let forward = world_direction(Vec2::Y, 0.);
        assert!((forward - Vec3::NEG_Z).length() < 1e-5);

        // camera turned to face -X: forward now runs along -X
        let turned = world_direction(Vec2::Y, FRAC_PI_2);
        assert!((turned - Vec3::NEG_X).length() < 1e-5);
    }

    #[test]
    fn test_diagonal_is_normalized() {
        let direction = world_direction(Vec2::new(1., 1.), 0.);
        assert!((direction.length() - 1.).abs() < 1e-5);
    }

    #[test]
    fn test_update_writes_intent_of_possessed_pawn() {
        let mut app = App::new();
        app.init_resource::<ButtonInput<KeyCode>>();
        app.init_resource::<InputMapping>();
        app.add_systems(Update, update);

        let pawn = app.world_mut().spawn((PlayerCharacter, MoveIntent::default())).id();
        let idle = app.world_mut().spawn((PlayerCharacter, MoveIntent::default())).id();
        let player_state = app.world_mut().spawn(PlayerState).id();
        app.world_mut().spawn(PlayerController { player_state, pawn: Some(pawn) });
        app.world_mut().resource_mut::<ButtonInput<KeyCode>>().press(KeyCode::KeyW);

        app.update();

        let intent = app.world().get::<MoveIntent>(pawn).unwrap();
        assert!((**intent - Vec3::NEG_Z).length() < 1e-5);
        assert_eq!(**app.world().get::<MoveIntent>(idle).unwrap(), Vec3::ZERO);
    }
}
