use bevy::prelude::*;

use crate::{
    client::components::*,
    common::{
        components::{ability_system::AbilitySystem, effect::EffectActor, *},
        message::{Event, *},
        systems::movement::MoveIntent,
        trace::TraceCollider,
    },
};

const ENEMY_SPAWNS: [Vec3; 3] = [
    Vec3::new(-6., 1., -6.),
    Vec3::new(5., 1., -8.),
    Vec3::new(8., 1., 3.),
];
const POTION_SPAWNS: [Vec3; 2] = [
    Vec3::new(-3., 0.5, 4.),
    Vec3::new(4., 0.5, 5.),
];

pub fn setup(
    mut commands: Commands,
    mut writer: EventWriter<Try>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 200.,
        ..default()
    });
    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4., 10., 4.).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(60., 60.))),
        MeshMaterial3d(materials.add(Color::srgb(0.3, 0.35, 0.3))),
        Transform::default(),
        TraceCollider::ground(),
    ));

    let body = meshes.add(Capsule3d::new(0.5, 1.));
    let blade = meshes.add(Cuboid::new(0.1, 0.1, 1.2));
    let steel = materials.add(Color::srgb(0.7, 0.7, 0.75));

    // the player's ability system lives on the player state, not the pawn
    let player_state = commands.spawn((PlayerState, AbilitySystem::default())).id();
    let controller = commands.spawn(PlayerController::new(player_state)).id();
    let pawn = commands.spawn((
        Actor,
        PlayerCharacter,
        CharacterMovement::default(),
        MoveIntent::default(),
        Mesh3d(body.clone()),
        MeshMaterial3d(materials.add(Color::srgb(0.2, 0.4, 0.8))),
        Transform::from_xyz(0., 1., 0.),
    ))
    .with_children(|parent| {
        parent.spawn((
            Weapon,
            Mesh3d(blade.clone()),
            MeshMaterial3d(steel.clone()),
            Transform::from_xyz(0.5, 0., -0.4),
        ));
    })
    .id();

    let hide = materials.add(Color::srgb(0.45, 0.3, 0.2));
    for translation in ENEMY_SPAWNS {
        let weapon = commands.spawn((
            Weapon,
            Mesh3d(blade.clone()),
            MeshMaterial3d(steel.clone()),
            BaseMaterial(steel.clone()),
            Transform::from_xyz(0.5, 0., -0.4),
        )).id();
        commands.spawn((
            Actor,
            Enemy,
            AbilitySystem::default(),
            TraceCollider::sphere(1.),
            Highlightable { parts: vec![weapon] },
            Mesh3d(body.clone()),
            MeshMaterial3d(hide.clone()),
            BaseMaterial(hide.clone()),
            Transform::from_translation(translation),
        ))
        .add_child(weapon);
    }

    let potion = meshes.add(Sphere::new(0.3));
    let glass = materials.add(Color::srgb(0.9, 0.2, 0.3));
    for translation in POTION_SPAWNS {
        commands.spawn((
            EffectActor::default(),
            Mesh3d(potion.clone()),
            MeshMaterial3d(glass.clone()),
            Transform::from_translation(translation),
        ));
    }

    writer.write(Try { event: Event::Possess { controller, pawn } });
}
