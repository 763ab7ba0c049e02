use bevy::prelude::*;
use std::sync::PoisonError;

use crate::{
    client::{components::*, config::ClientConfig, widget_controller::*},
    common::{
        components::{ability_system::AbilitySystem, attributes::Attribute, *},
        message::{Event, *},
    },
};

/// Wire a globe's readout to the controller channels of its two attributes
fn subscribe(controller: &OverlayWidgetController, globe: &Globe) {
    let readout = globe.readout.clone();
    controller.channel(globe.value).add(move |&value| {
        let mut readout = readout.lock().unwrap_or_else(PoisonError::into_inner);
        readout.value = value;
        readout.updates += 1;
    });
    let readout = globe.readout.clone();
    controller.channel(globe.max).add(move |&max| {
        let mut readout = readout.lock().unwrap_or_else(PoisonError::into_inner);
        readout.max = max;
        readout.updates += 1;
    });
}

fn spawn_globe(parent: &mut ChildSpawnerCommands, globe: Globe, size: Vec2, color: Color) {
    let mut bar = parent.spawn((
        Node {
            width: Val::Px(size.x),
            height: Val::Px(size.y),
            border: UiRect::all(Val::Px(2.)),
            ..default()
        },
        BorderColor(Color::srgb(0.3, 0.3, 0.3)),
        BackgroundColor(Color::srgb(0.1, 0.1, 0.1)),
        globe,
    ));
    let id = bar.id();
    bar.with_children(|bar| {
        bar.spawn((
            Node {
                width: Val::Percent(100.),
                height: Val::Percent(100.),
                ..default()
            },
            BackgroundColor(color),
            GlobeFill(id),
        ));
        bar.spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(6.),
                ..default()
            },
            Text::default(),
            TextFont { font_size: size.y * 0.6, ..default() },
            TextColor(Color::WHITE),
            GlobeLabel(id),
        ));
    });
}

/// Build the overlay for a possessing player controller
pub fn init_overlay(
    mut commands: Commands,
    mut reader: EventReader<Do>,
    config: Res<ClientConfig>,
    huds: Query<&AuraHud>,
    abilities: Query<&AbilitySystem>,
) {
    let mut initialised = Vec::new();
    for &message in reader.read() {
        let Do { event: Event::InitOverlay { controller, player_state } } = message else { continue };

        if initialised.contains(&controller) || huds.iter().any(|hud| hud.player_controller == controller) {
            warn!("overlay for {controller} is already initialised");
            continue;
        }
        if !config.overlay_enabled {
            info!("no overlay widget configured; skipping overlay for {controller}");
            continue;
        }
        let Ok(asc) = abilities.get(player_state) else {
            panic!("overlay for {controller} needs the ability system of player state {player_state}");
        };

        let params = WidgetControllerParams::new(controller, player_state, player_state);
        let mut overlay = OverlayWidgetController::new(params);
        let health = Globe::new(Attribute::Health, Attribute::MaxHealth);
        let mana = Globe::new(Attribute::Mana, Attribute::MaxMana);
        subscribe(&overlay, &health);
        subscribe(&overlay, &mana);

        overlay.broadcast_initial_values(asc);
        overlay.bind_callbacks_to_dependencies(asc);

        let size = config.globe_size;
        commands.spawn((
            AuraHud { player_controller: controller },
            overlay,
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(20.),
                left: Val::Px(20.),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(5.),
                ..default()
            },
        ))
        .with_children(|parent| {
            spawn_globe(parent, health, size, Color::srgb(0.8, 0.2, 0.2));
            spawn_globe(parent, mana, size, Color::srgb(0.2, 0.5, 0.9));
        });

        initialised.push(controller);
        info!("overlay initialised for {controller} (player state {player_state})");
    }
}

/// Tear down overlays whose player controller is gone
pub fn teardown(
    mut commands: Commands,
    mut huds: Query<(Entity, &AuraHud, &mut OverlayWidgetController)>,
    controllers: Query<(), With<PlayerController>>,
    abilities: Query<&AbilitySystem>,
) {
    for (ent, hud, mut overlay) in &mut huds {
        if controllers.contains(hud.player_controller) { continue; }
        if let Ok(asc) = abilities.get(overlay.params().ability_system) {
            overlay.unbind_callbacks(asc);
        }
        debug!("tearing down overlay of {}", hud.player_controller);
        commands.entity(ent).despawn();
    }
}

/// Reflect globe readouts into bar widths and labels
pub fn update_globes(
    globes: Query<&Globe>,
    mut fills: Query<(&GlobeFill, &mut Node)>,
    mut labels: Query<(&GlobeLabel, &mut Text)>,
) {
    for (fill, mut node) in &mut fills {
        let Ok(globe) = globes.get(**fill) else { continue };
        let width = Val::Percent(globe.read().percent());
        if node.width != width { node.width = width; }
    }
    for (label, mut text) in &mut labels {
        let Ok(globe) = globes.get(**label) else { continue };
        let readout = globe.read();
        let value = format!("{:.0} / {:.0}", readout.value, readout.max);
        if text.0 != value { text.0 = value; }
    }
}
