mod common;
mod client;

use bevy::{
    log::LogPlugin,
    prelude::*,
};

use common::{
    message::*,
    systems::{ability_system, actor, effect, movement, replication},
};
use client::{
    config::*,
    systems::{camera, cursor_trace, highlight, hud, input, world},
};

fn main() {
    let mut app = App::new();
    app.add_plugins(DefaultPlugins
        .set(LogPlugin {
            level: bevy::log::Level::TRACE,
            filter:  "wgpu=error,naga=warn,polling=warn,winit=warn,offset_allocator=warn,gilrs=warn,".to_owned()
                    +"bevy=warn,cosmic_text=warn,client=debug,"
                    ,
            ..default()
        })
        .set(WindowPlugin {
            primary_window: Some(Window {
                title: "Aura".into(),
                ..default()
            }),
            ..default()
        }),
    );

    app.add_event::<Do>();
    app.add_event::<Try>();
    app.add_event::<highlight::Highlight>();

    app.init_resource::<ClientConfig>();
    app.init_resource::<InputMapping>();
    app.init_resource::<cursor_trace::CursorTrace>();

    app.add_systems(Startup, (
        camera::setup,
        highlight::setup,
        input::setup,
        world::setup,
    ));

    app.add_systems(PreUpdate, (
        input::update,
    ));

    app.add_systems(Update, (
        ability_system::possess,
        ability_system::init_enemies,
        movement::update,
        camera::update.after(movement::update),
        (effect::detect_overlap, effect::on_overlap).chain().after(movement::update),
        cursor_trace::update.after(camera::update),
        highlight::apply.after(cursor_trace::update),
        hud::init_overlay.after(ability_system::possess),
        hud::teardown,
        hud::update_globes.after(hud::init_overlay).after(effect::on_overlap),
    ));

    app.add_systems(PostUpdate, (
        replication::send,
        actor::do_despawn,
    ));

    app.run();
}
