use bevy::prelude::*;

use crate::common::{
    components::{ability_system::AbilitySystem, *},
    message::{Event, *},
};

/// Entity holding the ability system that acts for `ent`: its link target, or itself
pub fn ability_system_owner(ent: Entity, link: Option<&AbilitySystemLink>) -> Entity {
    link.map_or(ent, |link| **link)
}

pub fn possess(
    mut commands: Commands,
    mut reader: EventReader<Try>,
    mut writer: EventWriter<Do>,
    mut controllers: Query<&mut PlayerController>,
    mut abilities: Query<&mut AbilitySystem, With<PlayerState>>,
    pawns: Query<(), With<PlayerCharacter>>,
) {
    for &message in reader.read() {
        let Try { event: Event::Possess { controller, pawn } } = message else { continue };
        let Ok(mut player_controller) = controllers.get_mut(controller) else {
            warn!("possess: {controller} is not a player controller");
            continue;
        };
        if !pawns.contains(pawn) {
            warn!("possess: {pawn} is not a player character");
            continue;
        }
        let player_state = player_controller.player_state;
        let Ok(mut asc) = abilities.get_mut(player_state) else {
            warn!("possess: player state {player_state} has no ability system");
            continue;
        };

        player_controller.pawn = Some(pawn);
        asc.init_ability_actor_info(player_state, pawn);
        commands.entity(pawn).insert(AbilitySystemLink(player_state));
        info!("{controller} possessed {pawn} (player state {player_state})");

        writer.write(Do { event: Event::InitOverlay { controller, player_state } });
    }
}

pub fn init_enemies(
    mut query: Query<(Entity, &mut AbilitySystem), Added<Enemy>>,
) {
    for (ent, mut asc) in &mut query {
        asc.init_ability_actor_info(ent, ent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let mut app = App::new();
        app.add_event::<Do>();
        app.add_event::<Try>();
        app.add_systems(Update, (possess, init_enemies));
        app
    }

    #[test]
    fn test_possess_links_pawn_to_player_state() {
        let mut app = app();
        let player_state = app.world_mut().spawn((PlayerState, AbilitySystem::default())).id();
        let controller = app.world_mut().spawn(PlayerController::new(player_state)).id();
        let pawn = app.world_mut().spawn((Actor, PlayerCharacter)).id();

        app.world_mut().send_event(Try { event: Event::Possess { controller, pawn } });
        app.update();

        let world = app.world();
        assert_eq!(world.get::<PlayerController>(controller).unwrap().pawn, Some(pawn));
        assert_eq!(**world.get::<AbilitySystemLink>(pawn).unwrap(), player_state);
        let asc = world.get::<AbilitySystem>(player_state).unwrap();
        assert_eq!(asc.owner(), Some(player_state));
        assert_eq!(asc.avatar(), Some(pawn));

        let events = world.resource::<Events<Do>>();
        let mut cursor = events.get_cursor();
        let init: Vec<_> = cursor
            .read(events)
            .filter_map(|Do { event }| match *event {
                Event::InitOverlay { controller, player_state } => Some((controller, player_state)),
                _ => None,
            })
            .collect();
        assert_eq!(init, vec![(controller, player_state)]);
    }

    #[test]
    fn test_possess_ignores_unknown_controller() {
        let mut app = app();
        let pawn = app.world_mut().spawn((Actor, PlayerCharacter)).id();
        let stranger = app.world_mut().spawn_empty().id();

        app.world_mut().send_event(Try { event: Event::Possess { controller: stranger, pawn } });
        app.update();

        assert!(app.world().get::<AbilitySystemLink>(pawn).is_none());
        assert!(app.world().resource::<Events<Do>>().is_empty());
    }

    #[test]
    fn test_enemy_owns_its_own_ability_system() {
        let mut app = app();
        let enemy = app.world_mut().spawn((Actor, Enemy, AbilitySystem::default())).id();

        app.update();

        let asc = app.world().get::<AbilitySystem>(enemy).unwrap();
        assert_eq!(asc.owner(), Some(enemy));
        assert_eq!(asc.avatar(), Some(enemy));
    }

    #[test]
    fn test_ability_system_owner_follows_link() {
        let pawn = Entity::from_raw(1);
        let state = Entity::from_raw(2);
        assert_eq!(ability_system_owner(pawn, None), pawn);
        assert_eq!(ability_system_owner(pawn, Some(&AbilitySystemLink(state))), state);
    }
}
