pub mod ability_system;
pub mod attributes;
pub mod effect;

use bevy::prelude::*;

/// Anything that acts in the world: the player character and enemies
#[derive(Clone, Component, Copy, Default)]
pub struct Actor;

/// The locally controlled character
#[derive(Clone, Component, Copy, Default)]
pub struct PlayerCharacter;

/// Hostile character; owns its own ability system
#[derive(Clone, Component, Copy, Default)]
pub struct Enemy;

/// Weapon mesh carried by a character; never collides and never blocks traces
#[derive(Clone, Component, Copy, Default)]
pub struct Weapon;

/// Holds the player's ability system so it outlives any one pawn
#[derive(Clone, Component, Copy, Default)]
pub struct PlayerState;

#[derive(Clone, Component, Copy, Debug)]
pub struct PlayerController {
    pub player_state: Entity,
    pub pawn: Option<Entity>,
}

impl PlayerController {
    pub fn new(player_state: Entity) -> Self {
        Self { player_state, pawn: None }
    }
}

/// Points a pawn at the entity that owns its ability system
#[derive(Clone, Component, Copy, Debug, Deref)]
pub struct AbilitySystemLink(pub Entity);

/// Character movement tuning
/// - speed: units per second on the ground plane
/// - rotation_rate: max yaw change in degrees per second
/// - orient_rotation_to_movement: turn to face the direction of travel
/// - constrain_to_plane: keep the character at its spawn height
#[derive(Clone, Component, Copy, Debug)]
pub struct CharacterMovement {
    pub speed: f32,
    pub rotation_rate: f32,
    pub orient_rotation_to_movement: bool,
    pub constrain_to_plane: bool,
}

impl Default for CharacterMovement {
    fn default() -> Self {
        Self {
            speed: 6.,
            rotation_rate: 400.,
            orient_rotation_to_movement: true,
            constrain_to_plane: true,
        }
    }
}
