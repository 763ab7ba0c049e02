pub mod ability_system;
pub mod actor;
pub mod effect;
pub mod movement;
pub mod replication;
