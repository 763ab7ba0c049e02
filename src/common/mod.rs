pub mod components;
pub mod delegate;
pub mod message;
pub mod replication;
pub mod systems;
pub mod trace;
