pub mod components;
pub mod config;
pub mod systems;
pub mod widget_controller;
