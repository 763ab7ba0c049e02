pub mod camera;
pub mod cursor_trace;
pub mod highlight;
pub mod hud;
pub mod input;
pub mod world;
