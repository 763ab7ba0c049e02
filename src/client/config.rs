use bevy::prelude::*;

/// Client-side presentation settings
#[derive(Resource)]
pub struct ClientConfig {
    /// Colour of highlighted enemies under the cursor
    pub highlight_color: Color,
    /// Camera position relative to the player character
    pub camera_offset: Vec3,
    /// Whether an overlay widget is configured for the HUD
    pub overlay_enabled: bool,
    /// Width and height of a globe bar, in pixels
    pub globe_size: Vec2,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            highlight_color: Color::srgb(0.9, 0.1, 0.1),
            camera_offset: Vec3::new(0., 12., 9.),
            overlay_enabled: true,
            globe_size: Vec2::new(220., 22.),
        }
    }
}

/// Key bindings of the move action
#[derive(Resource)]
pub struct InputMapping {
    pub forward: KeyCode,
    pub back: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
}

impl Default for InputMapping {
    fn default() -> Self {
        Self {
            forward: KeyCode::KeyW,
            back: KeyCode::KeyS,
            left: KeyCode::KeyA,
            right: KeyCode::KeyD,
        }
    }
}
