//! Cursor trace
//!
//! Once per frame the pointer ray is traced into the scene. The entity it hits (if it
//! can be highlighted) becomes `this`, the previous frame's becomes `last`, and the pair
//! decides which highlight notifications go out:
//!
//! | last  | this  |                | notifications         |
//! |-------|-------|----------------|-----------------------|
//! | none  | none  |                | -                     |
//! | none  | B     |                | enter B               |
//! | A     | none  |                | exit A                |
//! | A     | B     | A != B         | enter B, then exit A  |
//! | A     | A     |                | -                     |
//!
//! A trace that hits nothing at all leaves both untouched. Enter goes out before exit so
//! overlapping targets never show a frame with neither highlighted.

use bevy::{prelude::*, window::PrimaryWindow};

use crate::{
    client::{components::Highlightable, systems::highlight::Highlight},
    common::trace::*,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Transition<T> {
    /// Nothing under the cursor; state unchanged
    Miss,
    None,
    Enter(T),
    Exit(T),
    Swap { enter: T, exit: T },
    Hold(T),
}

pub trait CursorScene {
    type Target: Copy + PartialEq;

    /// Nearest blocking hit under the cursor
    fn trace_under_cursor(&mut self) -> Option<TraceHit>;

    /// View the hit through the highlight capability
    fn as_highlightable(&self, hit: &TraceHit) -> Option<Self::Target>;

    /// False once the target was despawned or lost its capability
    fn is_alive(&self, target: Self::Target) -> bool;
}

pub trait HighlightSink<T> {
    fn highlight(&mut self, target: T);
    fn unhighlight(&mut self, target: T);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HoverTracker<T> {
    last: Option<T>,
    this: Option<T>,
}

impl<T> Default for HoverTracker<T> {
    fn default() -> Self {
        Self { last: None, this: None }
    }
}

impl<T: Copy + PartialEq> HoverTracker<T> {
    pub fn last(&self) -> Option<T> {
        self.last
    }

    pub fn this(&self) -> Option<T> {
        self.this
    }

    pub fn tick<S, K>(&mut self, scene: &mut S, sink: &mut K) -> Transition<T>
    where
        S: CursorScene<Target = T>,
        K: HighlightSink<T>,
    {
        let Some(hit) = scene.trace_under_cursor() else { return Transition::Miss };

        // a stale handle compares as empty
        self.last = self.this.filter(|&target| scene.is_alive(target));
        self.this = scene.as_highlightable(&hit);

        match (self.last, self.this) {
            (None, None) => Transition::None,
            (None, Some(this)) => {
                sink.highlight(this);
                Transition::Enter(this)
            }
            (Some(last), None) => {
                sink.unhighlight(last);
                Transition::Exit(last)
            }
            (Some(last), Some(this)) if last != this => {
                sink.highlight(this);
                sink.unhighlight(last);
                Transition::Swap { enter: this, exit: last }
            }
            (Some(_), Some(this)) => Transition::Hold(this),
        }
    }
}

#[derive(Debug, Default, Deref, DerefMut, Resource)]
pub struct CursorTrace(pub HoverTracker<Entity>);

struct WorldScene<F> {
    hit: Option<TraceHit>,
    capability: F,
}

impl<F: Fn(Entity) -> Option<Entity>> CursorScene for WorldScene<F> {
    type Target = Entity;

    fn trace_under_cursor(&mut self) -> Option<TraceHit> {
        self.hit.take()
    }

    fn as_highlightable(&self, hit: &TraceHit) -> Option<Entity> {
        (self.capability)(hit.entity)
    }

    fn is_alive(&self, target: Entity) -> bool {
        (self.capability)(target).is_some()
    }
}

impl HighlightSink<Entity> for EventWriter<'_, Highlight> {
    fn highlight(&mut self, target: Entity) {
        self.write(Highlight::Enter(target));
    }

    fn unhighlight(&mut self, target: Entity) {
        self.write(Highlight::Exit(target));
    }
}

/// Ray from the active 3D camera through the cursor, if the cursor is over the window
pub fn pointer_ray(
    windows: &Query<&Window, With<PrimaryWindow>>,
    cameras: &Query<(&Camera, &GlobalTransform), With<Camera3d>>,
) -> Option<Ray3d> {
    let cursor = windows.single().ok()?.cursor_position()?;
    let (camera, transform) = cameras.single().ok()?;
    camera.viewport_to_world(transform, cursor).ok()
}

pub fn update(
    mut tracker: ResMut<CursorTrace>,
    mut writer: EventWriter<Highlight>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    colliders: Query<(Entity, &GlobalTransform, &TraceCollider)>,
    highlightable: Query<(), With<Highlightable>>,
) {
    let hit = pointer_ray(&windows, &cameras).and_then(|ray| {
        nearest_hit(ray, colliders.iter().map(|(ent, transform, collider)| (ent, transform.translation(), collider)))
    });
    let mut scene = WorldScene {
        hit,
        capability: |ent: Entity| highlightable.contains(ent).then_some(ent),
    };

    match tracker.tick(&mut scene, &mut writer) {
        Transition::Enter(ent) => trace!("cursor entered {ent}"),
        Transition::Exit(ent) => trace!("cursor left {ent}"),
        Transition::Swap { enter, exit } => trace!("cursor moved from {exit} to {enter}"),
        Transition::Miss | Transition::None | Transition::Hold(_) => {}
    }
}
