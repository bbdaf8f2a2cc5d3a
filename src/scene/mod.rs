use bevy::prelude::*;

pub mod debug;
pub mod noise;
pub mod render;
pub mod systems;

pub use systems::{CircleCounter, Viewport};

use crate::physics::PhysicsStep;

/// Window, input and drawing around the spring simulation.
/// Add after `PhysicsPlugin`.
pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Viewport>()
            .init_resource::<CircleCounter>()
            .add_systems(
                Startup,
                (
                    systems::setup_scene,
                    render::setup_render,
                    noise::spawn_noise_overlay,
                )
                    .chain(),
            )
            // input first so the physics step sees this frame's pointer and clicks
            .add_systems(
                Update,
                (
                    systems::update_viewport,
                    systems::track_pointer,
                    systems::adjust_params_from_keys,
                    systems::spawn_circle_on_click,
                )
                    .chain()
                    .before(PhysicsStep),
            )
            // then draw: circles, cursor glow, grain on top
            .add_systems(
                Update,
                (
                    render::attach_circle_meshes,
                    render::rebuild_circle_meshes,
                    render::draw_cursor_glow,
                    noise::refresh_noise,
                    debug::draw_debug_markers,
                )
                    .chain()
                    .after(PhysicsStep),
            )
            .add_systems(Update, systems::quit_on_escape);
    }
}
