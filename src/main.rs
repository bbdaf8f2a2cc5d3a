use bevy::prelude::*;

use spring_circles::physics::PhysicsPlugin;
use spring_circles::scene::ScenePlugin;

fn main() {
    App::new()
        // Solid black background
        .insert_resource(ClearColor(Color::BLACK))
        // Bevy's core engine features; on the web the canvas fills the page
        // and swallows touch scrolling
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Spring circles".into(),
                fit_canvas_to_parent: true,
                prevent_default_event_handling: true,
                ..default()
            }),
            ..default()
        }))
        // Spring simulation, then input + drawing around it
        .add_plugins((PhysicsPlugin, ScenePlugin))
        .run();
}
