use bevy::prelude::*;
use tracing::debug;

pub mod circle;
pub mod params;
pub mod point;

pub use circle::{CircleFrame, GrowIn, GrowStep, LinearGradient, SpringCircle};
pub use params::SpringParams;
pub use point::SpringPoint;

/// Last pointer (mouse or touch) position in viewport pixels.
/// `None` until the first move; points stay at rest until then.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct PointerState(pub Option<Vec2>);

impl PointerState {
    /// Record a new position. Non-finite coordinates are dropped.
    pub fn observe(&mut self, pos: Vec2) {
        if pos.is_finite() {
            self.0 = Some(pos);
        }
    }
}

/// Runs in `Update` before anything draws.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhysicsStep;

/// Plug this into your App with `.add_plugins(PhysicsPlugin)`.
pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SpringParams>()
            .init_resource::<PointerState>()
            // one step per rendered frame, like the canvas version
            .add_systems(Update, step_circles.in_set(PhysicsStep));
    }
}

/// Advance every circle: grow-in, then spring points against the shared pointer.
pub fn step_circles(
    time: Res<Time>,
    pointer: Res<PointerState>,
    params: Res<SpringParams>,
    mut q_circles: Query<&mut SpringCircle>,
) {
    let dt = time.delta_secs();
    for mut circle in &mut q_circles {
        if circle.update(dt, pointer.0, params.spring) == GrowStep::Finished {
            debug!(
                order = circle.order,
                points = circle.point_count(),
                "circle finished growing"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GRADIENT_END, INITIAL_GRADIENT};
    use std::time::Duration;

    #[test]
    fn pointer_ignores_non_finite() {
        let mut p = PointerState::default();
        p.observe(Vec2::new(f32::NAN, 3.0));
        assert!(p.0.is_none());
        p.observe(Vec2::new(1.0, 2.0));
        assert_eq!(p.0, Some(Vec2::new(1.0, 2.0)));
    }

    #[test]
    fn step_reads_live_spring() {
        let mut app = App::new();
        app.add_plugins(PhysicsPlugin);
        app.init_resource::<Time>();

        let center = Vec2::new(300.0, 300.0);
        let mut circle = SpringCircle::new(
            center,
            200.0,
            4,
            LinearGradient::new(center, GRADIENT_END, INITIAL_GRADIENT),
            0,
        );
        circle.grow_in = GrowIn::Steady;
        let e = app.world_mut().spawn(circle).id();

        app.world_mut().resource_mut::<PointerState>().observe(center + Vec2::new(200.0, 0.0));
        app.world_mut().resource_mut::<SpringParams>().spring = 0.0;
        app.world_mut().resource_mut::<Time>().advance_by(Duration::from_millis(16));
        app.update();

        // zero spring: targets move, positions don't
        let c = app.world().get::<SpringCircle>(e).unwrap();
        assert_ne!(c.points[0].target, c.points[0].rest);
        assert_eq!(c.points[0].position, c.points[0].rest);

        app.world_mut().resource_mut::<SpringParams>().spring = 0.3;
        app.update();
        let c = app.world().get::<SpringCircle>(e).unwrap();
        assert_ne!(c.points[0].position, c.points[0].rest);
    }
}
