use bevy::prelude::*;

use super::systems::Viewport;
use crate::config::{DEBUG_CENTER_RADIUS, DEBUG_POINT_COLOR, DEBUG_POINT_RADIUS};
use crate::physics::{CircleFrame, SpringCircle, SpringParams};

/// With `debug` on, mark every point and each circle center.
pub fn draw_debug_markers(
    mut gizmos: Gizmos,
    params: Res<SpringParams>,
    viewport: Res<Viewport>,
    q_circles: Query<&SpringCircle>,
) {
    if !params.debug {
        return;
    }
    for circle in &q_circles {
        // points aren't drawn while the disc is still growing
        if circle.frame == CircleFrame::Polygon {
            for p in &circle.points {
                gizmos.circle_2d(viewport.to_world(p.position), DEBUG_POINT_RADIUS, DEBUG_POINT_COLOR);
            }
        }
        gizmos.circle_2d(viewport.to_world(circle.center), DEBUG_CENTER_RADIUS, Color::WHITE);
    }
}
