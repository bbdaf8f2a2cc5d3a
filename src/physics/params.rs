use bevy::prelude::*;

use crate::config::*;

/// Live simulation parameters shared by every circle.
///
/// `spring` and `debug` are read each frame by all circles; `radius` and
/// `point_count` only shape circles created after the change.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct SpringParams {
    pub radius: f32,
    pub point_count: usize,
    pub spring: f32,
    pub debug: bool,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            point_count: DEFAULT_POINT_COUNT,
            spring: DEFAULT_SPRING,
            debug: false,
        }
    }
}

impl SpringParams {
    pub fn set_radius(&mut self, radius: f32) {
        if radius.is_finite() {
            self.radius = radius.clamp(RADIUS_RANGE.0, RADIUS_RANGE.1);
        }
    }

    pub fn set_point_count(&mut self, count: usize) {
        self.point_count = count.clamp(POINT_COUNT_RANGE.0, POINT_COUNT_RANGE.1);
    }

    /// Clamped to [0, 0.5] and snapped to the panel step.
    pub fn set_spring(&mut self, spring: f32) {
        if spring.is_finite() {
            let snapped = (spring / SPRING_STEP).round() * SPRING_STEP;
            self.spring = snapped.clamp(SPRING_RANGE.0, SPRING_RANGE.1);
        }
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }
}
