use bevy::prelude::*;

use crate::config::{MAX_DISPLACEMENT, VELOCITY_DAMPING};

/// One vertex of a spring circle.
///
/// The point rests on the circle outline and springs toward a target that the
/// pointer pushes around. Owned by exactly one `SpringCircle`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringPoint {
    /// Resting position on the outline (viewport pixels).
    pub rest: Vec2,
    /// Current position.
    pub position: Vec2,
    pub velocity: Vec2,
    /// Where the spring is pulling this frame.
    pub target: Vec2,

    /// Pointer distance below which the target is displaced.
    pub max_influence: f32,
    /// Displacement anchor per axis; the target moves by
    /// `(max_displacement - rest) * ratio` along the pointer direction.
    pub max_displacement: Vec2,
}

impl Default for SpringPoint {
    fn default() -> Self {
        Self {
            rest: Vec2::ZERO,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            target: Vec2::ZERO,
            max_influence: 0.0,
            max_displacement: MAX_DISPLACEMENT,
        }
    }
}

impl SpringPoint {
    /// A point at rest at `rest`, influenced within `max_influence` pixels.
    pub fn new(rest: Vec2, max_influence: f32) -> Self {
        Self {
            rest,
            position: rest,
            target: rest,
            max_influence,
            ..Default::default()
        }
    }

    pub fn with_max_displacement(mut self, max_displacement: Vec2) -> Self {
        self.max_displacement = max_displacement;
        self
    }

    /// Where the pointer wants this point to be.
    ///
    /// The direction is taken from the circle `center` to the pointer, not from
    /// the point itself, so every point on a circle leans the same way.
    pub fn target_for(&self, center: Vec2, pointer: Vec2) -> Vec2 {
        let distance = pointer.distance(self.position);
        if distance >= self.max_influence {
            return self.rest;
        }

        let angle = (pointer.y - center.y).atan2(pointer.x - center.x);
        let ratio = 1.0 - distance / self.max_influence;
        Vec2::new(
            self.rest.x + angle.cos() * ((self.max_displacement.x - self.rest.x) * ratio),
            self.rest.y + angle.sin() * ((self.max_displacement.y - self.rest.y) * ratio),
        )
    }

    /// Advance one frame.
    ///
    /// With no pointer seen yet the point does not move at all. Otherwise the
    /// velocity is pulled toward the target from the old position, damped,
    /// and only then added to the position.
    pub fn update(&mut self, center: Vec2, pointer: Option<Vec2>, spring: f32) {
        let Some(pointer) = pointer else {
            return;
        };

        self.target = self.target_for(center, pointer);

        self.velocity += (self.target - self.position) * spring;
        self.velocity *= VELOCITY_DAMPING;
        self.position += self.velocity;
    }

    /// Distance from the resting position.
    pub fn offset_from_rest(&self) -> f32 {
        self.position.distance(self.rest)
    }
}
