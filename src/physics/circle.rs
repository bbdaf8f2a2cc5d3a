use bevy::prelude::*;
use std::f32::consts::PI;

use super::point::SpringPoint;
use crate::config::*;

/// One-shot elastic scale-in. `Growing → Steady`, never back.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GrowIn {
    Growing { elapsed: f32 },
    Steady,
}

/// What a call to `GrowIn::advance` produced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GrowStep {
    /// Still animating; scale factor of the radius (can overshoot 1).
    Growing(f32),
    /// Reached the end on this call. Returned exactly once.
    Finished,
    /// Already finished on an earlier call.
    Steady,
}

impl Default for GrowIn {
    fn default() -> Self {
        GrowIn::Growing { elapsed: 0.0 }
    }
}

impl GrowIn {
    pub fn advance(&mut self, dt: f32) -> GrowStep {
        match self {
            GrowIn::Steady => GrowStep::Steady,
            GrowIn::Growing { elapsed } => {
                *elapsed += dt.max(0.0);
                if *elapsed >= GROW_IN_SECONDS {
                    *self = GrowIn::Steady;
                    GrowStep::Finished
                } else {
                    GrowStep::Growing(elastic_out(*elapsed / GROW_IN_SECONDS))
                }
            }
        }
    }

    pub fn is_steady(&self) -> bool {
        matches!(self, GrowIn::Steady)
    }
}

/// Elastic ease-out, amplitude 1. `t` in [0, 1].
pub fn elastic_out(t: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    let shift = ELASTIC_PERIOD / 4.0;
    2f32.powf(-10.0 * t) * ((t - shift) * (2.0 * PI) / ELASTIC_PERIOD).sin() + 1.0
}

/// Two-stop linear gradient in viewport pixels, like a canvas linear gradient.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearGradient {
    pub start: Vec2,
    pub end: Vec2,
    pub from: Srgba,
    pub to: Srgba,
}

impl LinearGradient {
    pub fn new(start: Vec2, end: Vec2, (from, to): (Srgba, Srgba)) -> Self {
        Self { start, end, from, to }
    }

    /// Colour at `p`: projected onto start→end, clamped to the end stops.
    pub fn color_at(&self, p: Vec2) -> Srgba {
        let axis = self.end - self.start;
        let len2 = axis.length_squared();
        let t = if len2 <= f32::EPSILON {
            1.0
        } else {
            ((p - self.start).dot(axis) / len2).clamp(0.0, 1.0)
        };
        Srgba::new(
            self.from.red + (self.to.red - self.from.red) * t,
            self.from.green + (self.to.green - self.from.green) * t,
            self.from.blue + (self.to.blue - self.from.blue) * t,
            self.from.alpha + (self.to.alpha - self.from.alpha) * t,
        )
    }
}

/// What a circle looks like this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CircleFrame {
    /// Plain disc at the center, during grow-in.
    Disc { radius: f32 },
    /// Closed polygon through the points.
    Polygon,
}

/// A closed ring of spring points plus its grow-in state and fill.
/// Lives as a Component; the render systems read it after `update`.
#[derive(Component, Clone, Debug)]
pub struct SpringCircle {
    pub center: Vec2,
    /// Radius at construction (later parameter changes don't re-layout).
    pub radius: f32,
    pub points: Vec<SpringPoint>,
    pub fill: LinearGradient,
    pub grow_in: GrowIn,
    /// Creation order; later circles draw on top.
    pub order: u64,
    /// Last state produced by `update`.
    pub frame: CircleFrame,
}

impl SpringCircle {
    /// Lay out `point_count` points on a ring of `radius` around `center`.
    ///
    /// A ring needs at least three points: a smaller `point_count` is raised
    /// to `POINT_COUNT_RANGE.0`, so `point_count()` may exceed the argument.
    /// Counts coming from `SpringParams` are already in range.
    pub fn new(center: Vec2, radius: f32, point_count: usize, fill: LinearGradient, order: u64) -> Self {
        let count = point_count.max(POINT_COUNT_RANGE.0);
        // Evaluated as π / n * 2 to keep the exact float sequence of the layout.
        let step = PI / count as f32 * 2.0;

        let points = (0..count)
            .map(|i| {
                let t = step * i as f32;
                let rest = center + Vec2::new(t.cos(), t.sin()) * radius;
                SpringPoint::new(rest, radius)
            })
            .collect();

        Self {
            center,
            radius,
            points,
            fill,
            grow_in: GrowIn::default(),
            order,
            frame: CircleFrame::Disc { radius: 0.0 },
        }
    }

    /// Advance one frame. During grow-in only the disc scale moves; after
    /// that every point is stepped with the live spring constant.
    pub fn update(&mut self, dt: f32, pointer: Option<Vec2>, spring: f32) -> GrowStep {
        let step = self.grow_in.advance(dt);
        self.frame = match step {
            GrowStep::Growing(scale) => CircleFrame::Disc {
                radius: self.radius * scale,
            },
            GrowStep::Finished | GrowStep::Steady => {
                let center = self.center;
                for p in &mut self.points {
                    p.update(center, pointer, spring);
                }
                CircleFrame::Polygon
            }
        };
        step
    }

    /// Outline to fill this frame, in viewport pixels.
    pub fn outline(&self) -> Vec<Vec2> {
        match self.frame {
            CircleFrame::Disc { radius } => disc_outline(self.center, radius, DISC_SEGMENTS),
            CircleFrame::Polygon => self.points.iter().map(|p| p.position).collect(),
        }
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }
}

/// `segments` points evenly spaced on a circle.
pub fn disc_outline(center: Vec2, radius: f32, segments: usize) -> Vec<Vec2> {
    let radius = radius.max(0.0);
    (0..segments)
        .map(|i| {
            let t = i as f32 * std::f32::consts::TAU / segments as f32;
            center + Vec2::new(t.cos(), t.sin()) * radius
        })
        .collect()
}
