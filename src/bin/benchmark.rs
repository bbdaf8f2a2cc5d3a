//! Headless timing of the spring step: `benchmark [circles] [frames]`.

use std::time::Instant;

use bevy::prelude::*;
use spring_circles::config::{DEFAULT_RADIUS, FALLBACK_VIEWPORT, GRADIENT_END, INITIAL_GRADIENT};
use spring_circles::physics::{GrowIn, LinearGradient, SpringCircle};
use spring_circles::scene::render::{fill_buffers, glow_buffers};
use spring_circles::scene::Viewport;

const POINTS: usize = 500;

fn main() {
    let mut args = std::env::args().skip(1);
    let circles: usize = args.next().and_then(|s| s.parse().ok()).unwrap_or(20);
    let frames: usize = args.next().and_then(|s| s.parse().ok()).unwrap_or(600);

    let viewport = Viewport::new(FALLBACK_VIEWPORT);
    let fill = LinearGradient::new(viewport.center(), GRADIENT_END, INITIAL_GRADIENT);

    let mut scene: Vec<SpringCircle> = (0..circles)
        .map(|i| {
            let t = i as f32 / circles.max(1) as f32 * std::f32::consts::TAU;
            let center = viewport.center() + Vec2::new(t.cos(), t.sin()) * 150.0;
            let mut c = SpringCircle::new(center, DEFAULT_RADIUS, POINTS, fill, i as u64);
            c.grow_in = GrowIn::Steady;
            c
        })
        .collect();

    let dt = 1.0 / 60.0;
    let mut physics = 0.0f64;
    let mut meshing = 0.0f64;
    let mut vertices = 0usize;

    for frame in 0..frames {
        // pointer sweeps a slow circle through the scene
        let a = frame as f32 * 0.02;
        let pointer = viewport.center() + Vec2::new(a.cos(), a.sin()) * 220.0;

        let t0 = Instant::now();
        for c in &mut scene {
            c.update(dt, Some(pointer), 0.03);
        }
        let t1 = Instant::now();
        for c in &scene {
            let outline = c.outline();
            if let Ok(fill) = fill_buffers(&outline, &c.fill, &viewport) {
                vertices += fill.positions.len();
            }
            vertices += glow_buffers(&outline, &viewport).positions.len();
        }
        let t2 = Instant::now();

        physics += (t1 - t0).as_secs_f64();
        meshing += (t2 - t1).as_secs_f64();
    }

    let per_frame = |secs: f64| secs * 1e3 / frames.max(1) as f64;
    println!("circles={circles} points/circle={POINTS} frames={frames}");
    println!("physics  {:.3} ms/frame", per_frame(physics));
    println!("meshing  {:.3} ms/frame", per_frame(meshing));
    println!("vertices {vertices}");
}
