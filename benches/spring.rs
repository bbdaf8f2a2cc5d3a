use bevy::prelude::*;
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use spring_circles::config::{GRADIENT_END, INITIAL_GRADIENT};
use spring_circles::physics::{GrowIn, LinearGradient, SpringCircle};

fn steady_circle(points: usize) -> SpringCircle {
    let center = Vec2::new(640.0, 360.0);
    let fill = LinearGradient::new(center, GRADIENT_END, INITIAL_GRADIENT);
    let mut c = SpringCircle::new(center, 200.0, points, fill, 0);
    c.grow_in = GrowIn::Steady;
    c
}

fn bench_circle_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("circle_update");
    for points in [3usize, 100, 500] {
        group.bench_with_input(BenchmarkId::from_parameter(points), &points, |b, &n| {
            let mut circle = steady_circle(n);
            let mut frame = 0u32;
            b.iter(|| {
                frame = frame.wrapping_add(1);
                let a = frame as f32 * 0.05;
                let pointer = Vec2::new(640.0 + a.cos() * 150.0, 360.0 + a.sin() * 150.0);
                black_box(circle.update(1.0 / 60.0, Some(pointer), 0.03));
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_circle_update);
criterion_main!(benches);
