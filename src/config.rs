use bevy::prelude::*;

/// Spring integration
pub const VELOCITY_DAMPING: f32 = 0.76; // applied to velocity every frame

/// Simulation parameter defaults
pub const DEFAULT_RADIUS: f32 = 200.0;
pub const DEFAULT_POINT_COUNT: usize = 100;
pub const DEFAULT_SPRING: f32 = 0.03;

/// Parameter panel ranges and steps
pub const RADIUS_RANGE: (f32, f32) = (5.0, 400.0);
pub const POINT_COUNT_RANGE: (usize, usize) = (3, 500);
pub const SPRING_RANGE: (f32, f32) = (0.0, 0.5);
pub const RADIUS_STEP: f32 = 5.0;
pub const SPRING_STEP: f32 = 0.01;

/// Per-point displacement cap. Derived from a full turn, so it does not
/// follow the radius.
pub const MAX_DISPLACEMENT: Vec2 = Vec2::new(20.0, -4.898_587_3e-15); // (cos 2π, sin 2π) * 20

/// Grow-in animation
pub const GROW_IN_SECONDS: f32 = 0.8;
pub const ELASTIC_PERIOD: f32 = 0.3;

/// Glow behind every circle (canvas shadowBlur 500)
pub const GLOW_COLOR: Color = Color::srgb(0.0, 60.0 / 255.0, 101.0 / 255.0); // #003C65
pub const GLOW_SPREAD: f32 = 250.0;
pub const GLOW_ALPHA: f32 = 0.9;

/// Segments used to draw the grow-in disc
pub const DISC_SEGMENTS: usize = 64;

/// Cursor glow
pub const CURSOR_GLOW_ALPHA: f32 = 0.05;

/// Debug markers
pub const DEBUG_POINT_RADIUS: f32 = 4.0;
pub const DEBUG_CENTER_RADIUS: f32 = 10.0;
pub const DEBUG_POINT_COLOR: Color = Color::srgb(0.2, 0.439, 0.831); // #3370d4

/// Circle fills: two-stop linear gradients from the viewport center to this anchor.
pub const GRADIENT_END: Vec2 = Vec2::new(170.0, 0.0);
pub const INITIAL_GRADIENT: (Srgba, Srgba) = (
    Srgba::rgb(0.0, 108.0 / 255.0, 184.0 / 255.0), // #006CB8
    Srgba::WHITE,
);
pub const CLICK_GRADIENT: (Srgba, Srgba) = (
    Srgba::rgb(221.0 / 255.0, 214.0 / 255.0, 243.0 / 255.0), // #ddd6f3
    Srgba::rgb(250.0 / 255.0, 172.0 / 255.0, 168.0 / 255.0), // #faaca8
);

/// Draw order (world z). Circles stack upward from CIRCLE_Z_BASE and never
/// reach CIRCLE_Z_BASE + CIRCLE_Z_SPAN; half the span is used up after
/// CIRCLE_Z_HALF_SLOTS draw slots (two per circle).
pub const CIRCLE_Z_BASE: f32 = 0.0;
pub const CIRCLE_Z_SPAN: f32 = 700.0;
pub const CIRCLE_Z_HALF_SLOTS: f64 = 20_000.0;
pub const CURSOR_Z: f32 = 800.0;
pub const NOISE_Z: f32 = 900.0;

/// Used until the primary window reports a size
pub const FALLBACK_VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);
