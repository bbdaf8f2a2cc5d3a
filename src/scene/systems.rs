use bevy::input::touch::Touches;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use tracing::info;

use crate::config::*;
use crate::physics::{LinearGradient, PointerState, SpringCircle, SpringParams};

/// Viewport size in logical pixels. Simulation state is kept in viewport
/// pixels (origin top-left, +Y down); this converts to Bevy world space.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub size: Vec2,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            size: FALLBACK_VIEWPORT,
        }
    }
}

impl Viewport {
    pub fn new(size: Vec2) -> Self {
        Self { size }
    }

    pub fn center(&self) -> Vec2 {
        self.size * 0.5
    }

    /// Viewport pixels → world (origin at the window center, +Y up).
    pub fn to_world(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x - self.size.x * 0.5, self.size.y * 0.5 - p.y)
    }
}

/// Number of circles spawned so far; also the next draw order.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct CircleCounter(pub u64);

/// Append one circle at `center` with the current parameters.
/// The gradient runs from the viewport center (at this moment) to `GRADIENT_END`.
pub fn spawn_circle(
    commands: &mut Commands,
    counter: &mut CircleCounter,
    params: &SpringParams,
    viewport: &Viewport,
    center: Vec2,
    palette: (Srgba, Srgba),
) -> Entity {
    let fill = LinearGradient::new(viewport.center(), GRADIENT_END, palette);
    let circle = SpringCircle::new(center, params.radius, params.point_count, fill, counter.0);
    counter.0 += 1;

    info!(
        count = counter.0,
        x = center.x,
        y = center.y,
        radius = params.radius,
        points = params.point_count,
        "spawned circle"
    );
    commands.spawn(circle).id()
}

/// Startup: camera, viewport from the primary window, and the first circle at its center.
pub fn setup_scene(
    mut commands: Commands,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut viewport: ResMut<Viewport>,
    mut counter: ResMut<CircleCounter>,
    params: Res<SpringParams>,
) {
    commands.spawn(Camera2d);

    if let Ok(win) = windows.single() {
        viewport.size = win.size();
    }
    let center = viewport.center();
    spawn_circle(
        &mut commands,
        &mut counter,
        &params,
        &viewport,
        center,
        INITIAL_GRADIENT,
    );
}

/// Keep `Viewport` current. Existing circles keep their pixel centers.
pub fn update_viewport(windows: Query<&Window, With<PrimaryWindow>>, mut viewport: ResMut<Viewport>) {
    let Ok(win) = windows.single() else {
        return;
    };
    let size = win.size();
    if size.x <= 0.0 || size.y <= 0.0 {
        // minimised
        return;
    }
    if viewport.set_if_neq(Viewport::new(size)) {
        info!(width = size.x, height = size.y, "viewport resized");
    }
}

/// Write the cursor (or first touch) into `PointerState` once per frame.
/// The last position is kept when the cursor leaves the window.
pub fn track_pointer(
    windows: Query<&Window, With<PrimaryWindow>>,
    touches: Res<Touches>,
    mut pointer: ResMut<PointerState>,
) {
    if let Some(touch) = touches.iter().next() {
        pointer.observe(touch.position());
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };
    if let Some(screen_pos) = window.cursor_position() {
        pointer.observe(screen_pos);
    }
}

/// Left click or a new touch appends a circle under the pointer.
pub fn spawn_circle_on_click(
    mut commands: Commands,
    buttons: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    pointer: Res<PointerState>,
    viewport: Res<Viewport>,
    params: Res<SpringParams>,
    mut counter: ResMut<CircleCounter>,
) {
    let mut taps: Vec<Vec2> = touches
        .iter_just_pressed()
        .map(|t| t.position())
        .filter(|p| p.is_finite())
        .collect();

    if buttons.just_pressed(MouseButton::Left) {
        if let Some(pos) = pointer.0 {
            taps.push(pos);
        }
    }

    for pos in taps {
        spawn_circle(
            &mut commands,
            &mut counter,
            &params,
            &viewport,
            pos,
            CLICK_GRADIENT,
        );
    }
}

/// Keyboard parameter panel. Any change appends a fresh circle at the
/// viewport center built with the new values.
///
/// Up/Down: radius, Right/Left: point count, `]`/`[`: spring, D: debug.
pub fn adjust_params_from_keys(
    mut commands: Commands,
    keys: Res<ButtonInput<KeyCode>>,
    mut params: ResMut<SpringParams>,
    viewport: Res<Viewport>,
    mut counter: ResMut<CircleCounter>,
) {
    let before = *params;
    // work on a copy so change detection only fires on a real change
    let mut next = before;

    if keys.just_pressed(KeyCode::ArrowUp) {
        next.set_radius(next.radius + RADIUS_STEP);
    }
    if keys.just_pressed(KeyCode::ArrowDown) {
        next.set_radius(next.radius - RADIUS_STEP);
    }
    if keys.just_pressed(KeyCode::ArrowRight) {
        next.set_point_count(next.point_count.saturating_add(1));
    }
    if keys.just_pressed(KeyCode::ArrowLeft) {
        next.set_point_count(next.point_count.saturating_sub(1));
    }
    if keys.just_pressed(KeyCode::BracketRight) {
        next.set_spring(next.spring + SPRING_STEP);
    }
    if keys.just_pressed(KeyCode::BracketLeft) {
        next.set_spring(next.spring - SPRING_STEP);
    }
    if keys.just_pressed(KeyCode::KeyD) {
        next.set_debug(!next.debug);
    }

    if next == before {
        return;
    }
    *params = next;
    info!(
        radius = next.radius,
        points = next.point_count,
        spring = next.spring,
        debug = next.debug,
        "parameters changed"
    );

    let center = viewport.center();
    spawn_circle(
        &mut commands,
        &mut counter,
        &next,
        &viewport,
        center,
        INITIAL_GRADIENT,
    );
}

/// Esc or Q closes the window on native builds; the browser tab owns the
/// lifetime on wasm32. Logs how many circles the session accumulated.
pub fn quit_on_escape(
    keys: Res<ButtonInput<KeyCode>>,
    counter: Res<CircleCounter>,
    mut exit: MessageWriter<AppExit>,
) {
    if cfg!(target_arch = "wasm32") {
        return;
    }
    if keys.any_just_pressed([KeyCode::Escape, KeyCode::KeyQ]) {
        info!(circles = counter.0, "quit requested");
        exit.write(AppExit::Success);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::message::Messages;
    use bevy::input::touch::{TouchInput, TouchPhase, touch_screen_input_system};

    fn scene_app() -> App {
        let mut app = App::new();
        app.init_resource::<SpringParams>()
            .init_resource::<PointerState>()
            .init_resource::<CircleCounter>()
            .init_resource::<ButtonInput<MouseButton>>()
            .init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<Touches>()
            .insert_resource(Viewport::new(Vec2::new(800.0, 600.0)))
            .add_systems(Update, (adjust_params_from_keys, spawn_circle_on_click));
        app
    }

    fn circles(app: &mut App) -> Vec<SpringCircle> {
        app.world_mut()
            .query::<&SpringCircle>()
            .iter(app.world())
            .cloned()
            .collect()
    }

    #[test]
    fn viewport_maps_to_world() {
        let v = Viewport::new(Vec2::new(800.0, 600.0));
        assert_eq!(v.center(), Vec2::new(400.0, 300.0));
        assert_eq!(v.to_world(v.center()), Vec2::ZERO);
        assert_eq!(v.to_world(Vec2::ZERO), Vec2::new(-400.0, 300.0));
        assert_eq!(v.to_world(Vec2::new(800.0, 600.0)), Vec2::new(400.0, -300.0));
    }

    #[test]
    fn click_appends_one_circle_at_pointer() {
        let mut app = scene_app();
        app.world_mut()
            .resource_mut::<PointerState>()
            .observe(Vec2::new(120.0, 80.0));

        for n in 1..=5 {
            {
                let mut buttons = app.world_mut().resource_mut::<ButtonInput<MouseButton>>();
                buttons.release(MouseButton::Left);
                buttons.clear();
                buttons.press(MouseButton::Left);
            }
            app.update();

            let all = circles(&mut app);
            assert_eq!(all.len(), n);
            assert_eq!(app.world().resource::<CircleCounter>().0, n as u64);
        }

        for c in circles(&mut app) {
            assert_eq!(c.center, Vec2::new(120.0, 80.0));
            assert_eq!(c.point_count(), 100);
            let (from, to) = CLICK_GRADIENT;
            assert_eq!((c.fill.from, c.fill.to), (from, to));
            assert_eq!(c.fill.start, Vec2::new(400.0, 300.0));
        }
    }

    #[test]
    fn click_before_any_pointer_does_nothing() {
        let mut app = scene_app();
        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .press(MouseButton::Left);
        app.update();
        assert!(circles(&mut app).is_empty());
    }

    #[test]
    fn param_change_spawns_center_circle_with_new_values() {
        let mut app = scene_app();
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::ArrowRight);
        app.update();

        let params = *app.world().resource::<SpringParams>();
        assert_eq!(params.point_count, 101);

        let all = circles(&mut app);
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].center, Vec2::new(400.0, 300.0));
        assert_eq!(all[0].point_count(), 101);
    }

    #[test]
    fn existing_circles_keep_point_count_after_change() {
        let mut app = scene_app();
        app.world_mut()
            .resource_mut::<PointerState>()
            .observe(Vec2::new(10.0, 10.0));
        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .press(MouseButton::Left);
        app.update();
        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .clear();

        app.world_mut().resource_mut::<SpringParams>().set_point_count(3);
        app.update();

        let all = circles(&mut app);
        assert!(all.iter().all(|c| c.point_count() == 100));
    }

    #[test]
    fn clamped_no_op_key_does_not_reinit() {
        let mut app = scene_app();
        app.world_mut().resource_mut::<SpringParams>().set_radius(400.0);
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::ArrowUp);
        app.update();
        assert!(circles(&mut app).is_empty());
    }

    #[test]
    fn resize_moves_viewport_center_but_not_circles() {
        let mut app = App::new();
        app.insert_resource(Viewport::new(Vec2::new(800.0, 600.0)))
            .add_systems(Update, update_viewport);

        let mut window = Window::default();
        window.resolution.set(800.0, 600.0);
        let win = app.world_mut().spawn((window, PrimaryWindow)).id();

        let center = Vec2::new(400.0, 300.0);
        let fill = LinearGradient::new(center, GRADIENT_END, INITIAL_GRADIENT);
        let circle = app
            .world_mut()
            .spawn(SpringCircle::new(center, 200.0, 10, fill, 0))
            .id();
        app.update();
        assert_eq!(app.world().resource::<Viewport>().center(), center);

        app.world_mut()
            .get_mut::<Window>(win)
            .unwrap()
            .resolution
            .set(1200.0, 900.0);
        app.update();

        let viewport = *app.world().resource::<Viewport>();
        assert_eq!(viewport.size, Vec2::new(1200.0, 900.0));
        assert_eq!(viewport.center(), Vec2::new(600.0, 450.0));
        let c = app.world().get::<SpringCircle>(circle).unwrap();
        assert_eq!(c.center, center);
        assert!(c.points.iter().all(|p| (p.rest.distance(center) - 200.0).abs() < 1e-2));
    }

    #[test]
    fn tap_appends_exactly_one_circle_at_touch() {
        let mut app = scene_app();
        app.add_message::<TouchInput>()
            .add_systems(Update, touch_screen_input_system.before(spawn_circle_on_click));

        app.world_mut()
            .resource_mut::<Messages<TouchInput>>()
            .write(TouchInput {
                phase: TouchPhase::Started,
                position: Vec2::new(250.0, 125.0),
                window: Entity::PLACEHOLDER,
                force: None,
                id: 7,
            });
        app.update();

        let all = circles(&mut app);
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].center, Vec2::new(250.0, 125.0));

        // finger still down, no new tap
        app.update();
        assert_eq!(circles(&mut app).len(), 1);
        assert_eq!(app.world().resource::<CircleCounter>().0, 1);
    }

    #[test]
    #[cfg(not(target_arch = "wasm32"))]
    fn escape_requests_exit_on_native() {
        let mut app = App::new();
        app.init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<CircleCounter>()
            .add_systems(Update, quit_on_escape);
        app.update();
        assert_eq!(app.should_exit(), None);

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::Escape);
        app.update();
        assert_eq!(app.should_exit(), Some(AppExit::Success));
    }
}
