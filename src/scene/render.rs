use bevy::asset::RenderAssetUsages;
use bevy::camera::visibility::NoFrustumCulling;
use bevy::color::Alpha;
use bevy::mesh::Indices;
use bevy::prelude::*;
use bevy::render::render_resource::PrimitiveTopology;
use lyon_tessellation::math::point;
use lyon_tessellation::path::Path;
use lyon_tessellation::{
    BuffersBuilder, FillOptions, FillRule, FillTessellator, FillVertex, TessellationError,
    VertexBuffers,
};
use tracing::warn;

use super::systems::Viewport;
use crate::config::*;
use crate::physics::circle::disc_outline;
use crate::physics::{LinearGradient, PointerState, SpringCircle, SpringParams};

/// Shared material for vertex-coloured meshes.
#[derive(Resource)]
pub struct SceneMaterials {
    pub vertex_colored: Handle<ColorMaterial>,
}

/// Mesh handles a circle redraws into every frame.
#[derive(Component)]
pub struct CircleMeshes {
    pub fill: Handle<Mesh>,
    pub glow: Handle<Mesh>,
}

/// Marker for the translucent disc that follows the pointer.
#[derive(Component)]
pub struct CursorGlow;

/// Plain vertex data; kept separate from `Mesh` so it can be checked in tests.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct MeshBuffers {
    pub positions: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 4]>,
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    fn push(&mut self, p: Vec2, color: LinearRgba) {
        self.positions.push([p.x, p.y, 0.0]);
        self.colors.push([color.red, color.green, color.blue, color.alpha]);
    }

    pub fn write_to(self, mesh: &mut Mesh) {
        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, self.positions);
        mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, self.colors);
        mesh.insert_indices(Indices::U32(self.indices));
    }

    pub fn into_mesh(self) -> Mesh {
        let mut mesh = Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
        );
        self.write_to(&mut mesh);
        mesh
    }
}

/// Fill the closed `outline` with the nonzero rule, coloured by `gradient`.
/// Inputs are viewport pixels; output is world space.
///
/// The outline folds over itself once points are dragged across the center,
/// so it is tessellated rather than fanned.
pub fn fill_buffers(
    outline: &[Vec2],
    gradient: &LinearGradient,
    viewport: &Viewport,
) -> Result<MeshBuffers, TessellationError> {
    let mut out = MeshBuffers::default();
    if outline.len() < 3 {
        return Ok(out);
    }

    let mut builder = Path::builder();
    builder.begin(point(outline[0].x, outline[0].y));
    for p in &outline[1..] {
        builder.line_to(point(p.x, p.y));
    }
    builder.end(true);
    let path = builder.build();

    let mut geometry: VertexBuffers<Vec2, u32> = VertexBuffers::new();
    FillTessellator::new().tessellate_path(
        &path,
        &FillOptions::default().with_fill_rule(FillRule::NonZero),
        &mut BuffersBuilder::new(&mut geometry, |v: FillVertex| {
            let p = v.position();
            Vec2::new(p.x, p.y)
        }),
    )?;

    for p in geometry.vertices {
        out.push(viewport.to_world(p), gradient.color_at(p).into());
    }
    out.indices = geometry.indices;
    Ok(out)
}

/// Twice the signed area (shoelace); positive when the outline runs with
/// increasing angle in viewport pixels.
fn signed_area2(outline: &[Vec2]) -> f32 {
    let n = outline.len();
    (0..n)
        .map(|i| outline[i].perp_dot(outline[(i + 1) % n]))
        .sum()
}

/// Outward unit normal at every outline vertex, from its two edges.
pub fn outline_normals(outline: &[Vec2]) -> Vec<Vec2> {
    let n = outline.len();
    let sign = if signed_area2(outline) < 0.0 { -1.0 } else { 1.0 };
    let edge_normal = |a: Vec2, b: Vec2| {
        let d = (b - a).normalize_or_zero();
        Vec2::new(d.y, -d.x) * sign
    };
    (0..n)
        .map(|i| {
            let prev = outline[(i + n - 1) % n];
            let here = outline[i];
            let next = outline[(i + 1) % n];
            let a = edge_normal(prev, here);
            let b = edge_normal(here, next);
            let joined = (a + b).normalize_or_zero();
            if joined == Vec2::ZERO { a.normalize_or_zero() } else { joined }
        })
        .collect()
}

/// Soft halo outside the outline: opaque glow colour on the outline fading
/// to transparent `GLOW_SPREAD` pixels out along the vertex normals.
pub fn glow_buffers(outline: &[Vec2], viewport: &Viewport) -> MeshBuffers {
    let mut out = MeshBuffers::default();
    let n = outline.len();
    if n < 3 {
        return out;
    }

    let inner: LinearRgba = GLOW_COLOR.with_alpha(GLOW_ALPHA).into();
    let outer: LinearRgba = GLOW_COLOR.with_alpha(0.0).into();
    for (&p, normal) in outline.iter().zip(outline_normals(outline)) {
        out.push(viewport.to_world(p), inner);
        out.push(viewport.to_world(p + normal * GLOW_SPREAD), outer);
    }
    for i in 0..n {
        let j = (i + 1) % n;
        let (a_in, a_out) = (2 * i as u32, 2 * i as u32 + 1);
        let (b_in, b_out) = (2 * j as u32, 2 * j as u32 + 1);
        out.indices.extend_from_slice(&[a_in, a_out, b_out, a_in, b_out, b_in]);
    }
    out
}

/// World z of draw slot `slot`, squeezed into [CIRCLE_Z_BASE, CIRCLE_Z_BASE + CIRCLE_Z_SPAN)
/// so any number of circles stays under the cursor glow.
fn layer_z(slot: u64) -> f32 {
    let s = slot as f64;
    CIRCLE_Z_BASE + (CIRCLE_Z_SPAN as f64 * s / (s + CIRCLE_Z_HALF_SLOTS)) as f32
}

/// Fill z of circle `order`. Each circle owns two slots: glow, then fill.
pub fn circle_z(order: u64) -> f32 {
    layer_z(order.saturating_mul(2).saturating_add(1))
}

/// Glow z of circle `order`: above every earlier circle, below its own fill.
pub fn glow_z(order: u64) -> f32 {
    layer_z(order.saturating_mul(2))
}

/// Startup: shared material and the cursor glow entity.
pub fn setup_render(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    let vertex_colored = materials.add(Color::WHITE);
    commands.insert_resource(SceneMaterials { vertex_colored });

    // unit disc, scaled to the live radius each frame
    let disc = meshes.add(Circle::new(1.0));
    let glow_mat = materials.add(Color::WHITE.with_alpha(CURSOR_GLOW_ALPHA));
    commands.spawn((
        CursorGlow,
        Mesh2d(disc),
        MeshMaterial2d(glow_mat),
        Transform::from_xyz(0.0, 0.0, CURSOR_Z),
        Visibility::Hidden,
    ));
}

/// Give newly spawned circles their fill and glow meshes.
pub fn attach_circle_meshes(
    mut commands: Commands,
    q_new: Query<(Entity, &SpringCircle), Without<CircleMeshes>>,
    viewport: Res<Viewport>,
    mut meshes: ResMut<Assets<Mesh>>,
    materials: Res<SceneMaterials>,
) {
    for (e, circle) in &q_new {
        // full-size disc so the first mesh is never empty; rebuilt the same frame
        let outline = disc_outline(circle.center, circle.radius, DISC_SEGMENTS);
        let fill = fill_buffers(&outline, &circle.fill, &viewport).unwrap_or_default();
        let fill = meshes.add(fill.into_mesh());
        let glow = meshes.add(glow_buffers(&outline, &viewport).into_mesh());
        let z = circle_z(circle.order);

        commands
            .entity(e)
            .insert((
                CircleMeshes {
                    fill: fill.clone(),
                    glow: glow.clone(),
                },
                Mesh2d(fill),
                MeshMaterial2d(materials.vertex_colored.clone()),
                Transform::from_xyz(0.0, 0.0, z),
                NoFrustumCulling,
            ))
            .with_child((
                Mesh2d(glow),
                MeshMaterial2d(materials.vertex_colored.clone()),
                Transform::from_xyz(0.0, 0.0, glow_z(circle.order) - z),
                NoFrustumCulling,
            ));
    }
}

/// Rewrite every circle's meshes from its current outline.
pub fn rebuild_circle_meshes(
    q_circles: Query<(&SpringCircle, &CircleMeshes)>,
    viewport: Res<Viewport>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    for (circle, handles) in &q_circles {
        let outline = circle.outline();
        match fill_buffers(&outline, &circle.fill, &viewport) {
            Ok(fill) => {
                if let Some(mut mesh) = meshes.get_mut(&handles.fill) {
                    fill.write_to(&mut mesh);
                }
            }
            // keep last frame's fill
            Err(err) => warn!(order = circle.order, ?err, "fill tessellation failed"),
        }
        let glow = glow_buffers(&outline, &viewport);
        if let Some(mut mesh) = meshes.get_mut(&handles.glow) {
            glow.write_to(&mut mesh);
        }
    }
}

/// Translucent disc of the live radius at the last pointer position.
pub fn draw_cursor_glow(
    pointer: Res<PointerState>,
    params: Res<SpringParams>,
    viewport: Res<Viewport>,
    mut q_glow: Query<(&mut Transform, &mut Visibility), With<CursorGlow>>,
) {
    for (mut tf, mut vis) in &mut q_glow {
        let Some(pos) = pointer.0 else {
            *vis = Visibility::Hidden;
            continue;
        };
        let world = viewport.to_world(pos);
        tf.translation.x = world.x;
        tf.translation.y = world.y;
        tf.scale = Vec3::new(params.radius, params.radius, 1.0);
        *vis = Visibility::Visible;
    }
}
