use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

use super::systems::Viewport;
use crate::config::NOISE_Z;

/// Full-screen film grain sprite; the image is refilled every frame.
#[derive(Component)]
pub struct NoiseOverlay {
    pub image: Handle<Image>,
}

/// Pixel size of the grain buffer for a viewport (at least 1×1).
pub fn grain_size(viewport: &Viewport) -> UVec2 {
    viewport.size.ceil().as_uvec2().max(UVec2::ONE)
}

/// Transparent RGBA8 buffer of `size`.
pub fn grain_image(size: UVec2) -> Image {
    Image::new_fill(
        Extent3d {
            width: size.x,
            height: size.y,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        &[0, 0, 0, 0],
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
    )
}

/// Black pixels with independent uniform random alpha. Expects RGBA8.
pub fn fill_grain(data: &mut [u8]) {
    // one random word feeds four pixels
    for quad in data.chunks_mut(16) {
        let alphas = rand::random::<u32>().to_le_bytes();
        for (px, alpha) in quad.chunks_exact_mut(4).zip(alphas) {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            px[3] = alpha;
        }
    }
}

pub fn spawn_noise_overlay(
    mut commands: Commands,
    viewport: Res<Viewport>,
    mut images: ResMut<Assets<Image>>,
) {
    let image = images.add(grain_image(grain_size(&viewport)));
    commands.spawn((
        NoiseOverlay {
            image: image.clone(),
        },
        Sprite {
            image,
            custom_size: Some(viewport.size),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, NOISE_Z),
    ));
}

/// Regenerate the grain, resizing the buffer first when the viewport changed.
pub fn refresh_noise(
    viewport: Res<Viewport>,
    mut images: ResMut<Assets<Image>>,
    mut q_noise: Query<(&NoiseOverlay, &mut Sprite)>,
) {
    for (overlay, mut sprite) in &mut q_noise {
        let Some(mut image) = images.get_mut(&overlay.image) else {
            continue;
        };
        if viewport.is_changed() {
            let size = grain_size(&viewport);
            if image.size() != size {
                *image = grain_image(size);
            }
            sprite.custom_size = Some(viewport.size);
        }
        if let Some(data) = image.data.as_mut() {
            fill_grain(data);
        }
    }
}
