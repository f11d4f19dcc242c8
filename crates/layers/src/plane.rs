use std::f64::consts::FRAC_PI_2;

use foundation::color::{Color, Palette};
use foundation::geo::GeoPoint;
use foundation::math::Vec3;
use scene::components::{Geometry, Material, Texture, Transform};
use scene::{Node, NodeId, World};
use tracing::error;

use crate::text::{LabelTextureParams, TextRenderer};

/// Two triangles covering the `x1..x2` by `z1..z2` rectangle at height `y`.
pub fn rectangle_to_vertex(x1: f64, x2: f64, z1: f64, z2: f64, y: f64) -> Vec<[f32; 3]> {
    let p = |x: f64, z: f64| [x as f32, y as f32, z as f32];
    vec![
        p(x1, z1),
        p(x1, z2),
        p(x2, z1),
        p(x2, z2),
        p(x2, z1),
        p(x1, z2),
    ]
}

/// Box of the given footprint and height, resting on the ground.
pub fn draw_plane(world: &mut World, p1: GeoPoint, p2: GeoPoint, height: f64, color: Color) -> NodeId {
    let geometry = Geometry::Box {
        width: (p1.x - p2.x).abs(),
        height,
        depth: (p1.z - p2.z).abs(),
    };
    let transform = Transform::translate(Vec3::new(
        (p1.x + p2.x) / 2.0,
        height / 2.0,
        (p1.z + p2.z) / 2.0,
    ));
    world.spawn(Node::new(geometry, Material::standard(color)).with_transform(transform))
}

/// Flat text decal lying on the ground between `p1` and `p2`.
///
/// The text runs along world z. A raster failure leaves a zero-scaled
/// placeholder in the scene.
pub fn draw_texture_plane(
    world: &mut World,
    text: &mut dyn TextRenderer,
    label: &str,
    p1: GeoPoint,
    p2: GeoPoint,
    y: f64,
    font_size: f64,
    palette: &Palette,
) -> NodeId {
    let width = (p1.z - p2.z).abs();
    let height = (p1.x - p2.x).abs();
    let params = LabelTextureParams::new(width, height, font_size, palette)
        .with_colors(palette.white, Some(palette.black));

    let handle = match text.rasterize(label, &params, params.natural_direction()) {
        Ok(handle) => handle,
        Err(err) => {
            error!(label, %err, "texture plane construction failed");
            return spawn_placeholder(world);
        }
    };

    let material = Material::basic(palette.white)
        .with_map(Texture::Raster(handle))
        .with_alpha_map(Texture::Raster(handle), 0.1);
    let mut transform = Transform::translate(Vec3::new((p1.x + p2.x) / 2.0, y, (p1.z + p2.z) / 2.0));
    transform.rotate_x(-FRAC_PI_2);
    transform.rotate_z(-FRAC_PI_2);
    world.spawn(Node::new(Geometry::Plane { width, height }, material).with_transform(transform))
}

/// Zero-scaled empty node standing in for geometry that failed to build.
pub(crate) fn spawn_placeholder(world: &mut World) -> NodeId {
    let mut transform = Transform::identity();
    transform.set_uniform_scale(0.0);
    world.spawn(Node::new(Geometry::Empty, Material::none()).with_transform(transform))
}
