use std::f64::consts::FRAC_PI_2;

use foundation::color::Palette;
use foundation::geo::GeoRectangle;
use foundation::math::Vec3;
use scene::components::{Geometry, Material, MeshData, Side, Texture, Transform};
use scene::{Node, NodeId, World};

pub const WALL_HEIGHT: f64 = 0.2;
const WALL_OPACITY: f32 = 0.25;

/// Vertical quad from `from` (bottom corner) to `to` (opposite top corner).
fn wall_mesh(from: Vec3, to: Vec3) -> MeshData {
    let positions = vec![
        from.to_f32(),
        Vec3::new(from.x, to.y, from.z).to_f32(),
        Vec3::new(to.x, from.y, to.z).to_f32(),
        to.to_f32(),
    ];
    MeshData::indexed(positions, vec![0, 1, 2, 2, 1, 3])
}

/// Four translucent single-sided walls around the floor edge, east, north,
/// south and west in that order.
pub fn boundary_walls(world: &mut World, floor: &GeoRectangle, palette: &Palette) -> [NodeId; 4] {
    let (min_x, min_z) = (floor.p1.x, floor.p1.z);
    let (max_x, max_z) = (floor.p2.x, floor.p2.z);
    let h = WALL_HEIGHT;
    let edges = [
        (Vec3::new(max_x, 0.0, max_z), Vec3::new(max_x, h, min_z)),
        (Vec3::new(max_x, 0.0, min_z), Vec3::new(min_x, h, min_z)),
        (Vec3::new(min_x, 0.0, max_z), Vec3::new(max_x, h, max_z)),
        (Vec3::new(min_x, 0.0, min_z), Vec3::new(min_x, h, max_z)),
    ];
    edges.map(|(from, to)| {
        let material = Material::basic(palette.boundary_wall)
            .with_opacity(WALL_OPACITY)
            .with_side(Side::Front);
        world.spawn(Node::new(Geometry::Mesh(wall_mesh(from, to)), material))
    })
}

/// Image panel standing just inside the floor's east edge.
pub fn east_wall_panel(world: &mut World, floor: &GeoRectangle, url: &str, palette: &Palette) -> NodeId {
    let mut transform = Transform::translate(Vec3::new(floor.p2.x - 0.001, 0.1, 0.1));
    transform.rotate_y(-FRAC_PI_2);
    let material = Material::basic(palette.white).with_map(Texture::Url(url.to_string()));
    world.spawn(
        Node::new(
            Geometry::Plane {
                width: 1.2,
                height: 0.2,
            },
            material,
        )
        .with_transform(transform),
    )
}
