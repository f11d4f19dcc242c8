use foundation::color::Palette;
use foundation::geo::{GeoPoint, GeoRectangle};
use formats::FeatureRecord;
use scene::components::{Geometry, Material, MeshData, Side};
use scene::{Node, NodeId, World};
use serde::Deserialize;

use crate::feature::{FieldObject, FieldObjectBase};
use crate::plane::draw_texture_plane;
use crate::text::TextRenderer;

/// Fewest arc steps that still read as a smooth curve.
pub const MIN_ARC_SEGMENTS: u32 = 16;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HighwayConfig {
    pub floor_height: f64,
    pub road_width: f64,
    pub guard_height: f64,
    pub arc_segments: u32,
    pub label_width: f64,
    pub label_height: f64,
    pub label_lift: f64,
    pub label_font_size: f64,
}

impl Default for HighwayConfig {
    fn default() -> Self {
        Self {
            floor_height: 0.1,
            road_width: 0.1,
            guard_height: 0.025,
            arc_segments: 22,
            label_width: 0.4,
            label_height: 0.06,
            label_lift: 0.01,
            label_font_size: 25.0,
        }
    }
}

impl HighwayConfig {
    pub fn arc_segments(&self) -> u32 {
        self.arc_segments.max(MIN_ARC_SEGMENTS)
    }
}

type P3 = [f64; 3];

/// Two triangles for the quad `a b c d`, wound B,A,C / C,A,D.
fn push_quad(out: &mut Vec<[f32; 3]>, a: P3, b: P3, c: P3, d: P3) {
    for p in [b, a, c, c, a, d] {
        out.push([p[0] as f32, p[1] as f32, p[2] as f32]);
    }
}

/// Elevated road: a straight run south of the curve along z, a quarter arc,
/// then a straight run east along x to the floor edge.
///
/// The curve is centred on the record's footprint centre with a radius of
/// half the footprint's x extent.
pub fn highway_mesh(record: &FeatureRecord, floor: &GeoRectangle, cfg: &HighwayConfig) -> MeshData {
    let z_center = (record.y[0] + record.y[1]) / 2.0;
    let x_center = (record.x[0] + record.x[1]) / 2.0;
    let r = (record.x[0] - record.x[1]).abs() / 2.0;
    let (min_z, max_x) = (floor.p1.z, floor.p2.x);
    let f = cfg.floor_height;
    let g = cfg.guard_height;
    let w = cfg.road_width;
    let segments = cfg.arc_segments();

    let mut out = Vec::with_capacity((6 + 3 * segments as usize) * 6);

    // Straight run along z: outer wall, deck, inner wall.
    let outer = x_center - (r + w);
    let inner = x_center - r;
    push_quad(
        &mut out,
        [outer, f - g, z_center],
        [outer, f - g, min_z],
        [outer, f + g, min_z],
        [outer, f + g, z_center],
    );
    push_quad(
        &mut out,
        [outer, f, z_center],
        [outer, f, min_z],
        [inner, f, min_z],
        [inner, f, z_center],
    );
    push_quad(
        &mut out,
        [inner, f - g, z_center],
        [inner, f - g, min_z],
        [inner, f + g, min_z],
        [inner, f + g, z_center],
    );

    let polar = |deg: f64, y: f64, dist: f64| -> P3 {
        let rad = deg.to_radians();
        [x_center + dist * rad.cos(), y, z_center + dist * rad.sin()]
    };
    let step = 90.0 / segments as f64;
    for i in 0..segments {
        let start = 90.0 + step * i as f64;
        let end = 90.0 + step * (i + 1) as f64;
        push_quad(
            &mut out,
            polar(start, f, r),
            polar(start, f, r + w),
            polar(end, f, r + w),
            polar(end, f, r),
        );
        for dist in [r, r + w] {
            push_quad(
                &mut out,
                polar(start, f - g, dist),
                polar(end, f - g, dist),
                polar(end, f + g, dist),
                polar(start, f + g, dist),
            );
        }
    }

    // Straight run along x: deck, outer wall, inner wall.
    let far = z_center + r + w;
    let near = z_center + r;
    push_quad(
        &mut out,
        [x_center, f, far],
        [max_x, f, far],
        [max_x, f, near],
        [x_center, f, near],
    );
    for z in [far, near] {
        push_quad(
            &mut out,
            [x_center, f - g, z],
            [max_x, f - g, z],
            [max_x, f + g, z],
            [x_center, f + g, z],
        );
    }

    MeshData::triangles(out)
}

pub struct Highway {
    pub base: FieldObjectBase,
    pub road: NodeId,
    pub label: NodeId,
}

impl Highway {
    pub fn build(
        world: &mut World,
        text: &mut dyn TextRenderer,
        record: &FeatureRecord,
        floor: &GeoRectangle,
        cfg: &HighwayConfig,
        palette: &Palette,
    ) -> Self {
        let material = Material::standard(palette.dark_grey).with_side(Side::Double);
        let road = world.spawn(Node::new(Geometry::Mesh(highway_mesh(record, floor, cfg)), material));

        let x_center = (record.x[0] + record.x[1]) / 2.0;
        let z_center = (record.y[0] + record.y[1]) / 2.0;
        let r = (record.x[0] - record.x[1]).abs() / 2.0;
        let x_label = x_center - (r + cfg.road_width / 2.0);
        let z_mid = (z_center + floor.p1.z) / 2.0;
        let label = draw_texture_plane(
            world,
            text,
            &record.label,
            GeoPoint::new(x_label - cfg.label_height / 2.0, z_mid + cfg.label_width),
            GeoPoint::new(x_label + cfg.label_height / 2.0, z_mid),
            cfg.floor_height + cfg.label_lift,
            cfg.label_font_size,
            palette,
        );

        Highway {
            base: FieldObjectBase::new(record),
            road,
            label,
        }
    }
}

impl FieldObject for Highway {
    fn base(&self) -> &FieldObjectBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut FieldObjectBase {
        &mut self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::EstimatedTextRenderer;
    use pretty_assertions::assert_eq;

    fn record() -> FeatureRecord {
        FeatureRecord {
            feature_type: "highway".into(),
            label: "Route 1".into(),
            x: [1.0, 1.4],
            y: [1.0, 1.4],
            ..FeatureRecord::default()
        }
    }

    fn floor() -> GeoRectangle {
        GeoRectangle::new(GeoPoint::new(0.0, 0.0), GeoPoint::new(3.0, 3.0))
    }

    #[test]
    fn reference_mesh_has_72_quads() {
        let mesh = highway_mesh(&record(), &floor(), &HighwayConfig::default());
        assert_eq!(mesh.vertex_count() % 3, 0);
        assert_eq!(mesh.triangle_count(), 144);
        assert_eq!(mesh.vertex_count(), 432);
    }

    #[test]
    fn triangle_count_tracks_arc_segments() {
        let cfg = HighwayConfig {
            arc_segments: 30,
            ..HighwayConfig::default()
        };
        let mesh = highway_mesh(&record(), &floor(), &cfg);
        assert_eq!(mesh.triangle_count(), 2 * (6 + 3 * 30));
    }

    #[test]
    fn arc_segments_are_clamped() {
        let cfg = HighwayConfig {
            arc_segments: 4,
            ..HighwayConfig::default()
        };
        assert_eq!(cfg.arc_segments(), MIN_ARC_SEGMENTS);
        assert_eq!(highway_mesh(&record(), &floor(), &cfg).triangle_count(), 2 * (6 + 3 * 16));
    }

    #[test]
    fn quads_are_wound_b_a_c_c_a_d() {
        let mesh = highway_mesh(&record(), &floor(), &HighwayConfig::default());
        // First quad: outer straight wall at x = 1.2 - 0.3.
        let p = &mesh.positions;
        let close = |a: [f32; 3], b: [f32; 3]| (0..3).all(|i| (a[i] - b[i]).abs() < 1e-6);
        assert!(close(p[0], [0.9, 0.075, 0.0]));
        assert!(close(p[1], [0.9, 0.075, 1.2]));
        assert!(close(p[2], [0.9, 0.125, 0.0]));
        assert_eq!(p[3], p[2]);
        assert_eq!(p[4], p[1]);
        assert!(close(p[5], [0.9, 0.125, 1.2]));
    }

    #[test]
    fn arc_joins_both_straight_runs() {
        let mesh = highway_mesh(&record(), &floor(), &HighwayConfig::default());
        let close = |a: [f32; 3], b: [f32; 3]| (0..3).all(|i| (a[i] - b[i]).abs() < 1e-5);
        // First arc deck quad starts at 90 degrees: (xc, f, zc + r).
        let arc = &mesh.positions[18..24];
        assert!(close(arc[1], [1.2, 0.1, 1.4]));
        // Last arc deck quad ends at 180 degrees: (xc - r, f, zc).
        let last = 18 + 21 * 18;
        let deck = &mesh.positions[last..last + 6];
        assert!(close(deck[5], [1.0, 0.1, 1.2]));
    }

    #[test]
    fn highway_spawns_double_sided_road_and_label() {
        let mut world = World::new();
        let mut text = EstimatedTextRenderer::new();
        let palette = Palette::default();
        let hw = Highway::build(
            &mut world,
            &mut text,
            &record(),
            &floor(),
            &HighwayConfig::default(),
            &palette,
        );
        let road = world.get(hw.road).unwrap();
        assert_eq!(road.material.side, Side::Double);
        assert_eq!(road.material.color, palette.dark_grey);
        assert_eq!(text.rasters()[0].params.font_size, 25.0);
        let label = world.get(hw.label).unwrap();
        assert!((label.transform.position.y - 0.11).abs() < 1e-12);
        assert_eq!(hw.base().identity.label, "Route 1");
    }
}
