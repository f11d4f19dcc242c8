use std::f64::consts::{FRAC_PI_2, PI};

use foundation::geo::{GeoPoint, GeoRectangle};
use foundation::math::Vec3;
use formats::{FeatureKind, FeatureRecord, PolygonCatalog};
use scene::components::{CylinderSpec, Geometry, Material, PickTag, Transform};
use scene::{Node, NodeId, World};
use tracing::info;

use crate::building::Building;
use crate::config::FieldConfig;
use crate::detail::footprint;
use crate::feature::{FieldContext, FieldObject, FieldObjectBase, MapFeature};
use crate::highway::Highway;
use crate::place::Place;
use crate::plane::{draw_plane, draw_texture_plane};
use crate::registry::FieldRegistry;
use crate::text::TextRenderer;
use crate::walls::{boundary_walls, east_wall_panel};

const FLOOR_HEIGHT: f64 = 0.005;
const STREET_HEIGHT: f64 = 0.01;
const STREET_LABEL_Y: f64 = 0.015;
const ARCADE_RADIUS: f64 = 0.015;
const ARCADE_SEGMENTS: u32 = 20;
const ARCADE_Y: f64 = 0.02;

/// Scene built from one diagram.
pub struct BuiltField {
    pub registry: FieldRegistry,
    pub floor: GeoRectangle,
}

/// Floor extent: the last `floor` record, or the unit square.
pub fn floor_extent(records: &[FeatureRecord]) -> GeoRectangle {
    records
        .iter()
        .rev()
        .find(|r| r.kind() == FeatureKind::Floor)
        .map(footprint)
        .unwrap_or_default()
}

/// Generate every record into `world` in order and register the resulting
/// features. `progress(i, total)` runs before record `i` is generated.
pub fn build_field<P>(
    world: &mut World,
    text: &mut dyn TextRenderer,
    records: &[FeatureRecord],
    catalog: &PolygonCatalog,
    config: &FieldConfig,
    mut progress: P,
) -> BuiltField
where
    P: FnMut(usize, usize),
{
    let floor = floor_extent(records);
    let palette = &config.palette;
    let mut registry = FieldRegistry::new();
    let nodes_before = world.len();

    for (i, record) in records.iter().enumerate() {
        progress(i, records.len());
        let slot = registry.next_slot();

        let feature = match record.kind() {
            FeatureKind::Highway => MapFeature::Highway(Highway::build(
                world,
                text,
                record,
                &floor,
                &config.highway,
                palette,
            )),
            FeatureKind::Place | FeatureKind::YPlace => {
                let mut cx = FieldContext {
                    world: &mut *world,
                    assets: registry.assets_mut(),
                    feature: slot,
                };
                MapFeature::Place(Place::build(&mut cx, text, record, catalog, config))
            }
            FeatureKind::XBuilding | FeatureKind::YBuilding => {
                MapFeature::Building(Building::build(world, text, record, palette))
            }
            kind => {
                build_scenery(world, text, record, &kind, config);
                MapFeature::Generic(FieldObjectBase::new(record))
            }
        };

        let tag = PickTag::clickable(record.feature_type.clone(), record.label.clone());
        feature.base().set_pick_tag(world, &tag);
        registry.push(feature);
    }

    info!(
        records = records.len(),
        features = registry.len(),
        nodes = world.len() - nodes_before,
        "field built"
    );
    BuiltField { registry, floor }
}

/// Geometry for records that carry no interactive state.
fn build_scenery(
    world: &mut World,
    text: &mut dyn TextRenderer,
    record: &FeatureRecord,
    kind: &FeatureKind,
    config: &FieldConfig,
) {
    let palette = &config.palette;
    let rect = footprint(record);
    match kind {
        FeatureKind::Floor => {
            boundary_walls(world, &rect, palette);
            if let Some(url) = &config.east_wall_texture {
                east_wall_panel(world, &rect, url, palette);
            }
            draw_plane(world, rect.p1, rect.p2, FLOOR_HEIGHT, palette.floor_base);
        }
        FeatureKind::XStreet | FeatureKind::YStreet => {
            let street = street_plane(world, record, &rect, config);
            if record.height != 0.0 {
                if let Some(node) = world.get_mut(street) {
                    node.transform.translate_by(Vec3::new(0.0, record.height, 0.0));
                }
            }
        }
        FeatureKind::StreetLabel => {
            let id = draw_texture_plane(
                world,
                text,
                &record.label,
                rect.p1,
                rect.p2,
                STREET_LABEL_Y,
                record.font_size,
                palette,
            );
            if let Some(node) = world.get_mut(id) {
                node.pick = Some(PickTag::clickable("street-label", record.label.clone()));
            }
        }
        FeatureKind::XStreetStore => {
            let street = street_plane(world, record, &rect, config);
            let length = (record.x[0] - record.x[1]).abs();
            spawn_arcade(world, street, length, 0.0, config, |t| t.rotate_z(FRAC_PI_2));
        }
        FeatureKind::YStreetStore => {
            let street = street_plane(world, record, &rect, config);
            let length = (record.y[0] - record.y[1]).abs();
            spawn_arcade(world, street, length, FRAC_PI_2, config, |t| t.rotate_x(FRAC_PI_2));
        }
        _ => {}
    }
}

fn street_plane(world: &mut World, record: &FeatureRecord, rect: &GeoRectangle, config: &FieldConfig) -> NodeId {
    let id = draw_plane(world, rect.p1, rect.p2, STREET_HEIGHT, config.palette.road_base);
    if record.rotate != 0.0 {
        if let Some(node) = world.get_mut(id) {
            node.transform.rotate_y(-record.rotate.to_radians());
        }
    }
    id
}

/// Half-pipe roof over a store street, laid along the street's axis.
fn spawn_arcade<F>(world: &mut World, street: NodeId, length: f64, theta_start: f64, config: &FieldConfig, orient: F)
where
    F: FnOnce(&mut Transform),
{
    let centre = world
        .get(street)
        .map(|n| GeoPoint::new(n.transform.position.x, n.transform.position.z))
        .unwrap_or(GeoPoint::new(0.0, 0.0));
    let geometry = Geometry::Cylinder(CylinderSpec {
        radius_top: ARCADE_RADIUS,
        radius_bottom: ARCADE_RADIUS,
        height: length,
        radial_segments: ARCADE_SEGMENTS,
        open_ended: true,
        theta_start,
        theta_length: PI,
    });
    let mut transform = Transform::translate(Vec3::new(centre.x, ARCADE_Y, centre.z));
    orient(&mut transform);
    world.spawn(Node::new(geometry, Material::standard(config.palette.arcade)).with_transform(transform));
}
