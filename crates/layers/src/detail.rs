use foundation::color::Palette;
use foundation::geo::{GeoPoint, GeoRectangle};
use foundation::math::Vec3;
use formats::{FeatureRecord, PolygonEntry};
use scene::components::{Geometry, Material, ModelAsset, Shading, Texture, Transform};
use scene::{Node, NodeId, World};
use tracing::{debug, error};

use crate::assets::{AssetKind, LoadTicket};
use crate::feature::FieldContext;
use crate::lod::LodState;
use crate::plane::draw_plane;
use crate::text::{LabelTextureParams, TextDirection, TextRenderer};

const PLACEHOLDER_HEIGHT: f64 = 0.04;
const LABEL_HEIGHT: f64 = 0.02;
const LABEL_MEASURE_FONT: f64 = 12.0;
const LABEL_RASTER_FONT: f64 = 10.0;
const LABEL_LIFT: f64 = 0.03;

/// Pitch-gated stand-in for a place: a grey block until the catalog model
/// arrives, plus a floating name tag.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailObject {
    id: String,
    entry: PolygonEntry,
    building: NodeId,
    sprite: NodeId,
    lod_scale: f64,
    ticket: Option<LoadTicket>,
}

impl DetailObject {
    pub fn build(
        world: &mut World,
        text: &mut dyn TextRenderer,
        record: &FeatureRecord,
        id: &str,
        entry: &PolygonEntry,
        palette: &Palette,
    ) -> Self {
        let building = draw_plane(
            world,
            GeoPoint::new(record.x[0], record.y[0]),
            GeoPoint::new(record.x[1], record.y[1]),
            PLACEHOLDER_HEIGHT,
            palette.light_grey,
        );
        world.set_visible(building, false);

        let (mx, mz) = record.center();
        let sprite = spawn_label_sprite(world, text, &record.label, palette);
        if let Some(node) = world.get_mut(sprite) {
            node.transform.position = Vec3::new(mx, LABEL_LIFT, mz);
            node.visible = false;
        }

        DetailObject {
            id: id.to_string(),
            entry: entry.clone(),
            building,
            sprite,
            lod_scale: 1.0,
            ticket: None,
        }
    }

    /// Current block or model node.
    pub fn building(&self) -> NodeId {
        self.building
    }

    pub fn sprite(&self) -> NodeId {
        self.sprite
    }

    pub fn lod_scale(&self) -> f64 {
        self.lod_scale
    }

    /// Queue the catalog model; a later request supersedes an earlier one.
    pub fn request_model(&mut self, cx: &mut FieldContext<'_>) {
        let ticket = cx.assets.request(cx.feature, AssetKind::DetailModel { id: self.id.clone() });
        self.ticket = Some(ticket);
    }

    pub fn is_waiting_for(&self, ticket: LoadTicket) -> bool {
        self.ticket == Some(ticket)
    }

    /// Replace the placeholder block with the loaded model.
    pub fn replace_with_model(&mut self, world: &mut World, ticket: LoadTicket, model: ModelAsset) -> bool {
        if !self.is_waiting_for(ticket) {
            debug!(id = %self.id, ?ticket, "stale detail model ignored");
            return false;
        }
        self.ticket = None;

        let (position, visible) = match world.despawn(self.building) {
            Some(old) => (old.transform.position, old.visible),
            None => (Vec3::ZERO, false),
        };
        let mut transform = Transform::translate(position);
        transform.set_uniform_scale(self.entry.scale);
        transform.rotate_y(self.entry.rotate.to_radians());
        if let Some(y) = self.entry.y {
            transform.position.y = y;
        }
        let mut node = Node::new(Geometry::Model(model), Material::none()).with_transform(transform);
        node.visible = visible;
        self.building = world.spawn(node);
        self.lod_scale = self.entry.scale;
        true
    }

    /// Write `state` to the scene, touching only what differs.
    pub fn apply_lod(&self, world: &mut World, state: LodState) {
        if let Some(node) = world.get_mut(self.building) {
            if node.transform.scale.x != state.scale {
                node.transform.set_uniform_scale(state.scale);
            }
        }
        if world.get(self.building).is_some_and(|n| n.visible != state.visible) {
            world.set_visible(self.building, state.visible);
            world.set_visible(self.sprite, state.visible);
        }
    }
}

/// Name tag sized from the text's aspect. An empty label yields a
/// zero-scaled sprite.
fn spawn_label_sprite(world: &mut World, text: &mut dyn TextRenderer, label: &str, palette: &Palette) -> NodeId {
    let mut transform = Transform::identity();
    let mut material = Material {
        shading: Shading::Sprite,
        ..Material::basic(palette.white)
    }
    .without_depth_test();

    if label.is_empty() {
        transform.set_uniform_scale(0.0);
        return world.spawn(Node::new(Geometry::Sprite, material).with_transform(transform));
    }

    let metrics = text.measure(label, LABEL_MEASURE_FONT);
    let aspect = if metrics.ascent >= 0.01 {
        metrics.width / metrics.ascent
    } else {
        1.0
    };
    let params = LabelTextureParams::new(LABEL_HEIGHT * aspect, LABEL_HEIGHT, LABEL_RASTER_FONT, palette)
        .with_colors(palette.white, Some(palette.dark_grey));
    match text.rasterize(label, &params, TextDirection::Horizontal) {
        Ok(handle) => material.map = Some(Texture::Raster(handle)),
        Err(err) => error!(label, %err, "detail label raster failed"),
    }
    transform.scale = Vec3::new(LABEL_HEIGHT * aspect, LABEL_HEIGHT, 1.0);
    world.spawn(Node::new(Geometry::Sprite, material).with_transform(transform))
}

/// Footprint of a record on the ground plane.
pub fn footprint(record: &FeatureRecord) -> GeoRectangle {
    GeoRectangle::new(
        GeoPoint::new(record.x[0], record.y[0]),
        GeoPoint::new(record.x[1], record.y[1]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetQueue;
    use crate::text::EstimatedTextRenderer;
    use pretty_assertions::assert_eq;

    fn record(label: &str) -> FeatureRecord {
        FeatureRecord {
            feature_type: "place".into(),
            label: label.into(),
            x: [0.0, 0.2],
            y: [0.0, 0.4],
            lod2: "tower".into(),
            ..FeatureRecord::default()
        }
    }

    fn entry() -> PolygonEntry {
        PolygonEntry {
            scale: 0.5,
            y: Some(0.02),
            rotate: 90.0,
            glb: String::new(),
        }
    }

    fn detail(world: &mut World, label: &str) -> DetailObject {
        let mut text = EstimatedTextRenderer::new();
        DetailObject::build(world, &mut text, &record(label), "tower", &entry(), &Palette::default())
    }

    #[test]
    fn placeholder_and_tag_start_hidden() {
        let mut world = World::new();
        let d = detail(&mut world, "Tower");
        assert!(!world.is_visible(d.building()));
        assert!(!world.is_visible(d.sprite()));
        let sprite = world.get(d.sprite()).unwrap();
        assert_eq!(sprite.transform.position, Vec3::new(0.1, 0.03, 0.2));
        // Estimated metrics: aspect = 0.6 * 5 / 0.8.
        assert!((sprite.transform.scale.x - 0.02 * 3.75).abs() < 1e-12);
        assert!(!sprite.material.depth_test);
        assert_eq!(d.lod_scale(), 1.0);
    }

    #[test]
    fn empty_label_gives_collapsed_sprite() {
        let mut world = World::new();
        let d = detail(&mut world, "");
        assert!(world.get(d.sprite()).unwrap().transform.is_collapsed());
    }

    #[test]
    fn model_replaces_placeholder() {
        let mut world = World::new();
        let mut assets = AssetQueue::new();
        let mut d = detail(&mut world, "Tower");
        let old = d.building();
        let mut cx = FieldContext {
            world: &mut world,
            assets: &mut assets,
            feature: 1,
        };
        d.request_model(&mut cx);
        let ticket = assets.drain()[0].ticket;

        let model = ModelAsset {
            name: "tower".into(),
            bytes: vec![1, 2, 3],
        };
        assert!(d.replace_with_model(&mut world, ticket, model.clone()));
        assert!(!world.contains(old));
        let node = world.get(d.building()).unwrap();
        assert_eq!(node.geometry, Geometry::Model(model.clone()));
        assert_eq!(node.transform.scale, Vec3::splat(0.5));
        assert_eq!(node.transform.position, Vec3::new(0.1, 0.02, 0.2));
        assert!((node.transform.rotation.y - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert_eq!(d.lod_scale(), 0.5);

        // The same ticket does not apply twice.
        assert!(!d.replace_with_model(&mut world, ticket, model));
    }

    #[test]
    fn superseded_request_is_ignored() {
        let mut world = World::new();
        let mut assets = AssetQueue::new();
        let mut d = detail(&mut world, "Tower");
        let mut cx = FieldContext {
            world: &mut world,
            assets: &mut assets,
            feature: 0,
        };
        d.request_model(&mut cx);
        d.request_model(&mut cx);
        let requests = assets.drain();
        let model = ModelAsset {
            name: "tower".into(),
            bytes: vec![],
        };
        assert!(!d.replace_with_model(&mut world, requests[0].ticket, model.clone()));
        assert!(d.replace_with_model(&mut world, requests[1].ticket, model));
    }

    #[test]
    fn lod_writes_scale_and_visibility_together() {
        let mut world = World::new();
        let d = detail(&mut world, "Tower");
        d.apply_lod(
            &mut world,
            LodState {
                scale: 0.4,
                visible: true,
            },
        );
        assert!(world.is_visible(d.building()));
        assert!(world.is_visible(d.sprite()));
        assert_eq!(world.get(d.building()).unwrap().transform.scale, Vec3::splat(0.4));
    }
}
