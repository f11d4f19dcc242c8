use camera::CameraPose;
use foundation::geo::GeoRectangle;
use formats::{FeatureRecord, PolygonCatalog};
use scene::{NodeId, World};

use crate::assets::{AssetPayload, AssetResponse};
use crate::config::FieldConfig;
use crate::detail::{DetailObject, footprint};
use crate::feature::{FieldContext, FieldObject, FieldObjectBase};
use crate::label_plate::{LabelPlate, LabelPlateSpec};
use crate::lod::{LodConfig, lod_state};
use crate::plane::draw_plane;
use crate::sprite_panel::SpritePanel;
use crate::text::TextRenderer;

const TILE_HEIGHT: f64 = 0.01;

/// Flat labelled tile for a shop or facility, with an optional photo panel
/// and a pitch-gated detail model.
pub struct Place {
    pub base: FieldObjectBase,
    footprint: GeoRectangle,
    tile: NodeId,
    plate: Option<LabelPlate>,
    panel: Option<SpritePanel>,
    detail: Option<DetailObject>,
    lod: LodConfig,
}

impl Place {
    pub fn build(
        cx: &mut FieldContext<'_>,
        text: &mut dyn TextRenderer,
        record: &FeatureRecord,
        catalog: &PolygonCatalog,
        config: &FieldConfig,
    ) -> Self {
        let palette = &config.palette;
        let footprint = footprint(record);
        let tile = draw_plane(cx.world, footprint.p1, footprint.p2, TILE_HEIGHT, palette.light_grey);
        let mut base = FieldObjectBase::new(record);
        let mut plate = None;
        let mut detail = None;

        if record.invisible {
            if let Some(node) = cx.world.get_mut(tile) {
                node.material.visible = false;
            }
        } else {
            let p = LabelPlate::build(
                cx.world,
                text,
                &LabelPlateSpec {
                    x1: record.x[0],
                    x2: record.x[1],
                    z1: record.y[0],
                    z2: record.y[1],
                    y: TILE_HEIGHT + 0.001,
                    label: record.label.clone(),
                    font_size: record.font_size,
                    background: palette.light_grey,
                },
                palette,
            );
            base.add_bounding_box(p.basement);
            plate = Some(p);
            base.init_overlay(cx.world, &footprint, TILE_HEIGHT + 0.003, palette);
            base.init_hover(cx.world, &footprint, TILE_HEIGHT + 0.003, palette);

            if let Some(entry) = catalog.get(&record.lod2).filter(|_| !record.lod2.is_empty()) {
                let mut d = DetailObject::build(cx.world, text, record, &record.lod2, entry, palette);
                base.add_bounding_box(d.sprite());
                d.request_model(cx);
                detail = Some(d);
            }
        }

        let panel = (!record.image.is_empty()).then(|| {
            let panel = SpritePanel::new(
                cx.world,
                text,
                record.image.clone(),
                config.loading_icon.as_deref(),
                palette,
            );
            let (x, z) = cx
                .world
                .get(tile)
                .map(|n| (n.transform.position.x, n.transform.position.z))
                .unwrap_or_else(|| record.center());
            panel.set_position(cx.world, x, z);
            panel
        });

        Place {
            base,
            footprint,
            tile,
            plate,
            panel,
            detail,
            lod: config.lod.clone(),
        }
    }

    pub fn footprint(&self) -> &GeoRectangle {
        &self.footprint
    }

    pub fn tile(&self) -> NodeId {
        self.tile
    }

    pub fn plate(&self) -> Option<&LabelPlate> {
        self.plate.as_ref()
    }

    pub fn panel(&self) -> Option<&SpritePanel> {
        self.panel.as_ref()
    }

    pub fn detail(&self) -> Option<&DetailObject> {
        self.detail.as_ref()
    }
}

impl FieldObject for Place {
    fn base(&self) -> &FieldObjectBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut FieldObjectBase {
        &mut self.base
    }

    fn show_overlay(&mut self, cx: &mut FieldContext<'_>) {
        if let Some(id) = self.base.overlay() {
            cx.world.set_visible(id, true);
        }
        if let Some(panel) = self.panel.as_mut() {
            panel.show(cx);
        }
    }

    fn hide_overlay(&mut self, world: &mut World) {
        if let Some(id) = self.base.overlay() {
            world.set_visible(id, false);
        }
        if let Some(panel) = &self.panel {
            panel.hide(world);
        }
    }

    fn on_camera_pose(&mut self, world: &mut World, pose: &CameraPose) {
        let Some(detail) = &self.detail else {
            return;
        };
        let state = lod_state(
            &self.lod,
            pose.polar_deg,
            detail.lod_scale(),
            &self.footprint,
            pose.position,
        );
        detail.apply_lod(world, state);
    }

    fn resolve_asset(&mut self, world: &mut World, response: AssetResponse) -> bool {
        match response.payload {
            AssetPayload::Image(handle) => self
                .panel
                .as_ref()
                .is_some_and(|p| p.resolve(world, response.ticket, handle)),
            AssetPayload::Model(model) => self
                .detail
                .as_mut()
                .is_some_and(|d| d.replace_with_model(world, response.ticket, model)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetKind, AssetQueue};
    use crate::text::EstimatedTextRenderer;
    use foundation::math::Vec3;
    use formats::PolygonEntry;
    use pretty_assertions::assert_eq;
    use scene::components::{ModelAsset, TextureHandle};

    fn record() -> FeatureRecord {
        FeatureRecord {
            feature_type: "place".into(),
            label: "Cafe".into(),
            x: [0.0, 0.2],
            y: [0.0, 0.2],
            ..FeatureRecord::default()
        }
    }

    fn catalog() -> PolygonCatalog {
        let mut c = PolygonCatalog::new();
        c.insert(
            "cafe",
            PolygonEntry {
                scale: 2.0,
                y: None,
                rotate: 0.0,
                glb: String::new(),
            },
        );
        c
    }

    fn build(world: &mut World, assets: &mut AssetQueue, record: &FeatureRecord) -> Place {
        let mut text = EstimatedTextRenderer::new();
        let mut cx = FieldContext {
            world,
            assets,
            feature: 0,
        };
        Place::build(&mut cx, &mut text, record, &catalog(), &FieldConfig::default())
    }

    fn pose(polar: f64, position: Vec3) -> CameraPose {
        CameraPose {
            polar_deg: polar,
            azimuth_deg: 0.0,
            distance: 1.0,
            position,
        }
    }

    #[test]
    fn plain_place_has_plate_and_overlays() {
        let mut world = World::new();
        let mut assets = AssetQueue::new();
        let place = build(&mut world, &mut assets, &record());
        assert!(place.plate().is_some());
        assert!(place.base.overlay().is_some());
        assert!(place.detail().is_none());
        assert!(place.panel().is_none());
        assert!(assets.drain().is_empty());
    }

    #[test]
    fn invisible_place_only_keeps_a_hidden_tile() {
        let mut world = World::new();
        let mut assets = AssetQueue::new();
        let r = FeatureRecord {
            invisible: true,
            lod2: "cafe".into(),
            ..record()
        };
        let place = build(&mut world, &mut assets, &r);
        assert_eq!(world.len(), 1);
        assert!(!world.get(place.tile()).unwrap().material.visible);
        assert!(place.plate().is_none());
        assert!(place.detail().is_none());
    }

    #[test]
    fn overlay_shows_the_photo_panel() {
        let mut world = World::new();
        let mut assets = AssetQueue::new();
        let r = FeatureRecord {
            image: "/img/cafe.jpg".into(),
            ..record()
        };
        let mut place = build(&mut world, &mut assets, &r);
        let pin = place.panel().unwrap().pin();
        assert_eq!(world.get(pin).unwrap().transform.position.x, 0.1);

        let mut cx = FieldContext {
            world: &mut world,
            assets: &mut assets,
            feature: 0,
        };
        place.show_overlay(&mut cx);
        assert!(world.is_visible(place.base.overlay().unwrap()));
        assert!(world.is_visible(pin));
        let ticket = assets.drain()[0].ticket;
        assert!(place.resolve_asset(&mut world, AssetResponse::image(ticket, TextureHandle(3))));

        place.hide_overlay(&mut world);
        assert!(!world.is_visible(pin));
    }

    #[test]
    fn detail_follows_camera_pitch() {
        let mut world = World::new();
        let mut assets = AssetQueue::new();
        let r = FeatureRecord {
            lod2: "cafe".into(),
            ..record()
        };
        let mut place = build(&mut world, &mut assets, &r);
        let requests = assets.drain();
        assert_eq!(
            requests[0].kind,
            AssetKind::DetailModel {
                id: "cafe".into()
            }
        );
        let sprite = place.detail().unwrap().sprite();
        assert_eq!(place.base.proxies().len(), 2);

        let outside = Vec3::new(1.0, 0.5, 1.0);
        place.on_camera_pose(&mut world, &pose(59.0, outside));
        assert!(!world.is_visible(place.detail().unwrap().building()));

        let model = ModelAsset {
            name: "cafe".into(),
            bytes: vec![0],
        };
        assert!(place.resolve_asset(&mut world, AssetResponse::model(requests[0].ticket, model)));
        assert_eq!(place.detail().unwrap().lod_scale(), 2.0);

        place.on_camera_pose(&mut world, &pose(61.0, outside));
        let building = place.detail().unwrap().building();
        assert!(world.is_visible(building));
        assert!(world.is_visible(sprite));
        assert!((world.get(building).unwrap().transform.scale.x - 0.4).abs() < 1e-12);

        place.on_camera_pose(&mut world, &pose(70.0, Vec3::new(0.1, 0.5, 0.1)));
        assert!(!world.is_visible(building));
        assert!(!world.is_visible(sprite));
    }
}
