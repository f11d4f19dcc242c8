use foundation::color::Palette;
use foundation::geo::{GeoPoint, GeoRectangle};
use formats::FeatureRecord;
use scene::{NodeId, World};

use crate::feature::{FieldObject, FieldObjectBase};
use crate::label_plate::{LabelPlate, LabelPlateSpec};
use crate::plane::draw_plane;
use crate::text::TextRenderer;

pub const BUILDING_HEIGHT: f64 = 0.05;

/// Brown block with a label plate on its roof.
pub struct Building {
    pub base: FieldObjectBase,
    pub block: NodeId,
    pub plate: LabelPlate,
}

impl Building {
    pub fn build(
        world: &mut World,
        text: &mut dyn TextRenderer,
        record: &FeatureRecord,
        palette: &Palette,
    ) -> Self {
        let footprint = GeoRectangle::new(
            GeoPoint::new(record.x[0], record.y[0]),
            GeoPoint::new(record.x[1], record.y[1]),
        );
        let block = draw_plane(world, footprint.p1, footprint.p2, BUILDING_HEIGHT, palette.building_base);

        let plate = LabelPlate::build(
            world,
            text,
            &LabelPlateSpec {
                x1: record.x[0],
                x2: record.x[1],
                z1: record.y[0],
                z2: record.y[1],
                y: BUILDING_HEIGHT + 0.001,
                label: record.label.clone(),
                font_size: record.font_size,
                background: palette.light_grey,
            },
            palette,
        );

        let mut base = FieldObjectBase::new(record);
        base.add_bounding_box(plate.basement);
        base.init_overlay(world, &footprint, BUILDING_HEIGHT + 0.003, palette);
        base.init_hover(world, &footprint, BUILDING_HEIGHT + 0.003, palette);

        Building { base, block, plate }
    }
}

impl FieldObject for Building {
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

    #[test]
    fn building_is_a_block_plate_and_two_sheets() {
        let mut world = World::new();
        let mut text = EstimatedTextRenderer::new();
        let palette = Palette::default();
        let record = FeatureRecord {
            feature_type: "x-building".into(),
            label: "Hall".into(),
            x: [0.0, 0.3],
            y: [0.0, 0.2],
            ..FeatureRecord::default()
        };
        let b = Building::build(&mut world, &mut text, &record, &palette);
        // block, plate panel, basement, overlay, hover
        assert_eq!(world.len(), 5);
        assert_eq!(world.get(b.block).unwrap().material.color, palette.building_base);
        assert_eq!(b.base.proxies(), &[b.plate.basement]);
        let overlay = world.get(b.base.overlay().unwrap()).unwrap();
        match &overlay.geometry {
            scene::components::Geometry::Mesh(mesh) => {
                assert!((mesh.positions[0][1] - 0.0531).abs() < 1e-6)
            }
            other => panic!("unexpected geometry {other:?}"),
        }
    }
}
