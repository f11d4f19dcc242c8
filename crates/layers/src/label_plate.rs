use foundation::color::{Color, Palette};
use scene::components::{Geometry, Material, MeshData, Texture};
use scene::{Node, NodeId, World};
use tracing::error;

use crate::error::LabelError;
use crate::plane::{rectangle_to_vertex, spawn_placeholder};
use crate::text::{LabelTextureParams, TextMetrics, TextRenderer};

/// World size of a 17pt glyph.
const GL_FONT_17: f64 = 0.033;

/// UVs matching the vertex order of [`rectangle_to_vertex`].
const PLATE_UVS: [[f32; 2]; 6] = [
    [0.0, 0.0],
    [1.0, 0.0],
    [0.0, 1.0],
    [1.0, 1.0],
    [0.0, 1.0],
    [1.0, 0.0],
];

pub fn font_size_to_world(font_size: f64) -> f64 {
    GL_FONT_17 * (font_size / 17.0)
}

/// Footprint and text of one label plate.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPlateSpec {
    pub x1: f64,
    pub x2: f64,
    pub z1: f64,
    pub z2: f64,
    pub y: f64,
    pub label: String,
    pub font_size: f64,
    pub background: Color,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LabelFit {
    /// Text fits along the footprint at its natural size.
    Natural,
    /// Text overflows both sides and is scaled down to the longer side.
    Shrunk,
    /// Text only fits across the longer footprint side.
    Rotated,
}

/// Size of the text panel and its offset inside the footprint.
///
/// `width` runs along world z, `height` along world x.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LabelLayout {
    pub fit: LabelFit,
    pub width: f64,
    pub height: f64,
    pub x_offset: f64,
    pub z_offset: f64,
}

/// Choose the text panel size for a footprint of `basement_width` (z) by
/// `basement_height` (x).
pub fn fit_label(
    metrics: TextMetrics,
    font_size: f64,
    basement_width: f64,
    basement_height: f64,
) -> Result<LabelLayout, LabelError> {
    if !(metrics.ascent > 0.0 && metrics.ascent.is_finite() && metrics.width.is_finite()) {
        return Err(LabelError::DegenerateMetrics {
            width: metrics.width,
            ascent: metrics.ascent,
        });
    }
    let aspect = metrics.width / metrics.ascent;
    let gl_font = font_size_to_world(font_size);
    let mut width = gl_font * aspect;
    let mut height = gl_font;

    let fit = if basement_width < width && basement_height < width {
        let a = width / basement_width.max(basement_height);
        if basement_width < basement_height {
            width = height * a;
            height = basement_height;
        } else {
            width = basement_width;
            height *= a;
        }
        LabelFit::Shrunk
    } else if basement_width < basement_height {
        std::mem::swap(&mut width, &mut height);
        LabelFit::Rotated
    } else {
        LabelFit::Natural
    };

    Ok(LabelLayout {
        fit,
        width,
        height,
        x_offset: (basement_height - height) / 2.0,
        z_offset: (basement_width - width) / 2.0,
    })
}

/// Text panel over a solid basement covering the whole footprint.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPlate {
    pub plane: NodeId,
    pub basement: NodeId,
    /// `None` when construction failed and both nodes are placeholders.
    pub layout: Option<LabelLayout>,
}

impl LabelPlate {
    pub fn build(
        world: &mut World,
        text: &mut dyn TextRenderer,
        spec: &LabelPlateSpec,
        palette: &Palette,
    ) -> Self {
        match Self::try_build(world, text, spec, palette) {
            Ok(plate) => plate,
            Err(err) => {
                error!(label = %spec.label, %err, "label plate construction failed");
                LabelPlate {
                    plane: spawn_placeholder(world),
                    basement: spawn_placeholder(world),
                    layout: None,
                }
            }
        }
    }

    fn try_build(
        world: &mut World,
        text: &mut dyn TextRenderer,
        spec: &LabelPlateSpec,
        palette: &Palette,
    ) -> Result<Self, LabelError> {
        let metrics = text.measure(&spec.label, spec.font_size);
        let basement_width = (spec.z1 - spec.z2).abs();
        let basement_height = (spec.x1 - spec.x2).abs();
        let layout = fit_label(metrics, spec.font_size, basement_width, basement_height)?;

        let params = LabelTextureParams::new(layout.width, layout.height, spec.font_size, palette)
            .with_colors(palette.text, Some(spec.background));
        let handle = text.rasterize(&spec.label, &params, params.natural_direction())?;

        let x1 = spec.x1 + layout.x_offset;
        let z1 = spec.z1 + layout.z_offset;
        let positions = rectangle_to_vertex(x1, x1 + layout.height, z1, z1 + layout.width, spec.y + 0.0001);
        let mesh = MeshData::triangles(positions).with_uvs(PLATE_UVS.to_vec());
        let plane = world.spawn(Node::new(
            Geometry::Mesh(mesh),
            Material::basic(palette.white).with_map(Texture::Raster(handle)),
        ));

        let basement_mesh = MeshData::triangles(rectangle_to_vertex(spec.x1, spec.x2, spec.z1, spec.z2, spec.y));
        let basement = world.spawn(Node::new(Geometry::Mesh(basement_mesh), Material::basic(spec.background)));

        Ok(LabelPlate {
            plane,
            basement,
            layout: Some(layout),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::EstimatedTextRenderer;
    use pretty_assertions::assert_eq;

    fn metrics(aspect: f64) -> TextMetrics {
        TextMetrics {
            width: aspect * 10.0,
            ascent: 10.0,
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn short_text_keeps_natural_size() {
        let layout = fit_label(metrics(2.0), 17.0, 0.2, 0.1).unwrap();
        assert_eq!(layout.fit, LabelFit::Natural);
        assert!(close(layout.width, 0.066));
        assert!(close(layout.height, 0.033));
        assert!(close(layout.z_offset, (0.2 - 0.066) / 2.0));
        assert!(close(layout.x_offset, (0.1 - 0.033) / 2.0));
    }

    #[test]
    fn portrait_footprint_rotates_text() {
        let layout = fit_label(metrics(2.0), 17.0, 0.05, 0.2).unwrap();
        assert_eq!(layout.fit, LabelFit::Rotated);
        assert!(close(layout.width, 0.033));
        assert!(close(layout.height, 0.066));
    }

    #[test]
    fn overflowing_landscape_text_is_shrunk_to_width() {
        // Natural width 0.33 overflows both 0.2 and 0.1.
        let layout = fit_label(metrics(10.0), 17.0, 0.2, 0.1).unwrap();
        assert_eq!(layout.fit, LabelFit::Shrunk);
        assert!(close(layout.width, 0.2));
        assert!(close(layout.height, 0.033 * (0.33 / 0.2)));
    }

    #[test]
    fn overflowing_portrait_text_fills_height() {
        let layout = fit_label(metrics(10.0), 17.0, 0.1, 0.2).unwrap();
        assert_eq!(layout.fit, LabelFit::Shrunk);
        assert!(close(layout.height, 0.2));
        assert!(close(layout.width, 0.033 * (0.33 / 0.2)));
    }

    #[test]
    fn zero_ascent_is_degenerate() {
        let err = fit_label(TextMetrics { width: 3.0, ascent: 0.0 }, 17.0, 1.0, 1.0).unwrap_err();
        assert_eq!(err, LabelError::DegenerateMetrics { width: 3.0, ascent: 0.0 });
    }

    fn spec() -> LabelPlateSpec {
        LabelPlateSpec {
            x1: 0.0,
            x2: 0.1,
            z1: 0.0,
            z2: 0.3,
            y: 0.051,
            label: "Cafe".into(),
            font_size: 17.0,
            background: Palette::default().light_grey,
        }
    }

    #[test]
    fn plate_spawns_text_panel_over_basement() {
        let mut world = World::new();
        let mut text = EstimatedTextRenderer::new();
        let plate = LabelPlate::build(&mut world, &mut text, &spec(), &Palette::default());
        assert_eq!(world.len(), 2);

        let basement = world.get(plate.basement).unwrap();
        assert_eq!(basement.material.color, Palette::default().light_grey);
        let bounds = basement.world_bounds().unwrap();
        assert!(close(bounds.max[2], 0.3));

        let panel = world.get(plate.plane).unwrap();
        match &panel.geometry {
            Geometry::Mesh(mesh) => {
                assert_eq!(mesh.vertex_count(), 6);
                assert_eq!(mesh.uvs.as_ref().map(Vec::len), Some(6));
                assert!((mesh.positions[0][1] - 0.0511).abs() < 1e-6);
            }
            other => panic!("unexpected geometry {other:?}"),
        }
        assert_eq!(text.rasters()[0].params.background, Some(Palette::default().light_grey));
    }

    struct FlatFont;

    impl TextRenderer for FlatFont {
        fn measure(&self, _: &str, _: f64) -> TextMetrics {
            TextMetrics { width: 1.0, ascent: 0.0 }
        }

        fn rasterize(
            &mut self,
            _: &str,
            _: &LabelTextureParams,
            _: crate::text::TextDirection,
        ) -> Result<scene::components::TextureHandle, LabelError> {
            unreachable!("metrics fail first")
        }
    }

    #[test]
    fn failed_plate_spawns_zero_scaled_placeholders() {
        let mut world = World::new();
        let plate = LabelPlate::build(&mut world, &mut FlatFont, &spec(), &Palette::default());
        assert_eq!(plate.layout, None);
        assert!(world.get(plate.plane).unwrap().transform.is_collapsed());
        assert!(world.get(plate.basement).unwrap().transform.is_collapsed());
    }
}
