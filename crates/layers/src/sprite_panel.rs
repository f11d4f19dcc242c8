use foundation::color::{Color, Palette};
use foundation::math::Vec3;
use scene::components::{Geometry, Material, Shading, Texture, TextureHandle, Transform};
use scene::{Node, NodeId, World};
use tracing::{debug, error};

use crate::assets::{AssetKind, LoadTicket};
use crate::feature::FieldContext;
use crate::text::{LabelTextureParams, TextDirection, TextRenderer};

const PIN_WIDTH: f64 = 0.35;
const PIN_HEIGHT: f64 = PIN_WIDTH / 1.5;
const PIN_LIFT: f64 = 0.05;
const IMAGE_LIFT: f64 = 0.03;
const IMAGE_LOADING_SCALE: f64 = 0.05;
const IMAGE_WIDTH: f64 = 0.32;
const IMAGE_ASPECT: f64 = 210.0 / 400.0;
const ATTRIBUTION: &str = "Map data ©2019 Google";

/// Billboard photo on a dark pin, shown while its place is selected.
///
/// The photo is fetched on the first `show`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpritePanel {
    pin: NodeId,
    image: NodeId,
    url: String,
    ticket: Option<LoadTicket>,
}

impl SpritePanel {
    pub fn new(
        world: &mut World,
        text: &mut dyn TextRenderer,
        url: impl Into<String>,
        loading_icon: Option<&str>,
        palette: &Palette,
    ) -> Self {
        let mut pin_material = Material {
            shading: Shading::Sprite,
            ..Material::basic(palette.white)
        }
        .without_depth_test();
        let params = LabelTextureParams::new(0.3, 0.2, 5.0, palette)
            .with_colors(palette.white, Some(Color::rgba(40, 40, 40, 0.85)));
        match text.rasterize(ATTRIBUTION, &params, TextDirection::Horizontal) {
            Ok(handle) => pin_material.map = Some(Texture::Raster(handle)),
            Err(err) => error!(%err, "pin basement raster failed"),
        }
        let mut pin_transform = Transform::identity();
        pin_transform.scale = Vec3::new(PIN_WIDTH, PIN_HEIGHT, PIN_WIDTH);
        let pin = world.spawn(
            Node::new(Geometry::Sprite, pin_material)
                .with_transform(pin_transform)
                .hidden(),
        );

        let mut image_material = Material {
            shading: Shading::Sprite,
            ..Material::basic(palette.white)
        }
        .without_depth_test();
        image_material.map = loading_icon.map(|u| Texture::Url(u.to_string()));
        let mut image_transform = Transform::identity();
        image_transform.scale = Vec3::new(IMAGE_LOADING_SCALE, IMAGE_LOADING_SCALE, IMAGE_WIDTH);
        let image = world.spawn(
            Node::new(Geometry::Sprite, image_material)
                .with_transform(image_transform)
                .hidden(),
        );

        SpritePanel {
            pin,
            image,
            url: url.into(),
            ticket: None,
        }
    }

    pub fn pin(&self) -> NodeId {
        self.pin
    }

    pub fn image(&self) -> NodeId {
        self.image
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn is_load_requested(&self) -> bool {
        self.ticket.is_some()
    }

    /// Stand the pin on the ground at `(x, z)` with the photo above it.
    pub fn set_position(&self, world: &mut World, x: f64, z: f64) {
        let mut pin_top = PIN_LIFT;
        if let Some(pin) = world.get_mut(self.pin) {
            pin_top += pin.transform.scale.y * 0.5;
            pin.transform.position = Vec3::new(x, pin_top, z);
        }
        if let Some(image) = world.get_mut(self.image) {
            image.transform.position = Vec3::new(x, pin_top + IMAGE_LIFT, z);
        }
    }

    pub fn show(&mut self, cx: &mut FieldContext<'_>) {
        cx.world.set_visible(self.pin, true);
        cx.world.set_visible(self.image, true);
        if self.ticket.is_none() {
            let ticket = cx.assets.request(cx.feature, AssetKind::Image { url: self.url.clone() });
            debug!(url = %self.url, ?ticket, "panel image requested");
            self.ticket = Some(ticket);
        }
    }

    pub fn hide(&self, world: &mut World) {
        world.set_visible(self.pin, false);
        world.set_visible(self.image, false);
    }

    /// Swap in the loaded photo. Ignores tickets this panel did not issue.
    pub fn resolve(&self, world: &mut World, ticket: LoadTicket, handle: TextureHandle) -> bool {
        if self.ticket != Some(ticket) {
            return false;
        }
        let Some(image) = world.get_mut(self.image) else {
            return false;
        };
        image.transform.scale = Vec3::new(IMAGE_WIDTH, IMAGE_WIDTH * IMAGE_ASPECT, IMAGE_WIDTH);
        image.material.map = Some(Texture::Raster(handle));
        true
    }
}
