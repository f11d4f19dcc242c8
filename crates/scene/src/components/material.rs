use foundation::color::Color;

/// Opaque id of a raster the host has uploaded.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Texture {
    Raster(TextureHandle),
    /// Resolved by the host renderer (static images that need no load callback).
    Url(String),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Shading {
    /// Unlit.
    #[default]
    Basic,
    /// Lit.
    Standard,
    Sprite,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Side {
    #[default]
    Front,
    Back,
    Double,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub shading: Shading,
    pub color: Color,
    pub map: Option<Texture>,
    pub alpha_map: Option<Texture>,
    pub opacity: f32,
    pub transparent: bool,
    pub depth_test: bool,
    pub alpha_test: f32,
    pub side: Side,
    /// Hides the surface while keeping the node (and its children) live.
    pub visible: bool,
}

impl Material {
    pub fn basic(color: Color) -> Self {
        Self {
            shading: Shading::Basic,
            color,
            map: None,
            alpha_map: None,
            opacity: 1.0,
            transparent: false,
            depth_test: true,
            alpha_test: 0.0,
            side: Side::Front,
            visible: true,
        }
    }

    pub fn standard(color: Color) -> Self {
        Self {
            shading: Shading::Standard,
            ..Self::basic(color)
        }
    }

    pub fn sprite(map: Texture) -> Self {
        Self {
            shading: Shading::Sprite,
            map: Some(map),
            ..Self::basic(Color::rgb(0xff, 0xff, 0xff))
        }
    }

    /// Nothing to draw; used by grouping nodes.
    pub fn none() -> Self {
        Self {
            visible: false,
            ..Self::basic(Color::rgb(0, 0, 0))
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self.transparent = true;
        self
    }

    pub fn with_map(mut self, map: Texture) -> Self {
        self.map = Some(map);
        self
    }

    pub fn with_alpha_map(mut self, alpha_map: Texture, alpha_test: f32) -> Self {
        self.alpha_map = Some(alpha_map);
        self.alpha_test = alpha_test;
        self
    }

    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    pub fn without_depth_test(mut self) -> Self {
        self.depth_test = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{Material, Shading, Texture, TextureHandle};
    use foundation::color::Color;

    #[test]
    fn opacity_turns_on_transparency() {
        let m = Material::basic(Color::rgb(0xff, 0xff, 0)).with_opacity(0.2);
        assert!(m.transparent);
        assert_eq!(m.opacity, 0.2);
    }

    #[test]
    fn sprite_carries_its_map() {
        let m = Material::sprite(Texture::Raster(TextureHandle(7)));
        assert_eq!(m.shading, Shading::Sprite);
        assert_eq!(m.map, Some(Texture::Raster(TextureHandle(7))));
    }
}
