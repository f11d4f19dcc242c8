use foundation::color::Palette;
use serde::Deserialize;

use crate::highway::HighwayConfig;
use crate::lod::LodConfig;

pub const DEFAULT_EAST_WALL_TEXTURE: &str = "/images/east-wall-center.png";

/// Everything the scene builder reads besides the records themselves.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub palette: Palette,
    pub highway: HighwayConfig,
    pub lod: LodConfig,
    /// Image on the panel along the floor's east edge; `None` skips the panel.
    pub east_wall_texture: Option<String>,
    /// Shown on photo panels until the real image arrives.
    pub loading_icon: Option<String>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            highway: HighwayConfig::default(),
            lod: LodConfig::default(),
            east_wall_texture: Some(DEFAULT_EAST_WALL_TEXTURE.to_string()),
            loading_icon: None,
        }
    }
}
