use serde::{Deserialize, Serialize};

/// 8-bit RGB color with an optional alpha in `0.0..=1.0`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f32>,
}

impl Color {
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: None,
        }
    }

    pub const fn rgba(red: u8, green: u8, blue: u8, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: Some(alpha),
        }
    }

    pub const fn from_hex(hex: u32) -> Self {
        Self::rgb(
            ((hex >> 16) & 0xff) as u8,
            ((hex >> 8) & 0xff) as u8,
            (hex & 0xff) as u8,
        )
    }

    /// Packed `0xRRGGBB`; alpha is dropped.
    pub const fn as_integer(&self) -> u32 {
        ((self.red as u32) << 16) + ((self.green as u32) << 8) + self.blue as u32
    }

    /// CSS color string. A zero alpha is written as plain `rgb(...)`.
    pub fn as_css(&self) -> String {
        match self.alpha {
            Some(a) if a != 0.0 => {
                format!("rgba({}, {}, {}, {})", self.red, self.green, self.blue, a)
            }
            _ => format!("rgb({}, {}, {})", self.red, self.green, self.blue),
        }
    }

    /// Linear `[r, g, b, a]` floats for renderer materials.
    pub fn to_rgba_f32(&self) -> [f32; 4] {
        [
            self.red as f32 / 255.0,
            self.green as f32 / 255.0,
            self.blue as f32 / 255.0,
            self.alpha.unwrap_or(1.0),
        ]
    }
}

/// Named colors used by the map generators.
///
/// Passed by value into every generator instead of living in global state.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub red: Color,
    pub yellow: Color,
    pub light_grey: Color,
    pub dark_grey: Color,
    pub text: Color,
    pub white: Color,
    pub clear: Color,
    pub black: Color,
    pub building_base: Color,
    pub road_base: Color,
    pub floor_base: Color,
    pub arcade: Color,
    pub boundary_wall: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            red: Color::rgb(0xff, 0, 0),
            yellow: Color::rgb(0xff, 0xff, 0),
            light_grey: Color::rgb(230, 230, 250),
            dark_grey: Color::rgb(0x33, 0x33, 0x33),
            text: Color::rgb(0x22, 0x22, 0x22),
            white: Color::rgb(0xff, 0xff, 0xff),
            clear: Color::rgba(0, 0, 0, 0.0),
            black: Color::rgb(0, 0, 0),
            building_base: Color::rgb(0x6f, 0x54, 0x36),
            road_base: Color::rgb(100, 40, 40),
            floor_base: Color::rgb(115, 115, 115),
            arcade: Color::from_hex(0x666666),
            boundary_wall: Color::from_hex(0x000333),
        }
    }
}
