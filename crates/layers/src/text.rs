use foundation::color::{Color, Palette};
use scene::components::TextureHandle;

use crate::error::LabelError;

/// Canvas pixels per world unit.
pub const GL_TO_CANVAS: f64 = 500.0;
/// Oversampling applied to every label canvas.
pub const LABEL_RESOLUTION: f64 = 2.0;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TextMetrics {
    pub width: f64,
    pub ascent: f64,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TextDirection {
    Horizontal,
    /// One glyph per line, top to bottom.
    Vertical,
}

/// Box and colors of one label raster, in world units.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelTextureParams {
    pub width: f64,
    pub height: f64,
    pub font_size: f64,
    pub foreground: Color,
    pub background: Option<Color>,
    pub resolution: f64,
    pub gl_to_canvas: f64,
}

impl LabelTextureParams {
    pub fn new(width: f64, height: f64, font_size: f64, palette: &Palette) -> Self {
        Self {
            width,
            height,
            font_size,
            foreground: palette.text,
            background: None,
            resolution: LABEL_RESOLUTION,
            gl_to_canvas: GL_TO_CANVAS,
        }
    }

    pub fn with_colors(mut self, foreground: Color, background: Option<Color>) -> Self {
        self.foreground = foreground;
        self.background = background;
        self
    }

    pub fn canvas_width(&self) -> f64 {
        self.width * self.resolution * self.gl_to_canvas
    }

    pub fn canvas_height(&self) -> f64 {
        self.height * self.resolution * self.gl_to_canvas
    }

    pub fn canvas_font_size(&self) -> f64 {
        self.font_size * self.resolution
    }

    pub fn line_space(&self) -> f64 {
        self.font_size * 0.3 * self.resolution
    }

    /// Landscape boxes read horizontally, portrait boxes vertically.
    pub fn natural_direction(&self) -> TextDirection {
        if self.width >= self.height {
            TextDirection::Horizontal
        } else {
            TextDirection::Vertical
        }
    }
}

/// Canvas-space baseline origin of one drawn run of text.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphPlacement {
    pub text: String,
    pub x: f64,
    pub y: f64,
}

/// Centre the whole string on the canvas.
pub fn layout_horizontal<M>(text: &str, params: &LabelTextureParams, measure: M) -> Vec<GlyphPlacement>
where
    M: Fn(&str, f64) -> TextMetrics,
{
    let m = measure(text, params.canvas_font_size());
    vec![GlyphPlacement {
        text: text.to_string(),
        x: (params.canvas_width() - m.width) / 2.0,
        y: params.canvas_height() / 2.0 + m.ascent / 2.0,
    }]
}

/// Stack characters top to bottom, the column centred vertically.
pub fn layout_vertical<M>(text: &str, params: &LabelTextureParams, measure: M) -> Vec<GlyphPlacement>
where
    M: Fn(&str, f64) -> TextMetrics,
{
    let font = params.canvas_font_size();
    let line_space = params.line_space();
    let glyphs: Vec<(String, TextMetrics)> = text
        .chars()
        .map(|c| {
            let s = c.to_string();
            let m = measure(&s, font);
            (s, m)
        })
        .collect();

    let total: f64 = glyphs
        .iter()
        .enumerate()
        .map(|(i, (_, m))| {
            if i + 1 == glyphs.len() {
                m.ascent
            } else {
                m.ascent + line_space
            }
        })
        .sum();

    let mut y = (params.canvas_height() - total) / 2.0;
    let mut out = Vec::with_capacity(glyphs.len());
    for (s, m) in glyphs {
        out.push(GlyphPlacement {
            text: s,
            x: (params.canvas_width() - m.width) / 2.0,
            y: y + m.ascent - line_space / 2.0,
        });
        y += m.ascent + line_space;
    }
    out
}

/// Text measurement and rasterization provided by the host.
pub trait TextRenderer {
    /// Metrics at `font_size` pixels.
    fn measure(&self, text: &str, font_size: f64) -> TextMetrics;

    /// Draw `text` into a new texture sized by `params`.
    fn rasterize(
        &mut self,
        text: &str,
        params: &LabelTextureParams,
        direction: TextDirection,
    ) -> Result<TextureHandle, LabelError>;
}

/// One raster produced by [`EstimatedTextRenderer`].
#[derive(Debug, Clone, PartialEq)]
pub struct RasterRecord {
    pub handle: TextureHandle,
    pub params: LabelTextureParams,
    pub direction: TextDirection,
    pub glyphs: Vec<GlyphPlacement>,
}

/// Deterministic renderer for headless builds: fixed-advance metrics and
/// no pixels, only the computed glyph layout.
#[derive(Debug, Default)]
pub struct EstimatedTextRenderer {
    next: u64,
    rasters: Vec<RasterRecord>,
}

impl EstimatedTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rasters(&self) -> &[RasterRecord] {
        &self.rasters
    }

    fn estimate(text: &str, font_size: f64) -> TextMetrics {
        TextMetrics {
            width: 0.6 * font_size * text.chars().count() as f64,
            ascent: 0.8 * font_size,
        }
    }
}

impl TextRenderer for EstimatedTextRenderer {
    fn measure(&self, text: &str, font_size: f64) -> TextMetrics {
        Self::estimate(text, font_size)
    }

    fn rasterize(
        &mut self,
        text: &str,
        params: &LabelTextureParams,
        direction: TextDirection,
    ) -> Result<TextureHandle, LabelError> {
        let (w, h) = (params.canvas_width(), params.canvas_height());
        if !(w.is_finite() && h.is_finite()) || w < 0.0 || h < 0.0 {
            return Err(LabelError::Raster(format!("invalid canvas size {w}x{h}")));
        }
        let glyphs = match direction {
            TextDirection::Horizontal => layout_horizontal(text, params, Self::estimate),
            TextDirection::Vertical => layout_vertical(text, params, Self::estimate),
        };
        let handle = TextureHandle(self.next);
        self.next += 1;
        self.rasters.push(RasterRecord {
            handle,
            params: params.clone(),
            direction,
            glyphs,
        });
        Ok(handle)
    }
}
