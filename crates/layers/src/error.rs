#[derive(Debug, Clone, PartialEq)]
pub enum LabelError {
    /// Text metrics cannot size a plate (zero or non-finite ascent, non-finite width).
    DegenerateMetrics { width: f64, ascent: f64 },
    Raster(String),
}

impl std::fmt::Display for LabelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LabelError::DegenerateMetrics { width, ascent } => {
                write!(f, "degenerate text metrics (width {width}, ascent {ascent})")
            }
            LabelError::Raster(msg) => write!(f, "label raster failed: {msg}"),
        }
    }
}

impl std::error::Error for LabelError {}
