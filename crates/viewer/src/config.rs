use camera::OrbitConfig;
use layers::FieldConfig;
use serde::Deserialize;

/// Top-level settings for a [`crate::TownMap`], readable from JSON.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub field: FieldConfig,
    pub camera: OrbitConfig,
    /// Viewport in pixels; sets the lens aspect and pointer normalization.
    pub viewport: [f64; 2],
    /// Spin speed for idle auto-rotation; `None` leaves it off.
    pub auto_rotate: Option<f64>,
    /// Seconds a `move_camera` takes when the caller passes none.
    pub move_duration_s: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            field: FieldConfig::default(),
            camera: OrbitConfig::default(),
            viewport: [1280.0, 720.0],
            auto_rotate: None,
            move_duration_s: 1.0,
        }
    }
}

impl MapConfig {
    pub fn aspect(&self) -> f64 {
        let [w, h] = self.viewport;
        if w >= 1.0 && h >= 1.0 { w / h } else { 1.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::MapConfig;
    use pretty_assertions::assert_eq;

    #[test]
    fn nested_sections_default_independently() {
        let cfg: MapConfig = serde_json::from_str(
            r#"{"viewport":[800,400],"field":{"lod":{"threshold_deg":55}},"camera":{"fov_deg":60}}"#,
        )
        .unwrap();
        assert_eq!(cfg.aspect(), 2.0);
        assert_eq!(cfg.field.lod.threshold_deg, 55.0);
        assert_eq!(cfg.field.lod.ramp_deg, 5.0);
        assert_eq!(cfg.camera.fov_deg, 60.0);
        assert_eq!(cfg.auto_rotate, None);
    }
}
