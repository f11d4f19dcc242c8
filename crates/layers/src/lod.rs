use foundation::geo::GeoRectangle;
use foundation::math::Vec3;
use serde::Deserialize;

/// Pitch gate for detail objects, in degrees of camera polar angle.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LodConfig {
    pub threshold_deg: f64,
    /// Degrees past the threshold over which the scale ramps to full size.
    pub ramp_deg: f64,
}

impl Default for LodConfig {
    fn default() -> Self {
        Self {
            threshold_deg: 60.0,
            ramp_deg: 5.0,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LodState {
    pub scale: f64,
    pub visible: bool,
}

/// Target scale and visibility of a detail object seen from `camera`.
///
/// Below the threshold the object is hidden at scale zero. Standing inside
/// the footprint hides it regardless of pitch.
pub fn lod_state(
    cfg: &LodConfig,
    polar_deg: f64,
    lod_scale: f64,
    footprint: &GeoRectangle,
    camera: Vec3,
) -> LodState {
    if polar_deg < cfg.threshold_deg {
        return LodState {
            scale: 0.0,
            visible: false,
        };
    }
    let ramp = if cfg.ramp_deg > 0.0 {
        (polar_deg - cfg.threshold_deg).min(cfg.ramp_deg) / cfg.ramp_deg
    } else {
        1.0
    };
    LodState {
        scale: ramp * lod_scale,
        visible: !footprint.is_intersect(camera.x, camera.z),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foundation::geo::GeoPoint;
    use pretty_assertions::assert_eq;

    fn footprint() -> GeoRectangle {
        GeoRectangle::new(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.1, 0.1))
    }

    fn outside() -> Vec3 {
        Vec3::new(1.0, 0.5, 1.0)
    }

    #[test]
    fn below_threshold_is_hidden() {
        let s = lod_state(&LodConfig::default(), 59.0, 2.0, &footprint(), outside());
        assert_eq!(
            s,
            LodState {
                scale: 0.0,
                visible: false
            }
        );
    }

    #[test]
    fn scale_ramps_then_clamps() {
        let cfg = LodConfig::default();
        let s = lod_state(&cfg, 61.0, 2.0, &footprint(), outside());
        assert!(s.visible);
        assert!((s.scale - 0.4).abs() < 1e-12);
        assert_eq!(lod_state(&cfg, 65.0, 2.0, &footprint(), outside()).scale, 2.0);
        assert_eq!(lod_state(&cfg, 89.0, 2.0, &footprint(), outside()).scale, 2.0);
        assert_eq!(lod_state(&cfg, 60.0, 2.0, &footprint(), outside()).scale, 0.0);
    }

    #[test]
    fn camera_inside_footprint_forces_hidden() {
        let s = lod_state(
            &LodConfig::default(),
            70.0,
            1.0,
            &footprint(),
            Vec3::new(0.05, 0.3, 0.1),
        );
        assert!(!s.visible);
        assert_eq!(s.scale, 1.0);
    }
}
