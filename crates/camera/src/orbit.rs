use std::f64::consts::PI;

use foundation::math::Vec3;

use crate::controls::{ButtonMapping, OrbitConfig, OrbitControls};

/// Keeps the polar angle away from the poles.
const POLE_EPSILON: f64 = 1e-6;

/// Spherical coordinates of the eye around the target.
#[derive(Debug, Copy, Clone, PartialEq)]
struct Spherical {
    radius: f64,
    /// From +Y.
    phi: f64,
    /// About +Y, from +Z towards +X.
    theta: f64,
}

impl Spherical {
    fn from_offset(v: Vec3) -> Self {
        let radius = v.length();
        if radius == 0.0 {
            return Self {
                radius,
                phi: 0.0,
                theta: 0.0,
            };
        }
        Self {
            radius,
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
            theta: v.x.atan2(v.z),
        }
    }

    fn to_offset(self) -> Vec3 {
        let s = self.phi.sin() * self.radius;
        Vec3::new(
            s * self.theta.sin(),
            self.phi.cos() * self.radius,
            s * self.theta.cos(),
        )
    }
}

/// Orbit controller storing the eye position and target directly.
#[derive(Debug, Clone, PartialEq)]
pub struct SphericalOrbit {
    position: Vec3,
    target: Vec3,
    min_distance: f64,
    max_distance: f64,
    min_polar: f64,
    max_polar: f64,
    screen_space_panning: bool,
    enabled: bool,
    mapping: ButtonMapping,
    /// Radians per second at speed 1.0 is `2π / 60`.
    auto_rotate: Option<f64>,
}

impl SphericalOrbit {
    pub fn new(config: &OrbitConfig) -> Self {
        let [px, py, pz] = config.position;
        let [tx, ty, tz] = config.target;
        let mut orbit = Self {
            position: Vec3::new(px, py, pz),
            target: Vec3::new(tx, ty, tz),
            min_distance: config.min_distance,
            max_distance: config.max_distance,
            min_polar: config.min_polar_deg.to_radians(),
            max_polar: config.max_polar_deg.to_radians(),
            screen_space_panning: config.screen_space_panning,
            enabled: true,
            mapping: ButtonMapping::rotating(),
            auto_rotate: None,
        };
        orbit.apply(orbit.spherical());
        orbit
    }

    fn spherical(&self) -> Spherical {
        Spherical::from_offset(self.position - self.target)
    }

    fn apply(&mut self, mut s: Spherical) {
        s.phi = s
            .phi
            .clamp(self.min_polar, self.max_polar)
            .clamp(POLE_EPSILON, PI - POLE_EPSILON);
        s.radius = s.radius.clamp(self.min_distance, self.max_distance);
        self.position = self.target + s.to_offset();
    }
}

impl OrbitControls for SphericalOrbit {
    fn update(&mut self, dt_s: f64) -> bool {
        let Some(speed) = self.auto_rotate else {
            return false;
        };
        if !(dt_s.is_finite() && dt_s > 0.0) {
            return false;
        }
        let mut s = self.spherical();
        s.theta -= 2.0 * PI / 60.0 * speed * dt_s;
        let before = self.position;
        self.apply(s);
        before != self.position
    }

    fn polar_angle(&self) -> f64 {
        self.spherical().phi
    }

    fn azimuthal_angle(&self) -> f64 {
        self.spherical().theta
    }

    fn distance(&self) -> f64 {
        (self.position - self.target).length()
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn target(&self) -> Vec3 {
        self.target
    }

    fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn mapping(&self) -> ButtonMapping {
        self.mapping
    }

    fn set_mapping(&mut self, mapping: ButtonMapping) {
        self.mapping = mapping;
    }

    fn set_auto_rotate(&mut self, speed: Option<f64>) {
        self.auto_rotate = speed;
    }

    fn rotate(&mut self, d_azimuth: f64, d_polar: f64) -> bool {
        if !self.enabled {
            return false;
        }
        let mut s = self.spherical();
        s.theta += d_azimuth;
        s.phi += d_polar;
        let before = self.position;
        self.apply(s);
        before != self.position
    }

    fn pan(&mut self, right: f64, forward: f64) -> bool {
        if !self.enabled || (right == 0.0 && forward == 0.0) {
            return false;
        }
        let view = self.target - self.position;
        let up = Vec3::new(0.0, 1.0, 0.0);
        let fwd = if self.screen_space_panning {
            view.cross(up).cross(view).normalize()
        } else {
            Vec3::new(view.x, 0.0, view.z).normalize()
        };
        // Looking straight down: fall back to world -Z as forward.
        let fwd = fwd.unwrap_or(Vec3::new(0.0, 0.0, -1.0));
        let side = fwd.cross(up).normalize().unwrap_or(Vec3::new(1.0, 0.0, 0.0));
        let delta = side.scale(right) + fwd.scale(forward);
        self.position = self.position + delta;
        self.target = self.target + delta;
        true
    }

    fn dolly(&mut self, factor: f64) -> bool {
        if !self.enabled || !(factor.is_finite() && factor > 0.0) {
            return false;
        }
        let mut s = self.spherical();
        s.radius *= factor;
        let before = self.position;
        self.apply(s);
        before != self.position
    }
}
