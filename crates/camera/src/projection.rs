use foundation::math::{Vec2, Vec3};
use scene::picking::Ray;

/// Perspective camera lens.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PerspectiveProjection {
    pub fov_y_deg: f64,
    pub aspect: f64,
}

impl PerspectiveProjection {
    pub fn new(fov_y_deg: f64, aspect: f64) -> Self {
        Self { fov_y_deg, aspect }
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        if width >= 1.0 && height >= 1.0 {
            self.aspect = width / height;
        }
    }

    /// World-space ray from `eye` through a normalized screen point.
    pub fn ray_through(&self, ndc: Vec2, eye: Vec3, target: Vec3) -> Option<Ray> {
        let forward = (target - eye).normalize()?;
        let world_up = Vec3::new(0.0, 1.0, 0.0);
        // Looking straight down: take -Z as screen up.
        let right = forward
            .cross(world_up)
            .normalize()
            .or_else(|| forward.cross(Vec3::new(0.0, 0.0, -1.0)).normalize())?;
        let up = right.cross(forward);
        let tan = (self.fov_y_deg.to_radians() / 2.0).tan();
        let dir = forward + right.scale(ndc.x * tan * self.aspect) + up.scale(ndc.y * tan);
        Some(Ray::new(eye, dir.normalize()?))
    }
}
