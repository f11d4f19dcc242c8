use foundation::math::Vec3;

/// Node transform: scale, then Euler rotation (X, then Y, then Z, intrinsic),
/// then translation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles in radians.
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }

    pub fn translate(position: Vec3) -> Self {
        Self {
            position,
            ..Self::identity()
        }
    }

    pub fn translate_by(&mut self, delta: Vec3) {
        self.position = self.position + delta;
    }

    pub fn rotate_x(&mut self, angle: f64) {
        self.rotation.x += angle;
    }

    pub fn rotate_y(&mut self, angle: f64) {
        self.rotation.y += angle;
    }

    pub fn rotate_z(&mut self, angle: f64) {
        self.rotation.z += angle;
    }

    pub fn set_uniform_scale(&mut self, s: f64) {
        self.scale = Vec3::splat(s);
    }

    pub fn is_collapsed(&self) -> bool {
        self.scale.x == 0.0 || self.scale.y == 0.0 || self.scale.z == 0.0
    }

    /// Map a local-space point into world space.
    pub fn apply(&self, local: Vec3) -> Vec3 {
        let s = Vec3::new(
            local.x * self.scale.x,
            local.y * self.scale.y,
            local.z * self.scale.z,
        );
        // R = Rx * Ry * Rz, so Rz acts on the point first.
        let r = rotate_x(rotate_y(rotate_z(s, self.rotation.z), self.rotation.y), self.rotation.x);
        r + self.position
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

fn rotate_x(v: Vec3, a: f64) -> Vec3 {
    if a == 0.0 {
        return v;
    }
    let (s, c) = a.sin_cos();
    Vec3::new(v.x, v.y * c - v.z * s, v.y * s + v.z * c)
}

fn rotate_y(v: Vec3, a: f64) -> Vec3 {
    if a == 0.0 {
        return v;
    }
    let (s, c) = a.sin_cos();
    Vec3::new(v.x * c + v.z * s, v.y, -v.x * s + v.z * c)
}

fn rotate_z(v: Vec3, a: f64) -> Vec3 {
    if a == 0.0 {
        return v;
    }
    let (s, c) = a.sin_cos();
    Vec3::new(v.x * c - v.y * s, v.x * s + v.y * c, v.z)
}
