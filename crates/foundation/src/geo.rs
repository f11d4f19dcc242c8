/// A point on the map plane. The map's ground is the world `x`/`z` plane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GeoPoint {
    pub x: f64,
    pub z: f64,
}

impl GeoPoint {
    pub const fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    pub fn midpoint(self, other: GeoPoint) -> GeoPoint {
        GeoPoint::new((self.x + other.x) / 2.0, (self.z + other.z) / 2.0)
    }
}

/// Rectangle on the map plane spanned by two corner points.
///
/// `p1` is expected to be the minimum corner; containment does not reorder.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GeoRectangle {
    pub p1: GeoPoint,
    pub p2: GeoPoint,
}

impl GeoRectangle {
    pub const fn new(p1: GeoPoint, p2: GeoPoint) -> Self {
        Self { p1, p2 }
    }

    /// True iff `(x, z)` lies inside the rectangle, boundary included.
    pub fn is_intersect(&self, x: f64, z: f64) -> bool {
        self.p1.x <= x && x <= self.p2.x && self.p1.z <= z && z <= self.p2.z
    }

    pub fn width(&self) -> f64 {
        (self.p1.x - self.p2.x).abs()
    }

    pub fn depth(&self) -> f64 {
        (self.p1.z - self.p2.z).abs()
    }

    pub fn center(&self) -> GeoPoint {
        self.p1.midpoint(self.p2)
    }
}

impl Default for GeoRectangle {
    /// Unit square used when a diagram declares no floor.
    fn default() -> Self {
        Self::new(GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 1.0))
    }
}
