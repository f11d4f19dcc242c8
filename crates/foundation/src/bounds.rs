use crate::math::Vec3;

/// Axis-aligned bounding box in world space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb3 {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl Aabb3 {
    pub fn new(min: [f64; 3], max: [f64; 3]) -> Self {
        Aabb3 { min, max }
    }

    /// Smallest box containing every point; `None` for an empty or non-finite set.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vec3>,
    {
        let mut out: Option<Aabb3> = None;
        for p in points {
            if !p.is_finite() {
                return None;
            }
            let a = [p.x, p.y, p.z];
            out = Some(match out {
                None => Aabb3::new(a, a),
                Some(b) => Aabb3::new(
                    [b.min[0].min(a[0]), b.min[1].min(a[1]), b.min[2].min(a[2])],
                    [b.max[0].max(a[0]), b.max[1].max(a[1]), b.max[2].max(a[2])],
                ),
            });
        }
        out
    }

    pub fn center(&self) -> Vec3 {
        Vec3::new(
            (self.min[0] + self.max[0]) * 0.5,
            (self.min[1] + self.max[1]) * 0.5,
            (self.min[2] + self.max[2]) * 0.5,
        )
    }

    pub fn contains(&self, p: Vec3) -> bool {
        p.x >= self.min[0]
            && p.x <= self.max[0]
            && p.y >= self.min[1]
            && p.y <= self.max[1]
            && p.z >= self.min[2]
            && p.z <= self.max[2]
    }
}
