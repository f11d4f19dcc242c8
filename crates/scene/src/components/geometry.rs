use foundation::math::Vec3;

/// Raw triangle soup, optionally indexed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub uvs: Option<Vec<[f32; 2]>>,
    pub indices: Option<Vec<u32>>,
}

impl MeshData {
    pub fn triangles(positions: Vec<[f32; 3]>) -> Self {
        Self {
            positions,
            uvs: None,
            indices: None,
        }
    }

    pub fn indexed(positions: Vec<[f32; 3]>, indices: Vec<u32>) -> Self {
        Self {
            positions,
            uvs: None,
            indices: Some(indices),
        }
    }

    pub fn with_uvs(mut self, uvs: Vec<[f32; 2]>) -> Self {
        self.uvs = Some(uvs);
        self
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        match &self.indices {
            Some(indices) => indices.len() / 3,
            None => self.positions.len() / 3,
        }
    }
}

/// Open or closed cylinder along local Y.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CylinderSpec {
    pub radius_top: f64,
    pub radius_bottom: f64,
    pub height: f64,
    pub radial_segments: u32,
    pub open_ended: bool,
    pub theta_start: f64,
    pub theta_length: f64,
}

/// Model payload handed over by the host after an asset load.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelAsset {
    pub name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// Grouping node or placeholder with nothing to draw.
    Empty,
    /// Box centered on the origin.
    Box { width: f64, height: f64, depth: f64 },
    /// Plane in local XY, centered on the origin.
    Plane { width: f64, height: f64 },
    Mesh(MeshData),
    Cylinder(CylinderSpec),
    Sphere { radius: f64 },
    /// Unit camera-facing quad; size comes from the node scale.
    Sprite,
    Model(ModelAsset),
}

impl Geometry {
    /// Corners of the local-space bounding box, if the geometry has extent.
    pub fn local_corners(&self) -> Option<[Vec3; 8]> {
        let (min, max) = match self {
            Geometry::Empty | Geometry::Model(_) => return None,
            Geometry::Box {
                width,
                height,
                depth,
            } => {
                let h = Vec3::new(width / 2.0, height / 2.0, depth / 2.0);
                (Vec3::ZERO - h, h)
            }
            Geometry::Plane { width, height } => {
                let h = Vec3::new(width / 2.0, height / 2.0, 0.0);
                (Vec3::ZERO - h, h)
            }
            Geometry::Mesh(mesh) => {
                let bounds = foundation::bounds::Aabb3::from_points(
                    mesh.positions
                        .iter()
                        .map(|p| Vec3::new(p[0] as f64, p[1] as f64, p[2] as f64)),
                )?;
                (
                    Vec3::new(bounds.min[0], bounds.min[1], bounds.min[2]),
                    Vec3::new(bounds.max[0], bounds.max[1], bounds.max[2]),
                )
            }
            Geometry::Cylinder(spec) => {
                let r = spec.radius_top.max(spec.radius_bottom);
                let h = Vec3::new(r, spec.height / 2.0, r);
                (Vec3::ZERO - h, h)
            }
            Geometry::Sphere { radius } => {
                let h = Vec3::splat(*radius);
                (Vec3::ZERO - h, h)
            }
            Geometry::Sprite => (Vec3::new(-0.5, -0.5, 0.0), Vec3::new(0.5, 0.5, 0.0)),
        };
        Some([
            Vec3::new(min.x, min.y, min.z),
            Vec3::new(max.x, min.y, min.z),
            Vec3::new(min.x, max.y, min.z),
            Vec3::new(max.x, max.y, min.z),
            Vec3::new(min.x, min.y, max.z),
            Vec3::new(max.x, min.y, max.z),
            Vec3::new(min.x, max.y, max.z),
            Vec3::new(max.x, max.y, max.z),
        ])
    }
}
