use foundation::math::Vec3;
use foundation::math::order::stable_total_cmp_f64;

use crate::World;
use crate::components::PickTag;
use crate::entity::NodeId;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self { origin, dir }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PickHit {
    pub node: NodeId,
    pub tag: PickTag,
    pub distance: f64,
    pub point: Vec3,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickOptions {
    pub max_distance: f64,
}

impl Default for PickOptions {
    fn default() -> Self {
        Self {
            max_distance: 1.0e30,
        }
    }
}

/// Deterministic ray picking over clickable nodes.
///
/// Ordering contract:
/// - The closest hit along the (normalized) ray wins.
/// - Hits at the same distance go to the lower `NodeId::index()`.
///
/// Hidden nodes, nodes without a clickable [`PickTag`], and nodes without
/// world bounds are ignored.
pub fn pick_ray(world: &World, ray: Ray, opts: PickOptions) -> Option<PickHit> {
    let dir = ray.dir.normalize()?;
    let origin = [ray.origin.x, ray.origin.y, ray.origin.z];
    let dir_a = [dir.x, dir.y, dir.z];

    let mut best: Option<(f64, NodeId, &PickTag)> = None;

    for (id, node) in world.iter() {
        if !node.visible {
            continue;
        }
        let Some(tag) = node.pick.as_ref().filter(|t| t.clickable) else {
            continue;
        };
        let Some(bounds) = node.world_bounds() else {
            continue;
        };
        let Some(t) = ray_aabb_hit_t(origin, dir_a, bounds, 0.0, opts.max_distance) else {
            continue;
        };

        best = match best {
            None => Some((t, id, tag)),
            Some((bt, bid, btag)) => {
                let ord = stable_total_cmp_f64(t, bt).then_with(|| id.index().cmp(&bid.index()));
                if ord.is_lt() {
                    Some((t, id, tag))
                } else {
                    Some((bt, bid, btag))
                }
            }
        };
    }

    let (t, node, tag) = best?;
    Some(PickHit {
        node,
        tag: tag.clone(),
        distance: t,
        point: ray.origin + dir.scale(t),
    })
}

fn ray_aabb_hit_t(
    origin: [f64; 3],
    dir: [f64; 3],
    bounds: foundation::bounds::Aabb3,
    mut t_min: f64,
    mut t_max: f64,
) -> Option<f64> {
    // Slabs intersection; returns entry distance.
    for axis in 0..3 {
        let o = origin[axis];
        let d = dir[axis];
        let (min, max) = (bounds.min[axis], bounds.max[axis]);

        if d.abs() < 1e-12 {
            if o < min || o > max {
                return None;
            }
            continue;
        }

        let inv = 1.0 / d;
        let mut t1 = (min - o) * inv;
        let mut t2 = (max - o) * inv;
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
        }

        t_min = t_min.max(t1);
        t_max = t_max.min(t2);
        if t_max < t_min {
            return None;
        }
    }

    Some(t_min.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::{PickOptions, Ray, pick_ray};
    use crate::World;
    use crate::components::{Geometry, Material, PickTag, Transform};
    use crate::world::Node;
    use foundation::color::Color;
    use foundation::math::Vec3;

    fn cube_at(x: f64, label: &str) -> Node {
        Node::new(
            Geometry::Box {
                width: 2.0,
                height: 2.0,
                depth: 2.0,
            },
            Material::basic(Color::rgb(0, 0, 0)),
        )
        .with_transform(Transform::translate(Vec3::new(x, 0.0, 0.0)))
        .with_pick(PickTag::clickable("place", label))
    }

    #[test]
    fn ray_picks_nearest_hit() {
        let mut world = World::new();
        let a = world.spawn(cube_at(5.0, "near"));
        world.spawn(cube_at(10.0, "far"));

        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));
        let hit = pick_ray(&world, ray, PickOptions::default()).expect("hit");
        assert_eq!(hit.node, a);
        assert_eq!(hit.tag.label, "near");
        assert!(hit.distance >= 4.0 && hit.distance <= 6.0);
    }

    #[test]
    fn tie_breaks_by_node_index() {
        let mut world = World::new();
        let first = world.spawn(cube_at(5.0, "first"));
        world.spawn(cube_at(5.0, "second"));

        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));
        let hit = pick_ray(&world, ray, PickOptions::default()).expect("hit");
        assert_eq!(hit.node, first);
    }

    #[test]
    fn skips_hidden_and_untagged_nodes() {
        let mut world = World::new();
        world.spawn(cube_at(5.0, "hidden").hidden());
        let mut untagged = cube_at(7.0, "untagged");
        untagged.pick = None;
        world.spawn(untagged);
        let mut inert = cube_at(8.0, "inert");
        inert.pick = Some(PickTag {
            clickable: false,
            kind: "floor".into(),
            label: String::new(),
        });
        world.spawn(inert);
        let visible = world.spawn(cube_at(10.0, "visible"));

        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));
        let hit = pick_ray(&world, ray, PickOptions::default()).expect("hit");
        assert_eq!(hit.node, visible);
    }

    #[test]
    fn zero_direction_never_hits() {
        let mut world = World::new();
        world.spawn(cube_at(0.0, "origin"));
        assert!(pick_ray(&world, Ray::new(Vec3::ZERO, Vec3::ZERO), PickOptions::default()).is_none());
    }
}
