use crate::components::{Geometry, Material, PickTag, Transform};
use crate::entity::NodeId;
use foundation::bounds::Aabb3;
use foundation::handles::Handle;

/// A drawable scene node.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub geometry: Geometry,
    pub material: Material,
    pub transform: Transform,
    pub visible: bool,
    pub pick: Option<PickTag>,
}

impl Node {
    pub fn new(geometry: Geometry, material: Material) -> Self {
        Self {
            geometry,
            material,
            transform: Transform::identity(),
            visible: true,
            pick: None,
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_pick(mut self, pick: PickTag) -> Self {
        self.pick = Some(pick);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// World-space bounds of the transformed geometry.
    ///
    /// `None` for geometry without extent and for zero-scaled nodes.
    pub fn world_bounds(&self) -> Option<Aabb3> {
        if self.transform.is_collapsed() {
            return None;
        }
        let corners = self.geometry.local_corners()?;
        Aabb3::from_points(corners.iter().map(|c| self.transform.apply(*c)))
    }
}

#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Arena owning every node of the map scene.
///
/// Feature objects hold [`NodeId`]s; a despawned slot bumps its generation so
/// stale ids stop resolving.
#[derive(Debug, Default)]
pub struct World {
    slots: Vec<Slot>,
    free: Vec<u32>,
    len: usize,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, node: Node) -> NodeId {
        self.len += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            return NodeId(Handle::new(index, slot.generation));
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        NodeId(Handle::new(index, 0))
    }

    pub fn despawn(&mut self, id: NodeId) -> Option<Node> {
        let slot = self.slot_mut(id)?;
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index());
        self.len -= 1;
        Some(node)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        let slot = self.slots.get(id.index() as usize)?;
        if slot.generation != id.0.generation() {
            return None;
        }
        slot.node.as_ref()
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slot_mut(id)?.node.as_mut()
    }

    /// Returns `true` when the flag actually changed.
    pub fn set_visible(&mut self, id: NodeId, visible: bool) -> bool {
        match self.get_mut(id) {
            Some(node) if node.visible != visible => {
                node.visible = visible;
                true
            }
            _ => false,
        }
    }

    pub fn is_visible(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(|n| n.visible)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Live nodes in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.slots.iter().enumerate().filter_map(|(idx, slot)| {
            slot.node
                .as_ref()
                .map(|node| (NodeId(Handle::new(idx as u32, slot.generation)), node))
        })
    }

    fn slot_mut(&mut self, id: NodeId) -> Option<&mut Slot> {
        let slot = self.slots.get_mut(id.index() as usize)?;
        if slot.generation != id.0.generation() {
            return None;
        }
        Some(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::{Node, World};
    use crate::components::{Geometry, Material, Transform};
    use foundation::color::Color;
    use foundation::math::Vec3;

    fn plane() -> Node {
        Node::new(
            Geometry::Plane {
                width: 1.0,
                height: 1.0,
            },
            Material::basic(Color::rgb(0, 0, 0)),
        )
    }

    #[test]
    fn spawn_and_iterate_in_slot_order() {
        let mut world = World::new();
        let a = world.spawn(plane());
        let b = world.spawn(plane().hidden());

        let ids: Vec<_> = world.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![a, b]);
        assert!(world.is_visible(a));
        assert!(!world.is_visible(b));
        assert_eq!(world.len(), 2);
    }

    #[test]
    fn stale_ids_do_not_resolve_after_reuse() {
        let mut world = World::new();
        let a = world.spawn(plane());
        assert!(world.despawn(a).is_some());
        let b = world.spawn(plane());

        assert_eq!(a.index(), b.index());
        assert!(!world.contains(a));
        assert!(world.contains(b));
        assert!(world.despawn(a).is_none());
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn set_visible_reports_changes_only() {
        let mut world = World::new();
        let a = world.spawn(plane());
        assert!(!world.set_visible(a, true));
        assert!(world.set_visible(a, false));
        assert!(!world.set_visible(a, false));
    }

    #[test]
    fn collapsed_nodes_have_no_bounds() {
        let mut transform = Transform::translate(Vec3::new(1.0, 0.0, 1.0));
        let node = plane().with_transform(transform);
        let b = node.world_bounds().expect("bounds");
        assert_eq!(b.min[0], 0.5);
        assert_eq!(b.max[1], 0.5);

        transform.set_uniform_scale(0.0);
        assert!(plane().with_transform(transform).world_bounds().is_none());
    }
}
