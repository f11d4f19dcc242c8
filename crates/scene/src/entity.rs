use foundation::handles::Handle;

/// Handle to a node owned by a [`crate::World`].
///
/// Holders never own the node; the handle stops resolving once the world
/// despawns it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub Handle);

impl NodeId {
    pub fn index(&self) -> u32 {
        self.0.index()
    }
}
