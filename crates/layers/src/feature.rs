use camera::CameraPose;
use foundation::color::{Color, Palette};
use foundation::geo::GeoRectangle;
use formats::FeatureRecord;
use scene::components::{Geometry, Material, MeshData, PickTag};
use scene::{Node, NodeId, World};

use crate::assets::{AssetQueue, AssetResponse};
use crate::building::Building;
use crate::highway::Highway;
use crate::place::Place;
use crate::plane::rectangle_to_vertex;

/// What the registry matches features by.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeatureIdentity {
    /// Diagram `type` string.
    pub kind: String,
    pub label: String,
    /// Bulk-selection key; empty when the record had none.
    pub index: String,
    /// Routing key; empty when the record had none.
    pub iterator: String,
}

impl FeatureIdentity {
    pub fn from_record(record: &FeatureRecord) -> Self {
        Self {
            kind: record.feature_type.clone(),
            label: record.label.clone(),
            index: record.index.clone(),
            iterator: record.iterator.clone(),
        }
    }
}

/// State shared by every map feature: identity, the optional selection and
/// hover overlays, and the hit-test proxies that resolve picks to it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldObjectBase {
    pub identity: FeatureIdentity,
    overlay: Option<NodeId>,
    hover: Option<NodeId>,
    proxies: Vec<NodeId>,
}

impl FieldObjectBase {
    pub fn new(record: &FeatureRecord) -> Self {
        Self {
            identity: FeatureIdentity::from_record(record),
            ..Self::default()
        }
    }

    pub fn overlay(&self) -> Option<NodeId> {
        self.overlay
    }

    pub fn hover(&self) -> Option<NodeId> {
        self.hover
    }

    pub fn proxies(&self) -> &[NodeId] {
        &self.proxies
    }

    /// Translucent yellow sheet just above `height`, hidden until selected.
    pub fn init_overlay(&mut self, world: &mut World, footprint: &GeoRectangle, height: f64, palette: &Palette) {
        self.overlay = Some(spawn_sheet(world, footprint, height + 0.0001, palette.yellow, 0.2));
    }

    /// Translucent black sheet just above the overlay, hidden until hovered.
    pub fn init_hover(&mut self, world: &mut World, footprint: &GeoRectangle, height: f64, palette: &Palette) {
        self.hover = Some(spawn_sheet(world, footprint, height + 0.0002, palette.black, 0.4));
    }

    pub fn add_bounding_box(&mut self, node: NodeId) {
        self.proxies.push(node);
    }

    /// Tag every hit-test proxy so a pick resolves back to this feature.
    pub fn set_pick_tag(&self, world: &mut World, tag: &PickTag) {
        for id in &self.proxies {
            if let Some(node) = world.get_mut(*id) {
                node.pick = Some(tag.clone());
            }
        }
    }

    fn set_overlay_visible(&self, world: &mut World, visible: bool) {
        if let Some(id) = self.overlay {
            world.set_visible(id, visible);
        }
    }

    fn set_hover_visible(&self, world: &mut World, visible: bool) {
        if let Some(id) = self.hover {
            world.set_visible(id, visible);
        }
    }
}

fn spawn_sheet(world: &mut World, footprint: &GeoRectangle, y: f64, color: Color, opacity: f32) -> NodeId {
    let positions = rectangle_to_vertex(footprint.p1.x, footprint.p2.x, footprint.p1.z, footprint.p2.z, y);
    let material = Material::standard(color).with_opacity(opacity);
    world.spawn(Node::new(Geometry::Mesh(MeshData::triangles(positions)), material).hidden())
}

/// Borrowed scene state a feature may touch while handling a call.
pub struct FieldContext<'a> {
    pub world: &'a mut World,
    pub assets: &'a mut AssetQueue,
    /// Registry slot of the feature being called.
    pub feature: usize,
}

/// Operations the registry dispatches to every feature.
pub trait FieldObject {
    fn base(&self) -> &FieldObjectBase;

    fn base_mut(&mut self) -> &mut FieldObjectBase;

    fn show_overlay(&mut self, cx: &mut FieldContext<'_>) {
        self.base().set_overlay_visible(cx.world, true);
    }

    fn hide_overlay(&mut self, world: &mut World) {
        self.base().set_overlay_visible(world, false);
    }

    fn show_hover(&mut self, world: &mut World) {
        self.base().set_hover_visible(world, true);
    }

    fn hide_hover(&mut self, world: &mut World) {
        self.base().set_hover_visible(world, false);
    }

    fn on_camera_pose(&mut self, _world: &mut World, _pose: &CameraPose) {}

    /// Apply a finished load. Returns `false` when the response is not for a
    /// request this feature is still waiting on.
    fn resolve_asset(&mut self, _world: &mut World, _response: AssetResponse) -> bool {
        false
    }
}

pub enum MapFeature {
    Highway(Highway),
    Building(Building),
    Place(Place),
    /// Streets, floors and other records that only carry identity.
    Generic(FieldObjectBase),
}

impl MapFeature {
    pub fn identity(&self) -> &FeatureIdentity {
        &self.base().identity
    }
}

impl FieldObject for FieldObjectBase {
    fn base(&self) -> &FieldObjectBase {
        self
    }

    fn base_mut(&mut self) -> &mut FieldObjectBase {
        self
    }
}

macro_rules! dispatch {
    ($self:expr, $f:ident => $body:expr) => {
        match $self {
            MapFeature::Highway($f) => $body,
            MapFeature::Building($f) => $body,
            MapFeature::Place($f) => $body,
            MapFeature::Generic($f) => $body,
        }
    };
}

impl FieldObject for MapFeature {
    fn base(&self) -> &FieldObjectBase {
        dispatch!(self, f => f.base())
    }

    fn base_mut(&mut self) -> &mut FieldObjectBase {
        dispatch!(self, f => f.base_mut())
    }

    fn show_overlay(&mut self, cx: &mut FieldContext<'_>) {
        dispatch!(self, f => f.show_overlay(cx))
    }

    fn hide_overlay(&mut self, world: &mut World) {
        dispatch!(self, f => f.hide_overlay(world))
    }

    fn show_hover(&mut self, world: &mut World) {
        dispatch!(self, f => f.show_hover(world))
    }

    fn hide_hover(&mut self, world: &mut World) {
        dispatch!(self, f => f.hide_hover(world))
    }

    fn on_camera_pose(&mut self, world: &mut World, pose: &CameraPose) {
        dispatch!(self, f => f.on_camera_pose(world, pose))
    }

    fn resolve_asset(&mut self, world: &mut World, response: AssetResponse) -> bool {
        dispatch!(self, f => f.resolve_asset(world, response))
    }
}
