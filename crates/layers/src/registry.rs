use camera::CameraPose;
use scene::World;
use tracing::debug;

use crate::assets::{AssetQueue, AssetRequest, AssetResponse, LoadTicket};
use crate::feature::{FieldContext, FieldObject, MapFeature};

/// Every feature built from the current diagram, in record order.
///
/// Lookups are linear scans; maps hold a few hundred features at most.
#[derive(Default)]
pub struct FieldRegistry {
    features: Vec<MapFeature>,
    assets: AssetQueue,
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot the next pushed feature will occupy.
    pub fn next_slot(&self) -> usize {
        self.features.len()
    }

    pub fn push(&mut self, feature: MapFeature) -> usize {
        self.features.push(feature);
        self.features.len() - 1
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn get(&self, slot: usize) -> Option<&MapFeature> {
        self.features.get(slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MapFeature> {
        self.features.iter()
    }

    pub fn assets_mut(&mut self) -> &mut AssetQueue {
        &mut self.assets
    }

    /// Show the selection overlay on features labelled `label`, hide it on
    /// all others.
    pub fn highlight_by_label(&mut self, world: &mut World, label: &str) {
        self.select_where(world, |f| f.identity().label == label);
    }

    /// Show the selection overlay on features whose index key is one of
    /// `indices`, hide it on all others.
    pub fn highlight_by_index<S: AsRef<str>>(&mut self, world: &mut World, indices: &[S]) {
        self.select_where(world, |f| indices.iter().any(|i| i.as_ref() == f.identity().index));
    }

    pub fn hover_by_label(&mut self, world: &mut World, label: &str) {
        for f in &mut self.features {
            if f.identity().label == label {
                f.show_hover(world);
            } else {
                f.hide_hover(world);
            }
        }
    }

    /// Label of the first feature carrying `iterator`. An empty key never
    /// matches.
    pub fn label_for_iterator(&self, iterator: &str) -> Option<&str> {
        if iterator.is_empty() {
            return None;
        }
        self.features
            .iter()
            .find(|f| f.identity().iterator == iterator)
            .map(|f| f.identity().label.as_str())
    }

    pub fn clear_highlight(&mut self, world: &mut World) {
        for f in &mut self.features {
            f.hide_overlay(world);
        }
    }

    pub fn clear_hover(&mut self, world: &mut World) {
        for f in &mut self.features {
            f.hide_hover(world);
        }
    }

    pub fn broadcast_camera_pose(&mut self, world: &mut World, pose: &CameraPose) {
        for f in &mut self.features {
            f.on_camera_pose(world, pose);
        }
    }

    /// Requests issued since the last call, for the host to load.
    pub fn take_asset_requests(&mut self) -> Vec<AssetRequest> {
        self.assets.drain()
    }

    /// Hand a finished load to the feature that asked for it. Returns
    /// `false` for unknown or superseded tickets.
    pub fn resolve_asset(&mut self, world: &mut World, response: AssetResponse) -> bool {
        let ticket = response.ticket;
        let Some(slot) = self.assets.complete(ticket) else {
            debug!(?ticket, "asset response for unknown ticket ignored");
            return false;
        };
        let applied = self
            .features
            .get_mut(slot)
            .is_some_and(|f| f.resolve_asset(world, response));
        if !applied {
            debug!(?ticket, slot, "superseded asset response ignored");
        }
        applied
    }

    /// Drop a request whose load failed; the feature keeps what it has.
    pub fn cancel_asset(&mut self, ticket: LoadTicket) -> bool {
        let cancelled = self.assets.cancel(ticket);
        if !cancelled {
            debug!(?ticket, "cancel for unknown ticket ignored");
        }
        cancelled
    }

    pub fn assets_in_flight(&self) -> usize {
        self.assets.in_flight()
    }

    fn select_where<P>(&mut self, world: &mut World, mut matches: P)
    where
        P: FnMut(&MapFeature) -> bool,
    {
        for (slot, f) in self.features.iter_mut().enumerate() {
            if matches(f) {
                let mut cx = FieldContext {
                    world: &mut *world,
                    assets: &mut self.assets,
                    feature: slot,
                };
                f.show_overlay(&mut cx);
            } else {
                f.hide_overlay(world);
            }
        }
    }
}
