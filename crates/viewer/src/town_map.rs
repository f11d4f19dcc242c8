use camera::{CameraPose, CameraRig, GestureEvent, OrbitControls};
use foundation::geo::GeoRectangle;
use foundation::math::{Vec2, Vec3};
use formats::{DiagramDocument, FeatureRecord, PolygonCatalog, load_records};
use layers::{
    AssetKind, AssetRequest, AssetResponse, EstimatedTextRenderer, FieldRegistry, TextRenderer, build_field,
};
use runtime::{Event, EventBus, Frame};
use scene::World;
use scene::components::{ModelAsset, PickTag};
use scene::picking::{PickHit, PickOptions, pick_ray};
use tracing::{debug, error, info};

use crate::config::MapConfig;

/// Signals surfaced to the host after input or loading.
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    Gesture(GestureEvent),
    /// A tap landed on a clickable feature; it is now highlighted.
    Selected(PickTag),
    /// A tap hit nothing. The current highlight is left alone.
    SelectionMissed,
}

/// What one controls callback produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GestureOutcome {
    pub events: Vec<GestureEvent>,
    pub selected: Option<PickTag>,
}

/// The interactive town map: scene, feature registry, and camera.
///
/// The host feeds it pointer and controls callbacks plus one
/// [`TownMap::on_frame`] per render tick, and services its asset requests.
pub struct TownMap<T: TextRenderer = EstimatedTextRenderer> {
    world: World,
    registry: FieldRegistry,
    rig: CameraRig,
    text: T,
    config: MapConfig,
    floor: GeoRectangle,
    catalog: PolygonCatalog,
    frame: Frame,
    events: EventBus<MapEvent>,
}

impl TownMap<EstimatedTextRenderer> {
    /// A map that estimates text metrics instead of rasterizing.
    pub fn headless(config: MapConfig) -> Self {
        Self::new(EstimatedTextRenderer::new(), config)
    }
}

impl<T: TextRenderer> TownMap<T> {
    pub fn new(text: T, config: MapConfig) -> Self {
        let mut rig = CameraRig::from_config(&config.camera, config.aspect());
        if let Some(speed) = config.auto_rotate {
            rig.enable_auto_rotate(speed);
        }
        Self {
            world: World::new(),
            registry: FieldRegistry::new(),
            rig,
            text,
            config,
            floor: GeoRectangle::default(),
            catalog: PolygonCatalog::new(),
            frame: Frame::first(),
            events: EventBus::new(),
        }
    }

    /// Replace the scene with one built from `records`.
    ///
    /// `progress(i, total)` runs before record `i` is generated.
    pub fn load<P>(&mut self, records: &[FeatureRecord], catalog: PolygonCatalog, progress: P)
    where
        P: FnMut(usize, usize),
    {
        self.world = World::new();
        let built = build_field(
            &mut self.world,
            &mut self.text,
            records,
            &catalog,
            &self.config.field,
            progress,
        );
        self.registry = built.registry;
        self.floor = built.floor;
        self.catalog = catalog;
    }

    /// Parse draw.io text and load it. A malformed document loads an empty
    /// map. Returns the number of records read.
    pub fn load_document<P>(&mut self, text: &str, catalog: PolygonCatalog, progress: P) -> usize
    where
        P: FnMut(usize, usize),
    {
        let records = load_records(text);
        info!(
            hash = %DiagramDocument::new(text).content_hash(),
            records = records.len(),
            catalog = catalog.len(),
            "loading diagram"
        );
        self.load(&records, catalog, progress);
        records.len()
    }

    /// One render tick: camera first, then per-feature LOD.
    pub fn on_frame(&mut self, dt_s: f64) -> CameraPose {
        self.frame = self.frame.advance(dt_s);
        let pose = self.rig.tick(self.frame.dt_s);
        self.registry.broadcast_camera_pose(&mut self.world, &pose);
        pose
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.config.viewport = [width, height];
        self.rig.projection_mut().set_viewport(width, height);
    }

    /// Record a press in element pixels. Call before forwarding the press to
    /// the controls.
    pub fn pointer_down(&mut self, x_px: f64, y_px: f64) {
        let [w, h] = self.config.viewport;
        self.rig.pointer_down(x_px, y_px, w, h);
    }

    pub fn control_start(&mut self) -> GestureOutcome {
        let events = self.rig.control_start();
        self.route(events)
    }

    pub fn control_change(&mut self) -> GestureOutcome {
        let events = self.rig.control_change();
        self.route(events)
    }

    pub fn control_end(&mut self) -> GestureOutcome {
        let events = self.rig.control_end();
        self.route(events)
    }

    fn route(&mut self, events: Vec<GestureEvent>) -> GestureOutcome {
        let mut selected = None;
        for event in &events {
            self.events.emit(self.frame.index, MapEvent::Gesture(*event));
            match *event {
                GestureEvent::HoverStart(ndc) => {
                    if let Some(hit) = self.pick(ndc) {
                        self.registry.hover_by_label(&mut self.world, &hit.tag.label);
                    }
                }
                GestureEvent::HoverCancel(_) => self.registry.clear_hover(&mut self.world),
                GestureEvent::Click(ndc) => match self.pick(ndc) {
                    Some(hit) => {
                        debug!(kind = %hit.tag.kind, label = %hit.tag.label, "feature selected");
                        self.registry.highlight_by_label(&mut self.world, &hit.tag.label);
                        self.events.emit(self.frame.index, MapEvent::Selected(hit.tag.clone()));
                        selected = Some(hit.tag);
                    }
                    None => self.events.emit(self.frame.index, MapEvent::SelectionMissed),
                },
            }
        }
        GestureOutcome { events, selected }
    }

    /// Nearest clickable feature under a normalized screen point.
    pub fn pick(&self, ndc: Vec2) -> Option<PickHit> {
        let Some(ray) = self.rig.ray_through(ndc) else {
            error!(x = ndc.x, y = ndc.y, "no picking ray for screen point");
            return None;
        };
        pick_ray(&self.world, ray, PickOptions::default())
    }

    /// Animate to a new eye and look-at point. `None` uses the configured
    /// duration.
    pub fn move_camera(&mut self, stands: Vec3, look_at: Vec3, duration_s: Option<f64>) {
        let duration = duration_s.unwrap_or(self.config.move_duration_s);
        self.rig.move_to(stands, look_at, duration);
    }

    pub fn update_look_at_point(&mut self, point: Vec3) {
        self.rig.update_look_at_point(point);
    }

    pub fn set_panning_mode(&mut self, panning: bool) {
        self.rig.set_panning_mode(panning);
    }

    pub fn enable_auto_rotate(&mut self, speed: f64) {
        self.rig.enable_auto_rotate(speed);
    }

    pub fn highlight_by_label(&mut self, label: &str) {
        self.registry.highlight_by_label(&mut self.world, label);
    }

    pub fn highlight_by_index<S: AsRef<str>>(&mut self, indices: &[S]) {
        self.registry.highlight_by_index(&mut self.world, indices);
    }

    pub fn hover_by_label(&mut self, label: &str) {
        self.registry.hover_by_label(&mut self.world, label);
    }

    pub fn clear_highlight(&mut self) {
        self.registry.clear_highlight(&mut self.world);
    }

    pub fn clear_hover(&mut self) {
        self.registry.clear_hover(&mut self.world);
    }

    pub fn label_for_iterator(&self, iterator: &str) -> Option<&str> {
        self.registry.label_for_iterator(iterator)
    }

    pub fn take_asset_requests(&mut self) -> Vec<AssetRequest> {
        self.registry.take_asset_requests()
    }

    pub fn resolve_asset(&mut self, response: AssetResponse) -> bool {
        self.registry.resolve_asset(&mut self.world, response)
    }

    /// Answer pending detail-model requests from the loaded catalog.
    ///
    /// Requests this map cannot serve itself (images) are returned for the
    /// host. A model that fails to decode keeps its placeholder.
    pub fn fulfil_detail_models(&mut self) -> Vec<AssetRequest> {
        let mut remaining = Vec::new();
        for request in self.registry.take_asset_requests() {
            let AssetKind::DetailModel { id } = &request.kind else {
                remaining.push(request);
                continue;
            };
            match self.catalog.decode_asset(id) {
                Ok(bytes) => {
                    let model = ModelAsset {
                        name: id.clone(),
                        bytes,
                    };
                    self.registry
                        .resolve_asset(&mut self.world, AssetResponse::model(request.ticket, model));
                }
                Err(err) => {
                    error!(id = %id, %err, "detail model decode failed");
                    self.registry.cancel_asset(request.ticket);
                }
            }
        }
        remaining
    }

    pub fn drain_events(&mut self) -> Vec<Event<MapEvent>> {
        self.events.drain()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    pub fn floor(&self) -> &GeoRectangle {
        &self.floor
    }

    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    pub fn rig_mut(&mut self) -> &mut CameraRig {
        &mut self.rig
    }

    pub fn text(&self) -> &T {
        &self.text
    }

    /// Place the eye directly, bypassing animation.
    pub fn set_camera(&mut self, position: Vec3, target: Vec3) {
        let controls = self.rig.controls_mut();
        controls.set_target(target);
        controls.set_position(position);
    }
}
