use foundation::math::{Vec2, Vec3};
use runtime::animation::{MoveAnimation, MoveTrack};
use scene::picking::Ray;
use tracing::debug;

use crate::controls::{ButtonMapping, OrbitConfig, OrbitControls};
use crate::gesture::{GestureEvent, GestureState, GestureTracker};
use crate::orbit::SphericalOrbit;
use crate::pose::CameraPose;
use crate::projection::PerspectiveProjection;

/// Orbit controls plus the gesture tracker, panning mode, and the camera move
/// animation, stepped once per render tick.
#[derive(Debug, Clone)]
pub struct CameraRig<C: OrbitControls = SphericalOrbit> {
    controls: C,
    projection: PerspectiveProjection,
    tracker: GestureTracker,
    panning_mode: bool,
    /// Mode requested mid-gesture; applied when the gesture ends.
    pending_mode: Option<bool>,
    motion: Option<MoveAnimation>,
}

impl CameraRig<SphericalOrbit> {
    pub fn from_config(config: &OrbitConfig, aspect: f64) -> Self {
        Self::new(
            SphericalOrbit::new(config),
            PerspectiveProjection::new(config.fov_deg, aspect),
        )
    }
}

impl<C: OrbitControls> CameraRig<C> {
    /// Starts in panning mode.
    pub fn new(controls: C, projection: PerspectiveProjection) -> Self {
        let mut rig = Self {
            controls,
            projection,
            tracker: GestureTracker::new(),
            panning_mode: false,
            pending_mode: None,
            motion: None,
        };
        rig.set_panning_mode(true);
        rig
    }

    pub fn controls(&self) -> &C {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut C {
        &mut self.controls
    }

    pub fn projection_mut(&mut self) -> &mut PerspectiveProjection {
        &mut self.projection
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose::from_controls(&self.controls)
    }

    /// One render tick: controls update, then the move animation, then the
    /// pose readout.
    pub fn tick(&mut self, dt_s: f64) -> CameraPose {
        self.controls.update(dt_s);

        if let Some(motion) = self.motion.as_mut() {
            let controls = &mut self.controls;
            let done = motion.advance(dt_s, |track, value| match track {
                MoveTrack::Position => controls.set_position(value),
                MoveTrack::LookAt => controls.set_target(value),
            });
            if done {
                self.motion = None;
                self.controls.set_enabled(true);
            }
        }

        self.pose()
    }

    /// Animate the eye to `stands` and the look-at point to `look_at`.
    ///
    /// User input is disabled until the move completes. A move already in
    /// flight is cancelled and the new one starts from the current pose.
    pub fn move_to(&mut self, stands: Vec3, look_at: Vec3, duration_s: f64) {
        if self.motion.take().is_some() {
            debug!("camera move superseded");
        }
        self.controls.set_enabled(false);
        self.motion = Some(MoveAnimation::new(
            self.controls.position(),
            stands,
            self.controls.target(),
            look_at,
            duration_s,
        ));
    }

    pub fn is_moving(&self) -> bool {
        self.motion.is_some()
    }

    pub fn update_look_at_point(&mut self, point: Vec3) {
        self.controls.set_target(point);
    }

    pub fn panning_mode(&self) -> bool {
        self.panning_mode
    }

    /// Remap drags to pan (`true`) or rotate (`false`).
    ///
    /// A drag the controls have started keeps its mapping; the change lands
    /// when it ends. A bare press does not hold the change back.
    pub fn set_panning_mode(&mut self, panning: bool) {
        if self.tracker.is_dragging() {
            self.pending_mode = Some(panning);
            return;
        }
        self.apply_mode(panning);
    }

    fn apply_mode(&mut self, panning: bool) {
        self.panning_mode = panning;
        self.pending_mode = None;
        self.controls.set_mapping(ButtonMapping::for_mode(panning));
    }

    pub fn enable_auto_rotate(&mut self, speed: f64) {
        self.controls.set_auto_rotate(Some(speed));
    }

    pub fn gesture_state(&self) -> GestureState {
        self.tracker.state()
    }

    pub fn pointer_down(&mut self, x_px: f64, y_px: f64, width: f64, height: f64) {
        self.tracker.pointer_down(x_px, y_px, width, height);
    }

    pub fn control_start(&mut self) -> Vec<GestureEvent> {
        if let Some(mode) = self.pending_mode {
            self.apply_mode(mode);
        }
        self.tracker.start()
    }

    pub fn control_change(&mut self) -> Vec<GestureEvent> {
        self.tracker.change()
    }

    pub fn control_end(&mut self) -> Vec<GestureEvent> {
        let events = self.tracker.end();
        if let Some(mode) = self.pending_mode {
            self.apply_mode(mode);
        }
        events
    }

    /// Picking ray through a normalized screen point.
    pub fn ray_through(&self, ndc: Vec2) -> Option<Ray> {
        self.projection
            .ray_through(ndc, self.controls.position(), self.controls.target())
    }
}

#[cfg(test)]
mod tests {
    use super::CameraRig;
    use crate::controls::{ButtonMapping, OrbitConfig, OrbitControls};
    use crate::gesture::GestureEvent;
    use foundation::math::{Vec2, Vec3};
    use pretty_assertions::assert_eq;

    fn rig() -> CameraRig {
        CameraRig::from_config(&OrbitConfig::default(), 1.0)
    }

    #[test]
    fn starts_in_panning_mode() {
        let rig = rig();
        assert!(rig.panning_mode());
        assert_eq!(rig.controls().mapping(), ButtonMapping::panning());
    }

    #[test]
    fn mode_change_waits_for_gesture_end() {
        let mut rig = rig();
        rig.pointer_down(0.0, 0.0, 10.0, 10.0);
        rig.control_start();
        rig.set_panning_mode(false);
        assert!(rig.panning_mode());
        assert_eq!(rig.controls().mapping(), ButtonMapping::panning());

        rig.control_change();
        rig.control_end();
        assert!(!rig.panning_mode());
        assert_eq!(rig.controls().mapping(), ButtonMapping::rotating());
    }

    #[test]
    fn press_without_start_does_not_hold_back_mode_change() {
        let mut rig = rig();
        rig.pointer_down(1.0, 1.0, 10.0, 10.0);
        rig.set_panning_mode(false);
        assert!(!rig.panning_mode());

        rig.pointer_down(2.0, 2.0, 10.0, 10.0);
        rig.control_start();
        assert_eq!(rig.controls().mapping(), ButtonMapping::rotating());
    }

    #[test]
    fn mode_left_pending_by_a_lost_end_applies_on_next_start() {
        let mut rig = rig();
        rig.pointer_down(0.0, 0.0, 10.0, 10.0);
        rig.control_start();
        rig.set_panning_mode(false);
        assert_eq!(rig.controls().mapping(), ButtonMapping::panning());

        rig.pointer_down(0.0, 0.0, 10.0, 10.0);
        rig.control_start();
        assert!(!rig.panning_mode());
        assert_eq!(rig.controls().mapping(), ButtonMapping::rotating());
    }

    #[test]
    fn tap_reports_click_at_press_point() {
        let mut rig = rig();
        rig.pointer_down(5.0, 5.0, 10.0, 10.0);
        let mut events = rig.control_start();
        events.extend(rig.control_end());
        assert_eq!(events.last(), Some(&GestureEvent::Click(Vec2::new(0.0, 0.0))));
    }

    #[test]
    fn move_disables_input_until_done() {
        let mut rig = rig();
        let stands = Vec3::new(1.0, 0.5, 1.0);
        let look = Vec3::new(1.0, 0.0, 0.5);
        rig.move_to(stands, look, 1.0);
        assert!(!rig.controls().is_enabled());

        rig.tick(0.5);
        assert!(rig.is_moving());
        // Halfway through a smooth track sits exactly at the midpoint.
        let mid = rig.controls().target();
        assert!((mid - Vec3::new(0.5, 0.0, 0.25)).length() < 1e-12);

        rig.tick(0.6);
        assert!(!rig.is_moving());
        assert!(rig.controls().is_enabled());
        assert_eq!(rig.controls().position(), stands);
        assert_eq!(rig.controls().target(), look);
    }

    #[test]
    fn new_move_starts_from_current_pose() {
        let mut rig = rig();
        rig.move_to(Vec3::new(2.0, 1.0, 2.0), Vec3::new(2.0, 0.0, 2.0), 1.0);
        rig.tick(0.5);
        let current = rig.controls().target();

        rig.move_to(Vec3::new(0.0, 1.0, 0.0), Vec3::ZERO, 1.0);
        rig.tick(0.0);
        assert_eq!(rig.controls().target(), current);
        rig.tick(1.0);
        assert_eq!(rig.controls().target(), Vec3::ZERO);
        assert!(rig.controls().is_enabled());
    }
}
