use foundation::math::Vec3;
use serde::Deserialize;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MouseAction {
    Rotate,
    Dolly,
    Pan,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TouchAction {
    Rotate,
    Pan,
    DollyPan,
    DollyRotate,
}

/// Which drag performs which camera motion.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ButtonMapping {
    pub left: MouseAction,
    pub middle: MouseAction,
    pub right: MouseAction,
    pub one_finger: TouchAction,
    pub two_fingers: TouchAction,
}

impl ButtonMapping {
    pub const fn panning() -> Self {
        Self {
            left: MouseAction::Pan,
            middle: MouseAction::Dolly,
            right: MouseAction::Pan,
            one_finger: TouchAction::Pan,
            two_fingers: TouchAction::DollyRotate,
        }
    }

    pub const fn rotating() -> Self {
        Self {
            left: MouseAction::Rotate,
            middle: MouseAction::Dolly,
            right: MouseAction::Rotate,
            one_finger: TouchAction::Rotate,
            two_fingers: TouchAction::DollyRotate,
        }
    }

    pub const fn for_mode(panning: bool) -> Self {
        if panning {
            Self::panning()
        } else {
            Self::rotating()
        }
    }

    pub fn action_for(&self, button: MouseButton) -> MouseAction {
        match button {
            MouseButton::Left => self.left,
            MouseButton::Middle => self.middle,
            MouseButton::Right => self.right,
        }
    }
}

/// Start-up camera and orbit limits.
#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    pub fov_deg: f64,
    pub position: [f64; 3],
    pub target: [f64; 3],
    pub min_distance: f64,
    pub max_distance: f64,
    pub min_polar_deg: f64,
    pub max_polar_deg: f64,
    /// Pan across the screen plane instead of the ground plane.
    pub screen_space_panning: bool,
    pub near: f64,
    pub far: f64,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            fov_deg: 50.0,
            position: [-0.6, 0.6, 0.6],
            target: [0.0, 0.0, 0.0],
            min_distance: 0.1,
            max_distance: 100.0,
            min_polar_deg: 0.0,
            max_polar_deg: 90.0,
            screen_space_panning: false,
            near: 0.1,
            far: 2000.0,
        }
    }
}

/// Orbit-style camera controller.
///
/// Input motions (`rotate`, `pan`, `dolly`) are ignored while disabled;
/// `update` runs every tick regardless.
pub trait OrbitControls {
    /// Per-tick update. Returns `true` when the camera moved.
    fn update(&mut self, dt_s: f64) -> bool;

    /// Angle from the +Y axis, radians.
    fn polar_angle(&self) -> f64;
    /// Angle about +Y measured from +Z towards +X, radians.
    fn azimuthal_angle(&self) -> f64;
    fn distance(&self) -> f64;

    fn position(&self) -> Vec3;
    fn set_position(&mut self, position: Vec3);
    fn target(&self) -> Vec3;
    fn set_target(&mut self, target: Vec3);

    fn is_enabled(&self) -> bool;
    fn set_enabled(&mut self, enabled: bool);

    fn mapping(&self) -> ButtonMapping;
    fn set_mapping(&mut self, mapping: ButtonMapping);

    fn set_auto_rotate(&mut self, speed: Option<f64>);

    fn rotate(&mut self, d_azimuth: f64, d_polar: f64) -> bool;
    /// Pan by `right` and `forward` world units relative to the view.
    fn pan(&mut self, right: f64, forward: f64) -> bool;
    /// Multiply the target distance by `factor`.
    fn dolly(&mut self, factor: f64) -> bool;
}
