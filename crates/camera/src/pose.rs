use foundation::math::Vec3;

use crate::controls::OrbitControls;

/// Camera readout for one render tick.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraPose {
    /// Whole degrees, floored.
    pub polar_deg: f64,
    /// Whole degrees, floored.
    pub azimuth_deg: f64,
    pub distance: f64,
    pub position: Vec3,
}

impl CameraPose {
    pub fn from_controls<C: OrbitControls + ?Sized>(controls: &C) -> Self {
        Self {
            polar_deg: controls.polar_angle().to_degrees().floor(),
            azimuth_deg: controls.azimuthal_angle().to_degrees().floor(),
            distance: controls.distance(),
            position: controls.position(),
        }
    }
}
