//! Orbit camera for the town map: controls, gesture disambiguation, pose
//! readout, and animated moves.

pub mod controls;
pub mod gesture;
pub mod orbit;
pub mod pose;
pub mod projection;
pub mod rig;

pub use controls::*;
pub use gesture::*;
pub use orbit::*;
pub use pose::*;
pub use projection::*;
pub use rig::*;
