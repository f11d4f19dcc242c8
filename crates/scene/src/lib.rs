pub mod components;
pub mod entity;
pub mod picking;
pub mod world;

pub use entity::NodeId;
pub use world::*;
